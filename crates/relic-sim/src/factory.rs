//! Unit factory: templates in, boosted units out.

use std::sync::Arc;

use tracing::warn;

use relic_core::config::{DefenseTemplate, GameConfig, HostileTemplate};
use relic_core::enums::{AiBehavior, UnitCategory};
use relic_core::error::UnknownTagError;
use relic_core::types::UnitId;

use crate::unit::{DefenseState, HostileState, Unit, UnitCore, UnitRole};

/// Scale a base stat by `1 + boost`, truncating.
pub fn boosted(base: u32, boost: f64) -> u32 {
    (f64::from(base) * (1.0 + boost)) as u32
}

/// Creates units from the shared configuration and hands out ids.
#[derive(Debug, Clone)]
pub struct UnitFactory {
    config: Arc<GameConfig>,
    next_id: u64,
}

impl UnitFactory {
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self { config, next_id: 1 }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        id
    }

    /// `None` (with a warning) if the template does not exist.
    pub fn create_defense(&mut self, template_id: &str, boost: f64) -> Option<Unit> {
        let Some(template) = self.config.defense(template_id).cloned() else {
            warn!(template_id, "unknown defense template; no unit created");
            return None;
        };
        let id = self.allocate_id();
        Some(build_defense(id, &template, boost))
    }

    /// `None` (with a warning) if the template does not exist.
    pub fn create_hostile(&mut self, template_id: &str, boost: f64) -> Option<Unit> {
        let Some(template) = self.config.hostile(template_id).cloned() else {
            warn!(template_id, "unknown hostile template; no unit created");
            return None;
        };
        let id = self.allocate_id();
        Some(build_hostile(id, &template, boost))
    }

    /// Look the id up among defenses first, then hostiles. Unboosted.
    pub fn create_any(&mut self, template_id: &str) -> Option<Unit> {
        if self.config.defense(template_id).is_some() {
            self.create_defense(template_id, 0.0)
        } else if self.config.hostile(template_id).is_some() {
            self.create_hostile(template_id, 0.0)
        } else {
            warn!(template_id, "unknown unit template; no unit created");
            None
        }
    }
}

fn category_or_default(parsed: Result<UnitCategory, UnknownTagError>, template_id: &str) -> UnitCategory {
    parsed.unwrap_or_else(|err| {
        warn!(template_id, %err, "falling back to Contact");
        UnitCategory::Contact
    })
}

fn build_defense(id: UnitId, template: &DefenseTemplate, boost: f64) -> Unit {
    let category = category_or_default(template.parsed_category(), &template.id);
    let health = boosted(template.base_health, boost);
    Unit {
        core: UnitCore {
            id,
            template_id: template.id.clone(),
            name: template.name.clone(),
            category,
            locomotion: category.locomotion(),
            max_health: health,
            health,
            damage: boosted(template.base_damage, boost),
            hits_per_second: template.hits_per_second,
            space: template.space,
            boost,
            position: None,
            destroyed: false,
            last_attack_ms: None,
            combat_log: Vec::new(),
        },
        role: UnitRole::Defense(DefenseState {
            range: template.range,
            max_targets: template.max_targets,
            cost: template.cost,
            last_move_ms: None,
        }),
    }
}

fn build_hostile(id: UnitId, template: &HostileTemplate, boost: f64) -> Unit {
    let category = category_or_default(template.parsed_category(), &template.id);
    let behavior = template.parsed_behavior().unwrap_or_else(|err| {
        warn!(template_id = %template.id, %err, "falling back to seek-nearest");
        AiBehavior::SeekNearest
    });
    let health = boosted(template.base_health, boost);
    Unit {
        core: UnitCore {
            id,
            template_id: template.id.clone(),
            name: template.name.clone(),
            category,
            locomotion: category.locomotion(),
            max_health: health,
            health,
            damage: boosted(template.base_damage, boost),
            hits_per_second: template.hits_per_second,
            space: template.space,
            boost,
            position: None,
            destroyed: false,
            last_attack_ms: None,
            combat_log: Vec::new(),
        },
        role: UnitRole::Hostile(HostileState {
            speed: template.speed,
            behavior,
            last_move_ms: None,
        }),
    }
}
