//! Behavior-specific parameters for hostile units.

use relic_core::constants::RANDOM_AI_DEFENDER_CHANCE;
use relic_core::enums::AiBehavior;

/// Behavioral profile for an AI tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorProfile {
    /// Probability of chasing a defense rather than the relic when the
    /// tag picks targets at random.
    pub defender_chance: f64,
    /// Whether the unit only ever targets the relic.
    pub relic_only: bool,
    /// Stop one cell short of the relic and attack from adjacency.
    pub holds_short_of_relic: bool,
    /// Destroy self after landing the first hit.
    pub self_destructs_on_hit: bool,
}

/// Get the behavioral profile for a given tag.
pub fn get_profile(behavior: AiBehavior) -> BehaviorProfile {
    match behavior {
        AiBehavior::SeekNearest => BehaviorProfile {
            defender_chance: 1.0,
            relic_only: false,
            holds_short_of_relic: true,
            self_destructs_on_hit: false,
        },
        AiBehavior::Random => BehaviorProfile {
            defender_chance: RANDOM_AI_DEFENDER_CHANCE,
            relic_only: false,
            holds_short_of_relic: true,
            self_destructs_on_hit: false,
        },
        AiBehavior::SuicideRush => BehaviorProfile {
            defender_chance: 0.0,
            relic_only: true,
            holds_short_of_relic: false,
            self_destructs_on_hit: true,
        },
    }
}
