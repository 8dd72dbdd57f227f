//! End-of-run summary and battle report.

use std::collections::BTreeMap;
use std::fmt::Write;

use relic_core::combat::CombatRecord;
use relic_core::events::GameEvent;
use relic_core::state::SessionSnapshot;
use relic_core::types::UnitId;

/// Hits dealt by one attacker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackerTally {
    pub attacker_id: UnitId,
    pub attacker_name: String,
    pub hits: u32,
    pub damage: u64,
    pub kills: u32,
    pub relic_hits: u32,
}

/// One tally per attacker, heaviest hitters first.
pub fn tally_attackers(log: &[CombatRecord]) -> Vec<AttackerTally> {
    let mut tallies: BTreeMap<UnitId, AttackerTally> = BTreeMap::new();
    for record in log {
        let tally = tallies
            .entry(record.attacker_id)
            .or_insert_with(|| AttackerTally {
                attacker_id: record.attacker_id,
                attacker_name: record.attacker_name.clone(),
                hits: 0,
                damage: 0,
                kills: 0,
                relic_hits: 0,
            });
        tally.hits += 1;
        tally.damage += u64::from(record.damage);
        if record.was_killed() && !record.targets_relic() {
            tally.kills += 1;
        }
        if record.targets_relic() {
            tally.relic_hits += 1;
        }
    }
    let mut tallies: Vec<_> = tallies.into_values().collect();
    tallies.sort_by(|a, b| b.damage.cmp(&a.damage).then(a.attacker_id.cmp(&b.attacker_id)));
    tallies
}

pub fn summary(snapshot: &SessionSnapshot, events: &[GameEvent]) -> String {
    let levels_completed = events
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelCompleted { .. }))
        .count();
    let spawned = events
        .iter()
        .filter(|e| matches!(e, GameEvent::UnitSpawned { .. }))
        .count();
    let outcome = events.iter().rev().find_map(|e| match e {
        GameEvent::SessionWon { .. } => Some("won"),
        GameEvent::SessionLost { .. } => Some("lost"),
        _ => None,
    });

    let mut out = String::new();
    let _ = writeln!(out, "=== relic-guard ===");
    let _ = writeln!(
        out,
        "outcome:   {} ({:?}) after {} ticks ({:.1}s)",
        outcome.unwrap_or("in progress"),
        snapshot.phase,
        snapshot.time.tick,
        snapshot.time.elapsed_secs()
    );
    let _ = writeln!(
        out,
        "level:     {} (index {}), wave {}/{}{}",
        snapshot.level_number,
        snapshot.level_index,
        snapshot.wave.index + 1,
        snapshot.wave.total_waves,
        if snapshot.level_complete { ", complete" } else { "" }
    );
    let _ = writeln!(
        out,
        "relic:     {}/{} at {}",
        snapshot.relic.health, snapshot.relic.max_health, snapshot.relic.position
    );
    let _ = writeln!(
        out,
        "player:    {} L{} coins {} score {} army {}/{}",
        snapshot.player.name,
        snapshot.player.level,
        snapshot.player.coins,
        snapshot.player.score,
        snapshot.player.used_space,
        snapshot.player.max_capacity
    );
    let _ = writeln!(
        out,
        "progress:  {levels_completed} level(s) completed, {spawned} hostile(s) spawned, {} unit(s) on board",
        snapshot.units.len()
    );
    out
}

pub fn battle_report(log: &[CombatRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== battle report ({} hits) ===", log.len());
    for tally in tally_attackers(log) {
        let _ = writeln!(
            out,
            "{:<16} {:>6} {:>5} hits {:>7} dmg {:>4} kills {:>4} relic",
            tally.attacker_name,
            tally.attacker_id.to_string(),
            tally.hits,
            tally.damage,
            tally.kills,
            tally.relic_hits
        );
    }
    out
}
