//! Impact resolution: direct hits, splash, chain forks, slows, and kills.

use station_defence_core::{
    BonusKind, EnemyId, Event, MapIndex, PowerUpKind, ProgressCounter, SlowEffect, WaveIndex,
    WorldPoint,
};
use station_defence_system_bonus as bonus;
use station_defence_system_economy as economy;

use crate::{unlock_achievements, GameSession};

/// Everything one weapon discharge carries into the impact step.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ImpactSpec {
    /// Primary target of the discharge.
    pub(crate) target: EnemyId,
    /// Point the discharge lands at; splash is measured from here.
    pub(crate) point: WorldPoint,
    /// Fully composed damage for the primary target.
    pub(crate) damage: u32,
    /// Splash radius, if the weapon damages an area.
    pub(crate) splash: Option<f32>,
    /// Chain radius and forked damage fraction, if the weapon forks.
    pub(crate) chain: Option<(f32, f32)>,
    /// Slow payload, if the weapon slows.
    pub(crate) slow: Option<SlowEffect>,
}

/// Applies one impact to the world, damaging, slowing, and settling kills.
pub(crate) fn apply_impact(
    world: &mut GameSession,
    spec: &ImpactSpec,
    out_events: &mut Vec<Event>,
) {
    if let Some(slow) = spec.slow {
        apply_slow(world, spec.target, slow, out_events);
    }
    if spec.damage == 0 {
        return;
    }

    // Collect hits before mutating so splash and chain scans see a stable set.
    let mut hits: Vec<(EnemyId, u32)> = vec![(spec.target, spec.damage)];
    if let Some(radius) = spec.splash {
        for (id, enemy) in world.enemies.iter() {
            if id != spec.target && enemy.position.distance(spec.point) <= radius {
                hits.push((id, spec.damage));
            }
        }
    }
    if let Some((radius, fraction)) = spec.chain {
        let forked = (spec.damage as f32 * fraction).round() as u32;
        if let Some(origin) = world.enemies.get(spec.target).map(|enemy| enemy.position) {
            for (id, enemy) in world.enemies.iter() {
                if id != spec.target && enemy.position.distance(origin) <= radius {
                    hits.push((id, forked));
                }
            }
        }
    }

    let mut killed: Vec<EnemyId> = Vec::new();
    for (id, amount) in hits {
        let Some(enemy) = world.enemies.get_mut(id) else {
            continue;
        };
        enemy.health = enemy.health.saturating_sub(amount);
        let remaining = enemy.health;
        out_events.push(Event::EnemyDamaged {
            enemy: id,
            amount,
            remaining,
        });
        if remaining == 0 {
            killed.push(id);
        }
    }
    for id in killed {
        settle_kill(world, id, out_events);
    }
}

fn apply_slow(world: &mut GameSession, target: EnemyId, slow: SlowEffect, out_events: &mut Vec<Event>) {
    let clock = world.clock;
    if let Some(enemy) = world.enemies.get_mut(target) {
        // The multiplier is set absolutely; reapplication refreshes the
        // expiry but never compounds.
        enemy.speed_multiplier = slow.multiplier;
        enemy.slow_until = Some(clock.saturating_add(slow.duration));
        out_events.push(Event::EnemySlowed {
            enemy: target,
            multiplier: slow.multiplier,
        });
    }
}

fn settle_kill(world: &mut GameSession, enemy: EnemyId, out_events: &mut Vec<Event>) {
    let Some(unit) = world.enemies.remove(enemy) else {
        return;
    };
    let (map, wave) = world
        .wave
        .map_or((MapIndex::FIRST, WaveIndex::FIRST), |state| {
            (state.map, state.wave)
        });
    let active = world.active_power_ups();
    let unlocked = world.unlocked_achievements();
    let reward = economy::kill_reward(
        unit.kind.base_salvage(),
        map,
        wave,
        bonus::power_up_multiplier(&active, PowerUpKind::SalvageMultiplier),
        bonus::achievement_multiplier(&unlocked, BonusKind::Salvage),
    );
    world.salvage = world.salvage.saturating_add(reward);
    world.score = world.score.saturating_add(u64::from(reward));
    world.kills = world.kills.saturating_add(1);
    out_events.push(Event::EnemyKilled {
        enemy,
        kind: unit.kind,
        reward,
    });
    unlock_achievements(world, ProgressCounter::Kills, out_events);
}
