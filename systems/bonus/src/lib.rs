#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Multiplier composition for damage, range, fire rate, and salvage.
//!
//! Every bonus in the simulation flows through this crate: temporary
//! power-ups, permanently unlocked achievement bonuses, positional tower
//! synergies, and per-tower tile bonuses. Composition is multiplicative
//! throughout, and rounding to whole points happens exactly once, on the
//! fully composed value.

use std::time::Duration;

use station_defence_core::{
    AchievementKind, BonusKind, PowerUpKind, TowerKind, WorldPoint, SYNERGY_RULES,
};

/// Multiplier contributed by the active power-up of the provided kind.
///
/// Returns 1.0 when no power-up of that kind is active. Power-ups never
/// stack within a kind, so at most one entry per kind appears in `active`.
#[must_use]
pub fn power_up_multiplier(active: &[PowerUpKind], kind: PowerUpKind) -> f32 {
    if active.contains(&kind) {
        kind.multiplier()
    } else {
        1.0
    }
}

/// Best unlocked achievement multiplier for the provided bonus category.
///
/// Same-category achievements never stack; only the highest unlocked tier
/// applies. Returns 1.0 when nothing relevant is unlocked.
#[must_use]
pub fn achievement_multiplier(unlocked: &[AchievementKind], category: BonusKind) -> f32 {
    unlocked
        .iter()
        .map(|achievement| achievement.bonus())
        .filter(|(kind, _)| *kind == category)
        .map(|(_, value)| value)
        .fold(1.0, f32::max)
}

/// Positional synergy multipliers composed for one receiving tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynergyBonuses {
    /// Multiplier applied to composed weapon damage.
    pub damage: f32,
    /// Multiplier applied to sensor and weapon range.
    pub range: f32,
    /// Multiplier applied to fire rate.
    pub speed: f32,
    /// Multiplier applied against armored targets.
    pub armor_piercing: f32,
}

impl Default for SynergyBonuses {
    fn default() -> Self {
        Self {
            damage: 1.0,
            range: 1.0,
            speed: 1.0,
            armor_piercing: 1.0,
        }
    }
}

/// Composes every synergy rule satisfied by the receiving tower's neighbours.
///
/// A rule applies when some other tower matches its provider kind, the
/// receiver's kind appears in its affected set, and the provider sits within
/// the rule's radius. Multiple providers stack multiplicatively, never
/// additively. `synergy_master` scales each rule's increment above 1.0
/// before composition; pass 1.0 when the synergy-master achievement is
/// locked.
#[must_use]
pub fn synergy_bonuses(
    receiver: TowerKind,
    position: WorldPoint,
    neighbours: &[(TowerKind, WorldPoint)],
    synergy_master: f32,
) -> SynergyBonuses {
    let mut bonuses = SynergyBonuses::default();
    for rule in SYNERGY_RULES {
        if !rule.affected.contains(&receiver) {
            continue;
        }
        for &(kind, provider_position) in neighbours {
            if kind != rule.provider {
                continue;
            }
            if position.distance(provider_position) > rule.radius {
                continue;
            }
            let contribution = 1.0 + (rule.value - 1.0) * synergy_master;
            let slot = match rule.bonus {
                BonusKind::Damage => &mut bonuses.damage,
                BonusKind::Range => &mut bonuses.range,
                BonusKind::Speed => &mut bonuses.speed,
                BonusKind::ArmorPiercing => &mut bonuses.armor_piercing,
                BonusKind::Salvage | BonusKind::SynergyMaster => continue,
            };
            *slot *= contribution;
        }
    }
    bonuses
}

/// Multipliers folded into one shot's damage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageFactors {
    /// Active damage power-up multiplier.
    pub power_up: f32,
    /// Best unlocked damage achievement multiplier.
    pub achievement: f32,
    /// Composed positional synergy multipliers.
    pub synergy: SynergyBonuses,
    /// Per-tower tile bonus fixed at placement time.
    pub tile_bonus: f32,
}

impl Default for DamageFactors {
    fn default() -> Self {
        Self {
            power_up: 1.0,
            achievement: 1.0,
            synergy: SynergyBonuses::default(),
            tile_bonus: 1.0,
        }
    }
}

/// Fully composed damage for one shot, rounded once at the end.
#[must_use]
pub fn final_damage(base: u32, factors: &DamageFactors) -> u32 {
    let composed = base as f32
        * factors.power_up
        * factors.achievement
        * factors.synergy.damage
        * factors.synergy.armor_piercing
        * factors.tile_bonus;
    composed.round() as u32
}

/// Sensor and weapon range after synergy composition.
#[must_use]
pub fn effective_range(base: f32, synergy: &SynergyBonuses) -> f32 {
    base * synergy.range
}

/// Minimum time between shots after fire-rate composition.
///
/// Speed multipliers shorten the interval; the composed value never drops
/// below one millisecond so cooldown arithmetic stays well defined.
#[must_use]
pub fn effective_fire_interval(
    base: Duration,
    synergy: &SynergyBonuses,
    speed_power_up: f32,
) -> Duration {
    let rate = (synergy.speed * speed_power_up).max(f32::EPSILON);
    let scaled = base.as_secs_f32() / rate;
    Duration::from_secs_f32(scaled.max(0.001))
}
