#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Salvage arithmetic: kill rewards, wave-clear bonuses, and tower costs.
//!
//! All formulas operate on one-based map and wave indices and round exactly
//! once, on the fully composed value.

use station_defence_core::{MapIndex, TowerKind, TowerLevel, WaveIndex};

/// Flat component of every wave-clear bonus.
pub const BASE_WAVE_BONUS: u32 = 50;

/// Salvage paid for destroying one enemy.
///
/// The base reward scales by 20% per map past the first, 10% per wave past
/// the first, then by the active salvage power-up and the best unlocked
/// salvage achievement.
#[must_use]
pub fn kill_reward(
    base: u32,
    map: MapIndex,
    wave: WaveIndex,
    salvage_power_up: f32,
    achievement_salvage: f32,
) -> u32 {
    let map_term = 0.2 * (map.get().saturating_sub(1)) as f32;
    let wave_term = 0.1 * (wave.get().saturating_sub(1)) as f32;
    let scaled = base as f32 * (1.0 + map_term + wave_term) * salvage_power_up * achievement_salvage;
    scaled.round() as u32
}

/// Salvage paid when a wave closes.
///
/// Doubled when the station took no damage during the wave.
#[must_use]
pub fn wave_clear_bonus(map: MapIndex, wave: WaveIndex, perfect: bool) -> u32 {
    let bonus = BASE_WAVE_BONUS + wave.get() * 10 + map.get() * 15;
    if perfect {
        bonus * 2
    } else {
        bonus
    }
}

/// Salvage cost of placing a level-one tower of the provided kind.
#[must_use]
pub const fn placement_cost(kind: TowerKind) -> u32 {
    kind.base_cost()
}

/// Salvage cost of raising a tower from its current level to the next.
///
/// Each upgrade costs the base cost scaled by 1.5 raised to the current
/// level, rounded to the nearest whole point.
#[must_use]
pub fn upgrade_cost(kind: TowerKind, current: TowerLevel) -> u32 {
    let scale = 1.5_f32.powi(i32::from(current.get()));
    (kind.base_cost() as f32 * scale).round() as u32
}

/// Salvage refunded when a tower is sold: half of everything invested.
#[must_use]
pub const fn sell_value(invested: u32) -> u32 {
    invested / 2
}

#[cfg(test)]
mod tests {
    use super::{kill_reward, sell_value, upgrade_cost, wave_clear_bonus};
    use station_defence_core::{MapIndex, TowerKind, TowerLevel, WaveIndex};

    #[test]
    fn first_map_first_wave_pays_the_base_reward() {
        let reward = kill_reward(10, MapIndex::FIRST, WaveIndex::FIRST, 1.0, 1.0);
        assert_eq!(reward, 10);
    }

    #[test]
    fn map_and_wave_scaling_compose_linearly() {
        // 10 * (1 + 0.2*2 + 0.1*1) = 15
        let reward = kill_reward(10, MapIndex::new(3), WaveIndex::new(2), 1.0, 1.0);
        assert_eq!(reward, 15);
    }

    #[test]
    fn reward_multipliers_apply_before_rounding() {
        // 7 * 1.1 * 2.0 = 15.4, rounds to 15
        let reward = kill_reward(7, MapIndex::FIRST, WaveIndex::FIRST, 2.0, 1.1);
        assert_eq!(reward, 15);
    }

    #[test]
    fn machine_gun_upgrade_path_matches_the_table() {
        let kind = TowerKind::MachineGun;
        assert_eq!(upgrade_cost(kind, TowerLevel::ONE), 150);
        let two = TowerLevel::ONE.next().expect("level two");
        assert_eq!(upgrade_cost(kind, two), 225);
    }

    #[test]
    fn selling_refunds_half_the_investment() {
        // Placement 100 plus one upgrade 150.
        assert_eq!(sell_value(250), 125);
        assert_eq!(sell_value(101), 50);
    }

    #[test]
    fn perfect_waves_double_the_clear_bonus() {
        let standard = wave_clear_bonus(MapIndex::new(2), WaveIndex::new(3), false);
        assert_eq!(standard, 50 + 30 + 30);
        assert_eq!(
            wave_clear_bonus(MapIndex::new(2), WaveIndex::new(3), true),
            standard * 2
        );
    }
}
