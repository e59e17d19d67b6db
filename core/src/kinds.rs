//! Closed enemy and tower taxonomies with their balance tables.
//!
//! Every combat number the simulation consumes lives here as a `const fn`
//! lookup so that systems and the world read from one authoritative table.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::TowerLevel;

/// Closed set of hostile unit archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast, fragile vanguard unit.
    Scout,
    /// Balanced mid-line attacker.
    Fighter,
    /// Slow unit with a larger health pool.
    Bomber,
    /// Armored unit that anchors mid-campaign waves.
    Destroyer,
    /// Late-campaign unit with the largest health pool.
    Titan,
    /// Minimal unit that spawns in clustered bursts rather than singly.
    Swarm,
    /// Reinforced unit with above-average health for its speed.
    Shield,
    /// Unit that periodically phases out of tower sensor range.
    Stealth,
}

impl EnemyKind {
    /// All enemy kinds in canonical order.
    pub const ALL: [EnemyKind; 8] = [
        EnemyKind::Scout,
        EnemyKind::Fighter,
        EnemyKind::Bomber,
        EnemyKind::Destroyer,
        EnemyKind::Titan,
        EnemyKind::Swarm,
        EnemyKind::Shield,
        EnemyKind::Stealth,
    ];

    /// Hit points a freshly spawned unit of this kind carries.
    #[must_use]
    pub const fn base_health(self) -> u32 {
        match self {
            Self::Scout => 30,
            Self::Fighter => 60,
            Self::Bomber => 90,
            Self::Destroyer => 150,
            Self::Titan => 300,
            Self::Swarm => 15,
            Self::Shield => 120,
            Self::Stealth => 50,
        }
    }

    /// Unmodified travel speed in world units per second.
    #[must_use]
    pub const fn base_speed(self) -> f32 {
        match self {
            Self::Scout => 60.0,
            Self::Fighter => 45.0,
            Self::Bomber => 35.0,
            Self::Destroyer => 28.0,
            Self::Titan => 20.0,
            Self::Swarm => 70.0,
            Self::Shield => 30.0,
            Self::Stealth => 55.0,
        }
    }

    /// Salvage paid for destroying a unit of this kind, before scaling.
    #[must_use]
    pub const fn base_salvage(self) -> u32 {
        match self {
            Self::Scout => 8,
            Self::Fighter => 12,
            Self::Bomber => 18,
            Self::Destroyer => 25,
            Self::Titan => 40,
            Self::Swarm => 4,
            Self::Shield => 22,
            Self::Stealth => 20,
        }
    }

    /// Station health removed when a unit of this kind reaches the core.
    #[must_use]
    pub const fn core_damage(self) -> u32 {
        1
    }

    /// Visible and hidden phase durations for units that cloak.
    ///
    /// Returns `None` for kinds that never leave sensor range.
    #[must_use]
    pub const fn stealth_cycle(self) -> Option<(Duration, Duration)> {
        match self {
            Self::Stealth => Some((Duration::from_millis(1500), Duration::from_millis(2500))),
            _ => None,
        }
    }

    /// Inclusive burst-size bounds for kinds that spawn in clusters.
    #[must_use]
    pub const fn cluster_size_range(self) -> Option<(u32, u32)> {
        match self {
            Self::Swarm => Some((2, 4)),
            _ => None,
        }
    }
}

/// Closed set of placeable weapon platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Rapid-fire ballistic turret.
    MachineGun,
    /// Precision beam weapon that hits the same tick it fires.
    Laser,
    /// Slow bolt weapon that damages an area around its impact point.
    Plasma,
    /// Guided warhead with the largest splash radius.
    Missile,
    /// Arc weapon that forks reduced damage to nearby units.
    Tesla,
    /// Zero-damage emitter that slows units it strikes.
    Freeze,
    /// Charge weapon that must reach full charge before every shot.
    Kinetic,
}

impl TowerKind {
    /// All tower kinds in canonical order.
    pub const ALL: [TowerKind; 7] = [
        TowerKind::MachineGun,
        TowerKind::Laser,
        TowerKind::Plasma,
        TowerKind::Missile,
        TowerKind::Tesla,
        TowerKind::Freeze,
        TowerKind::Kinetic,
    ];

    /// Salvage cost of placing a level-one tower of this kind.
    #[must_use]
    pub const fn base_cost(self) -> u32 {
        match self {
            Self::MachineGun => 100,
            Self::Laser => 150,
            Self::Plasma => 180,
            Self::Missile => 200,
            Self::Tesla => 220,
            Self::Freeze => 160,
            Self::Kinetic => 260,
        }
    }

    /// Damage a single level-one shot applies before bonus composition.
    #[must_use]
    pub const fn base_damage(self) -> u32 {
        match self {
            Self::MachineGun => 6,
            Self::Laser => 12,
            Self::Plasma => 20,
            Self::Missile => 30,
            Self::Tesla => 16,
            Self::Freeze => 0,
            Self::Kinetic => 45,
        }
    }

    /// Damage per shot at the provided level.
    ///
    /// Each level past the first multiplies base damage by 1.5, rounded to
    /// the nearest whole point.
    #[must_use]
    pub fn damage_for_level(self, level: TowerLevel) -> u32 {
        let scale = 1.5_f32.powi(i32::from(level.get()) - 1);
        (self.base_damage() as f32 * scale).round() as u32
    }

    /// Sensor and weapon range in world units before bonus composition.
    #[must_use]
    pub const fn base_range(self) -> f32 {
        match self {
            Self::MachineGun => 120.0,
            Self::Laser => 150.0,
            Self::Plasma => 130.0,
            Self::Missile => 180.0,
            Self::Tesla => 110.0,
            Self::Freeze => 125.0,
            Self::Kinetic => 200.0,
        }
    }

    /// Minimum simulated time between shots before bonus composition.
    #[must_use]
    pub const fn base_fire_interval(self) -> Duration {
        match self {
            Self::MachineGun => Duration::from_millis(300),
            Self::Laser => Duration::from_millis(800),
            Self::Plasma => Duration::from_millis(1200),
            Self::Missile => Duration::from_millis(1600),
            Self::Tesla => Duration::from_millis(1000),
            Self::Freeze => Duration::from_millis(2000),
            Self::Kinetic => Duration::from_millis(2500),
        }
    }

    /// How this weapon's damage reaches its target.
    #[must_use]
    pub const fn delivery(self) -> DeliveryMode {
        match self {
            Self::MachineGun | Self::Plasma | Self::Missile | Self::Kinetic => {
                DeliveryMode::Travelling
            }
            Self::Laser | Self::Tesla | Self::Freeze => DeliveryMode::Instant,
        }
    }

    /// Flight speed of a travelling round in world units per second.
    ///
    /// Instant weapons report zero; their damage never travels.
    #[must_use]
    pub const fn projectile_speed(self) -> f32 {
        match self {
            Self::MachineGun => 500.0,
            Self::Plasma => 300.0,
            Self::Missile => 220.0,
            Self::Kinetic => 650.0,
            Self::Laser | Self::Tesla | Self::Freeze => 0.0,
        }
    }

    /// Radius around the impact point in which splash damage applies.
    #[must_use]
    pub const fn splash_radius(self) -> Option<f32> {
        match self {
            Self::Plasma => Some(40.0),
            Self::Missile => Some(55.0),
            _ => None,
        }
    }

    /// Chain radius and the damage fraction forked to secondary targets.
    #[must_use]
    pub const fn chain(self) -> Option<(f32, f32)> {
        match self {
            Self::Tesla => Some((70.0, 0.5)),
            _ => None,
        }
    }

    /// Slow payload carried by the weapon, if any.
    #[must_use]
    pub const fn slow_effect(self) -> Option<SlowEffect> {
        match self {
            Self::Freeze => Some(SlowEffect {
                multiplier: 0.25,
                duration: Duration::from_millis(3000),
            }),
            _ => None,
        }
    }

    /// Whether the weapon refuses to fire below full charge.
    #[must_use]
    pub const fn requires_full_charge(self) -> bool {
        matches!(self, Self::Kinetic)
    }

    /// Angular tolerance, in radians, within which the weapon counts as aimed.
    ///
    /// Beam weapons demand a tight lock; guided warheads accept a wide cone.
    #[must_use]
    pub const fn aim_tolerance(self) -> f32 {
        match self {
            Self::Laser | Self::Tesla | Self::Freeze => 0.05,
            Self::MachineGun | Self::Plasma | Self::Kinetic => 0.15,
            Self::Missile => 0.5,
        }
    }

    /// Maximum rotation speed of the mount, in radians per second.
    #[must_use]
    pub const fn turn_rate(self) -> f32 {
        match self {
            Self::MachineGun => 6.0,
            Self::Laser => 4.0,
            Self::Plasma => 3.5,
            Self::Missile => 3.0,
            Self::Tesla => 5.0,
            Self::Freeze => 4.0,
            Self::Kinetic => 2.5,
        }
    }

    /// Fixed target-selection policy the weapon ships with.
    #[must_use]
    pub const fn targeting_mode(self) -> TargetingMode {
        match self {
            Self::MachineGun | Self::Tesla => TargetingMode::Nearest,
            Self::Laser | Self::Freeze => TargetingMode::First,
            Self::Plasma | Self::Missile | Self::Kinetic => TargetingMode::Strongest,
        }
    }
}

/// How a weapon's damage reaches its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryMode {
    /// Damage lands the same tick the shot fires.
    Instant,
    /// A projectile entity travels to a predicted impact point first.
    Travelling,
}

/// Target-selection policies available to towers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetingMode {
    /// Smallest Euclidean distance to the tower.
    Nearest,
    /// Largest Euclidean distance to the tower, within range.
    Furthest,
    /// Largest maximum health pool.
    Strongest,
    /// Smallest current health.
    Weakest,
    /// Greatest path progress toward the station.
    First,
    /// Least path progress toward the station.
    Last,
}

/// Speed-multiplier payload applied by slowing weapons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlowEffect {
    /// Replacement speed multiplier while the effect holds.
    pub multiplier: f32,
    /// How long the effect holds from the moment of (re)application.
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::{DeliveryMode, EnemyKind, TowerKind};
    use crate::TowerLevel;

    #[test]
    fn machine_gun_damage_scales_by_half_per_level() {
        let kind = TowerKind::MachineGun;
        assert_eq!(kind.damage_for_level(TowerLevel::ONE), 6);
        let two = TowerLevel::ONE.next().expect("level two");
        assert_eq!(kind.damage_for_level(two), 9);
        let three = two.next().expect("level three");
        assert_eq!(kind.damage_for_level(three), 14);
    }

    #[test]
    fn freeze_deals_no_direct_damage_but_carries_a_slow() {
        assert_eq!(TowerKind::Freeze.base_damage(), 0);
        let slow = TowerKind::Freeze.slow_effect().expect("slow payload");
        assert!((slow.multiplier - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn instant_weapons_report_zero_projectile_speed() {
        for kind in TowerKind::ALL {
            match kind.delivery() {
                DeliveryMode::Instant => assert_eq!(kind.projectile_speed(), 0.0),
                DeliveryMode::Travelling => assert!(kind.projectile_speed() > 0.0),
            }
        }
    }

    #[test]
    fn only_kinetic_requires_full_charge() {
        for kind in TowerKind::ALL {
            assert_eq!(kind.requires_full_charge(), kind == TowerKind::Kinetic);
        }
    }

    #[test]
    fn swarm_is_the_only_clustered_kind() {
        for kind in EnemyKind::ALL {
            match kind {
                EnemyKind::Swarm => {
                    assert_eq!(kind.cluster_size_range(), Some((2, 4)));
                }
                _ => assert_eq!(kind.cluster_size_range(), None),
            }
        }
    }

    #[test]
    fn every_kind_reaches_the_core_for_one_point() {
        for kind in EnemyKind::ALL {
            assert_eq!(kind.core_damage(), 1);
        }
    }
}
