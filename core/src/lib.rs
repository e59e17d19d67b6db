#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Station Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and the session controller
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for systems to react to deterministically. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new
//! command batches.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod kinds;

pub use kinds::{DeliveryMode, EnemyKind, SlowEffect, TargetingMode, TowerKind};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Opens a new wave for the provided map and wave indices.
    BeginWave {
        /// Map the wave belongs to.
        map: MapIndex,
        /// Wave ordinal within the map.
        wave: WaveIndex,
        /// Number of enemies the wave will spawn in total.
        total_enemies: u32,
    },
    /// Requests that a new enemy enter the world at the provided position.
    SpawnEnemy {
        /// Archetype of the spawned enemy.
        kind: EnemyKind,
        /// World position the enemy materializes at.
        position: WorldPoint,
    },
    /// Moves an enemy to a new point along its path.
    AdvanceEnemy {
        /// Identifier of the enemy being moved.
        enemy: EnemyId,
        /// New world position of the enemy.
        position: WorldPoint,
        /// Fraction of the path completed, in `[0, 1]`.
        progress: f32,
        /// Smoothed velocity estimate used for predictive aiming.
        velocity: Velocity,
    },
    /// Rotates a tower mount toward its target.
    AimTower {
        /// Identifier of the tower being rotated.
        tower: TowerId,
        /// New mount orientation in radians.
        orientation: f32,
        /// Whether the mount is within its weapon's angular tolerance.
        aimed: bool,
    },
    /// Reports charge progress for a weapon still below full charge.
    ChargeTower {
        /// Identifier of the charging tower.
        tower: TowerId,
        /// Charge fraction in `[0, 1)`.
        progress: f32,
    },
    /// Discharges a tower's weapon at the provided target.
    FireTower {
        /// Identifier of the firing tower.
        tower: TowerId,
        /// Enemy the shot was aimed at.
        target: EnemyId,
        /// Predicted point of impact for travelling rounds.
        impact_point: WorldPoint,
    },
    /// Resolves a travelling projectile that completed its flight.
    ResolveProjectile {
        /// Identifier of the arrived projectile.
        projectile: ProjectileId,
        /// Whether the round counts as a hit on its target.
        hit: bool,
    },
    /// Requests placement of a new tower at the provided position.
    PlaceTower {
        /// Kind of tower to construct.
        kind: TowerKind,
        /// World position of the tower mount.
        position: WorldPoint,
        /// Damage multiplier granted by the hosting tile, fixed for life.
        tile_bonus: f32,
    },
    /// Requests a level increase for an existing tower.
    UpgradeTower {
        /// Identifier of the tower to upgrade.
        tower: TowerId,
    },
    /// Requests removal of an existing tower in exchange for salvage.
    SellTower {
        /// Identifier of the tower to sell.
        tower: TowerId,
    },
    /// Activates a temporary power-up, replacing any active one of its kind.
    ApplyPowerUp {
        /// Kind of power-up to activate.
        kind: PowerUpKind,
    },
    /// Closes the active wave and pays its clear bonus.
    CompleteWave,
    /// Records completion of the provided map.
    CompleteMap {
        /// Map whose final wave was cleared.
        map: MapIndex,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a new wave opened.
    WaveStarted {
        /// Map the wave belongs to.
        map: MapIndex,
        /// Wave ordinal within the map.
        wave: WaveIndex,
        /// Number of enemies the wave will spawn in total.
        total_enemies: u32,
    },
    /// Confirms that an enemy entered the world.
    EnemySpawned {
        /// Identifier assigned to the enemy by the world.
        enemy: EnemyId,
        /// Archetype of the spawned enemy.
        kind: EnemyKind,
        /// World position the enemy materialized at.
        position: WorldPoint,
    },
    /// Confirms that an enemy moved along its path.
    EnemyAdvanced {
        /// Identifier of the enemy that moved.
        enemy: EnemyId,
        /// New world position of the enemy.
        position: WorldPoint,
        /// Fraction of the path completed, in `[0, 1]`.
        progress: f32,
    },
    /// Reports that an enemy reached the station core.
    EnemyReachedCore {
        /// Identifier of the enemy that reached the core.
        enemy: EnemyId,
        /// Archetype of the enemy.
        kind: EnemyKind,
    },
    /// Reports that the station core absorbed damage.
    StationDamaged {
        /// Station health remaining after the hit.
        remaining: u32,
    },
    /// Reports that an enemy absorbed weapon damage.
    EnemyDamaged {
        /// Identifier of the damaged enemy.
        enemy: EnemyId,
        /// Damage applied after bonus composition.
        amount: u32,
        /// Enemy health remaining after the hit.
        remaining: u32,
    },
    /// Reports that an enemy's speed multiplier was replaced by a slow.
    EnemySlowed {
        /// Identifier of the slowed enemy.
        enemy: EnemyId,
        /// Speed multiplier now in force.
        multiplier: f32,
    },
    /// Reports that an enemy was destroyed and its reward paid.
    EnemyKilled {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Archetype of the destroyed enemy.
        kind: EnemyKind,
        /// Salvage paid for the kill after reward composition.
        reward: u32,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Kind of tower that was placed.
        kind: TowerKind,
        /// World position of the tower mount.
        position: WorldPoint,
        /// Salvage spent on the placement.
        cost: u32,
    },
    /// Confirms that a tower's level increased.
    TowerUpgraded {
        /// Identifier of the upgraded tower.
        tower: TowerId,
        /// Level the tower now holds.
        level: TowerLevel,
        /// Salvage spent on the upgrade.
        cost: u32,
    },
    /// Confirms that a tower was sold and removed.
    TowerSold {
        /// Identifier of the removed tower.
        tower: TowerId,
        /// Salvage refunded to the player.
        refund: u32,
    },
    /// Reports that a tower discharged its weapon.
    TowerFired {
        /// Identifier of the firing tower.
        tower: TowerId,
        /// Enemy the shot was aimed at.
        target: EnemyId,
        /// Delivery mode of the discharged weapon.
        delivery: DeliveryMode,
    },
    /// Reports charge progress for a weapon still below full charge.
    TowerCharging {
        /// Identifier of the charging tower.
        tower: TowerId,
        /// Charge fraction in `[0, 1)`.
        progress: f32,
    },
    /// Confirms that a travelling round was launched.
    ProjectileLaunched {
        /// Identifier assigned to the projectile by the world.
        projectile: ProjectileId,
        /// Tower that launched the round.
        tower: TowerId,
        /// Enemy the round was aimed at.
        target: EnemyId,
    },
    /// Reports that a travelling round arrived without a valid hit.
    ProjectileMissed {
        /// Identifier of the spent projectile.
        projectile: ProjectileId,
    },
    /// Confirms that a power-up activated.
    PowerUpApplied {
        /// Kind of power-up that activated.
        kind: PowerUpKind,
        /// Simulation timestamp at which the effect lapses.
        expires_at: Duration,
    },
    /// Reports that a power-up lapsed.
    PowerUpExpired {
        /// Kind of power-up that lapsed.
        kind: PowerUpKind,
    },
    /// Reports that an achievement threshold was met for the first time.
    AchievementUnlocked {
        /// Achievement that unlocked.
        kind: AchievementKind,
    },
    /// Reports that the active wave closed and its bonus was paid.
    WaveCompleted {
        /// Map the wave belonged to.
        map: MapIndex,
        /// Wave ordinal within the map.
        wave: WaveIndex,
        /// Salvage paid as the wave-clear bonus.
        bonus: u32,
        /// Whether the station took no damage during the wave.
        perfect: bool,
    },
    /// Reports that every wave of a map was cleared.
    MapCompleted {
        /// Map that was completed.
        map: MapIndex,
    },
    /// Reports that station health reached zero.
    GameOver,
    /// Reports that the final map was completed.
    Victory,
    /// Reports that a requested action was rejected as a no-op.
    ActionRejected {
        /// Specific reason the action failed.
        reason: ActionError,
    },
}

/// Reasons a requested action may be rejected by the world.
///
/// Every variant is recoverable; rejected actions leave state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ActionError {
    /// The action costs more salvage than the session has banked.
    #[error("action requires {required} salvage but only {available} is banked")]
    InsufficientSalvage {
        /// Salvage the action would have cost.
        required: u32,
        /// Salvage currently banked.
        available: u32,
    },
    /// A wave is already active; one wave runs at a time.
    #[error("a wave is already active")]
    WaveAlreadyActive,
    /// The requested position cannot host a tower.
    #[error("the requested position cannot host a tower")]
    InvalidPlacement,
    /// No tower with the provided identifier exists.
    #[error("no tower with the provided identifier exists")]
    UnknownTower,
    /// The tower already holds its maximum level.
    #[error("the tower is already at its maximum level")]
    TowerAtMaxLevel,
    /// The session reached a terminal state and accepts no further actions.
    #[error("the session has ended")]
    SessionOver,
}

/// Position in continuous world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Origin of world space.
    pub const ORIGIN: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Creates a new world-space point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation toward another point; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: WorldPoint, t: f32) -> WorldPoint {
        let t = t.clamp(0.0, 1.0);
        WorldPoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Angle, in radians, of the ray from this point toward another.
    #[must_use]
    pub fn bearing_to(self, other: WorldPoint) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Returns the point displaced by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: f32, dy: f32) -> WorldPoint {
        WorldPoint {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Velocity in world units per second.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    dx: f32,
    dy: f32,
}

impl Velocity {
    /// Velocity of a stationary entity.
    pub const ZERO: Velocity = Velocity { dx: 0.0, dy: 0.0 };

    /// Creates a new velocity from per-axis components.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Horizontal component in world units per second.
    #[must_use]
    pub const fn dx(&self) -> f32 {
        self.dx
    }

    /// Vertical component in world units per second.
    #[must_use]
    pub const fn dy(&self) -> f32 {
        self.dy
    }

    /// Speed of travel regardless of direction.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }

    /// Position reached after travelling from `origin` for `seconds`.
    #[must_use]
    pub fn project(&self, origin: WorldPoint, seconds: f32) -> WorldPoint {
        origin.offset(self.dx * seconds, self.dy * seconds)
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a travelling projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One-based index of a campaign map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapIndex(u32);

impl MapIndex {
    /// Index of the first campaign map.
    pub const FIRST: MapIndex = MapIndex(1);

    /// Creates a new map index; indices are one-based.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying one-based index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One-based index of a wave within a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaveIndex(u32);

impl WaveIndex {
    /// Index of the first wave of a map.
    pub const FIRST: WaveIndex = WaveIndex(1);

    /// Creates a new wave index; indices are one-based.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying one-based index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Tower level bounded to the inclusive range one through three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerLevel(u8);

impl TowerLevel {
    /// Level every tower is placed at.
    pub const ONE: TowerLevel = TowerLevel(1);

    /// Highest level a tower can reach.
    pub const MAX: TowerLevel = TowerLevel(3);

    /// Retrieves the numeric level.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// The next level up, or `None` at the maximum.
    #[must_use]
    pub const fn next(self) -> Option<TowerLevel> {
        if self.0 < Self::MAX.0 {
            Some(TowerLevel(self.0 + 1))
        } else {
            None
        }
    }
}

/// Temporary boosts a player can activate mid-wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Multiplies tower fire rate while active.
    SpeedBoost,
    /// Multiplies composed weapon damage while active.
    DamageBoost,
    /// Multiplies kill salvage while active.
    SalvageMultiplier,
    /// Blocks station damage from enemies reaching the core while active.
    Shield,
}

impl PowerUpKind {
    /// All power-up kinds in canonical order.
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::DamageBoost,
        PowerUpKind::SalvageMultiplier,
        PowerUpKind::Shield,
    ];

    /// Multiplier the power-up contributes while active.
    ///
    /// `Shield` contributes no multiplier; its effect is absolute.
    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::SpeedBoost => 1.5,
            Self::DamageBoost => 1.5,
            Self::SalvageMultiplier => 2.0,
            Self::Shield => 1.0,
        }
    }

    /// How long a fresh activation of the power-up lasts.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::SpeedBoost => Duration::from_secs(10),
            Self::DamageBoost => Duration::from_secs(10),
            Self::SalvageMultiplier => Duration::from_secs(15),
            Self::Shield => Duration::from_secs(8),
        }
    }
}

/// Categories of bonuses that feed multiplier composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BonusKind {
    /// Scales composed weapon damage.
    Damage,
    /// Scales tower sensor and weapon range.
    Range,
    /// Scales tower fire rate.
    Speed,
    /// Scales damage against armored targets.
    ArmorPiercing,
    /// Scales kill salvage.
    Salvage,
    /// Scales the increment of every positional synergy bonus.
    SynergyMaster,
}

/// Cumulative counters that achievement thresholds are measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProgressCounter {
    /// Total enemies destroyed across all sessions.
    Kills,
    /// Total waves cleared across all sessions.
    Waves,
    /// Total maps completed across all sessions.
    Maps,
}

impl ProgressCounter {
    /// Key under which the counter persists in a [`ProgressStore`].
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Kills => "kills",
            Self::Waves => "waves",
            Self::Maps => "maps",
        }
    }
}

/// Permanent milestones that grant bonuses once unlocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AchievementKind {
    /// Destroy twenty-five enemies.
    Kills25,
    /// Destroy one hundred enemies.
    Kills100,
    /// Destroy five hundred enemies.
    Kills500,
    /// Clear ten waves.
    Waves10,
    /// Clear twenty-five waves.
    Waves25,
    /// Complete three maps.
    Maps3,
}

impl AchievementKind {
    /// All achievements in canonical order.
    pub const ALL: [AchievementKind; 6] = [
        AchievementKind::Kills25,
        AchievementKind::Kills100,
        AchievementKind::Kills500,
        AchievementKind::Waves10,
        AchievementKind::Waves25,
        AchievementKind::Maps3,
    ];

    /// Counter the achievement's threshold is measured against.
    #[must_use]
    pub const fn counter(self) -> ProgressCounter {
        match self {
            Self::Kills25 | Self::Kills100 | Self::Kills500 => ProgressCounter::Kills,
            Self::Waves10 | Self::Waves25 => ProgressCounter::Waves,
            Self::Maps3 => ProgressCounter::Maps,
        }
    }

    /// Counter value at which the achievement unlocks.
    #[must_use]
    pub const fn threshold(self) -> i64 {
        match self {
            Self::Kills25 => 25,
            Self::Kills100 => 100,
            Self::Kills500 => 500,
            Self::Waves10 => 10,
            Self::Waves25 => 25,
            Self::Maps3 => 3,
        }
    }

    /// Bonus category and multiplier granted once unlocked.
    ///
    /// Achievements within a category never stack; only the highest unlocked
    /// multiplier per [`BonusKind`] applies.
    #[must_use]
    pub const fn bonus(self) -> (BonusKind, f32) {
        match self {
            Self::Kills25 => (BonusKind::Salvage, 1.1),
            Self::Kills100 => (BonusKind::Salvage, 1.2),
            Self::Kills500 => (BonusKind::Salvage, 1.3),
            Self::Waves10 => (BonusKind::Damage, 1.1),
            Self::Waves25 => (BonusKind::Damage, 1.2),
            Self::Maps3 => (BonusKind::SynergyMaster, 1.5),
        }
    }

    /// Key under which the unlocked flag persists in a [`ProgressStore`].
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Kills25 => "achievement.kills_25",
            Self::Kills100 => "achievement.kills_100",
            Self::Kills500 => "achievement.kills_500",
            Self::Waves10 => "achievement.waves_10",
            Self::Waves25 => "achievement.waves_25",
            Self::Maps3 => "achievement.maps_3",
        }
    }
}

/// Positional bonus one tower kind grants to nearby towers of other kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynergyRule {
    /// Tower kind whose presence grants the bonus.
    pub provider: TowerKind,
    /// Tower kinds eligible to receive the bonus.
    pub affected: &'static [TowerKind],
    /// Maximum distance between provider and receiver, in world units.
    pub radius: f32,
    /// Category of bonus the rule grants.
    pub bonus: BonusKind,
    /// Multiplier the rule contributes; providers stack multiplicatively.
    pub value: f32,
}

/// Positional synergy table consulted during bonus composition.
pub const SYNERGY_RULES: &[SynergyRule] = &[
    SynergyRule {
        provider: TowerKind::Tesla,
        affected: &[TowerKind::MachineGun, TowerKind::Laser],
        radius: 140.0,
        bonus: BonusKind::Speed,
        value: 1.2,
    },
    SynergyRule {
        provider: TowerKind::Laser,
        affected: &[TowerKind::Plasma],
        radius: 120.0,
        bonus: BonusKind::ArmorPiercing,
        value: 1.3,
    },
    SynergyRule {
        provider: TowerKind::Missile,
        affected: &[TowerKind::Kinetic],
        radius: 160.0,
        bonus: BonusKind::Damage,
        value: 1.2,
    },
    SynergyRule {
        provider: TowerKind::Freeze,
        affected: &[TowerKind::MachineGun, TowerKind::Missile, TowerKind::Kinetic],
        radius: 130.0,
        bonus: BonusKind::Damage,
        value: 1.15,
    },
    SynergyRule {
        provider: TowerKind::Plasma,
        affected: &[TowerKind::Tesla, TowerKind::Laser],
        radius: 120.0,
        bonus: BonusKind::Range,
        value: 1.25,
    },
];

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Current hit points.
    pub health: u32,
    /// Hit points the enemy spawned with.
    pub max_health: u32,
    /// Current world position.
    pub position: WorldPoint,
    /// Fraction of the path completed, in `[0, 1]`.
    pub progress: f32,
    /// Speed multiplier currently in force.
    pub speed_multiplier: f32,
    /// Smoothed velocity estimate used for predictive aiming.
    pub velocity: Velocity,
    /// Whether the enemy is currently outside tower sensor range.
    pub stealthed: bool,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies captured in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
///
/// Range and fire interval arrive fully composed: synergy, power-up, and
/// achievement bonuses are already folded in by the world's query layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Level the tower currently holds.
    pub level: TowerLevel,
    /// World position of the tower mount.
    pub position: WorldPoint,
    /// Current mount orientation in radians.
    pub orientation: f32,
    /// Whether the mount is within its weapon's angular tolerance.
    pub aimed: bool,
    /// Target-selection policy the tower applies.
    pub targeting: TargetingMode,
    /// Sensor and weapon range after bonus composition.
    pub effective_range: f32,
    /// Minimum time between shots after bonus composition.
    pub effective_fire_interval: Duration,
    /// Charge fraction in `[0, 1]`; one means ready to fire.
    pub charge: f32,
    /// Total salvage invested across placement and upgrades.
    pub invested: u32,
}

/// Read-only snapshot describing all placed towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a travelling projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Tower that launched the round.
    pub tower: TowerId,
    /// Enemy the round was aimed at, if it still exists.
    pub target: Option<EnemyId>,
    /// Current position along the flight path.
    pub position: WorldPoint,
    /// Predicted point of impact the round flies toward.
    pub impact_point: WorldPoint,
    /// Whether the round completed its flight this tick.
    pub arrived: bool,
}

/// Read-only snapshot describing all in-flight projectiles.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Resolved geometry and wave count for one campaign map.
///
/// The engine never parses authoring formats; catalogs hand it finished
/// waypoint lists.
#[derive(Clone, Debug, PartialEq)]
pub struct MapLayout {
    path: Vec<WorldPoint>,
    spawn_points: Vec<WorldPoint>,
    waves: u32,
}

impl MapLayout {
    /// Creates a layout from an ordered waypoint path, spawn points, and the
    /// number of waves the map runs.
    #[must_use]
    pub fn new(path: Vec<WorldPoint>, spawn_points: Vec<WorldPoint>, waves: u32) -> Self {
        Self {
            path,
            spawn_points,
            waves,
        }
    }

    /// Ordered waypoints from spawn edge to station core.
    #[must_use]
    pub fn path(&self) -> &[WorldPoint] {
        &self.path
    }

    /// Points at which enemies may enter the map.
    #[must_use]
    pub fn spawn_points(&self) -> &[WorldPoint] {
        &self.spawn_points
    }

    /// Number of waves the map runs before completing.
    #[must_use]
    pub const fn waves(&self) -> u32 {
        self.waves
    }

    /// Total walk length of the path in world units.
    #[must_use]
    pub fn total_length(&self) -> f32 {
        self.path
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    /// World position at the provided path fraction; clamps to `[0, 1]`.
    #[must_use]
    pub fn point_at_progress(&self, progress: f32) -> WorldPoint {
        let Some(&first) = self.path.first() else {
            return WorldPoint::ORIGIN;
        };
        let total = self.total_length();
        if total <= 0.0 {
            return first;
        }
        let mut remaining = progress.clamp(0.0, 1.0) * total;
        for pair in self.path.windows(2) {
            let segment = pair[0].distance(pair[1]);
            if remaining <= segment {
                if segment <= 0.0 {
                    return pair[0];
                }
                return pair[0].lerp(pair[1], remaining / segment);
            }
            remaining -= segment;
        }
        *self.path.last().unwrap_or(&first)
    }
}

/// Source of resolved campaign map layouts.
pub trait MapCatalog {
    /// Layout for the provided map, or `None` past the campaign's end.
    fn layout(&self, map: MapIndex) -> Option<&MapLayout>;

    /// Number of maps the campaign runs.
    fn map_count(&self) -> u32;
}

/// Opaque key-value store for achievement progress and map unlocks.
pub trait ProgressStore {
    /// Retrieves the persisted value for a key, if any.
    fn get(&self, key: &str) -> Option<i64>;

    /// Persists a value under a key, replacing any previous value.
    fn set(&mut self, key: &str, value: i64);
}

/// In-memory [`ProgressStore`] used by tests and the headless runner.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) {
        let _ = self.values.insert(key.to_owned(), value);
    }
}
