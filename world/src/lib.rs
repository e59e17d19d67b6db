#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Station Defence.
//!
//! The [`GameSession`] owns every entity and ledger in the simulation and
//! mutates exclusively through [`apply`]. Systems observe it through the
//! read-only [`query`] module and react with fresh command batches.

use std::collections::BTreeSet;
use std::time::Duration;

use log::debug;
use station_defence_core::{
    AchievementKind, ActionError, BonusKind, Command, DeliveryMode, EnemyId, EnemyKind, Event,
    MapIndex, PowerUpKind, ProgressCounter, ProjectileId, SlowEffect, TargetingMode, TowerId,
    TowerKind, TowerLevel, Velocity, WaveIndex, WorldPoint,
};
use station_defence_system_bonus as bonus;
use station_defence_system_economy as economy;

mod arena;
mod damage;

use arena::{Arena, ArenaKey};

impl ArenaKey for EnemyId {
    fn from_raw(value: u32) -> Self {
        EnemyId::new(value)
    }
}

impl ArenaKey for TowerId {
    fn from_raw(value: u32) -> Self {
        TowerId::new(value)
    }
}

impl ArenaKey for ProjectileId {
    fn from_raw(value: u32) -> Self {
        ProjectileId::new(value)
    }
}

/// Minimum spacing between tower mounts in world units.
const MIN_TOWER_SPACING: f32 = 30.0;

/// Starting conditions and previously persisted progress for a session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Salvage banked before the first wave.
    pub starting_salvage: u32,
    /// Station health the session begins with.
    pub station_health: u32,
    /// Lifetime enemy kills restored from the progress store.
    pub kills: i64,
    /// Lifetime waves cleared restored from the progress store.
    pub waves_cleared: i64,
    /// Lifetime maps completed restored from the progress store.
    pub maps_completed: i64,
    /// Achievements already unlocked in earlier sessions.
    pub unlocked_achievements: Vec<AchievementKind>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_salvage: 300,
            station_health: 20,
            kills: 0,
            waves_cleared: 0,
            maps_completed: 0,
            unlocked_achievements: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    kind: EnemyKind,
    health: u32,
    max_health: u32,
    position: WorldPoint,
    progress: f32,
    speed_multiplier: f32,
    slow_until: Option<Duration>,
    velocity: Velocity,
    stealthed: bool,
    next_phase_at: Option<Duration>,
}

impl Enemy {
    fn spawn(kind: EnemyKind, position: WorldPoint, clock: Duration) -> Self {
        let next_phase_at = kind
            .stealth_cycle()
            .map(|(visible, _)| clock.saturating_add(visible));
        Self {
            kind,
            health: kind.base_health(),
            max_health: kind.base_health(),
            position,
            progress: 0.0,
            speed_multiplier: 1.0,
            slow_until: None,
            velocity: Velocity::ZERO,
            stealthed: false,
            next_phase_at,
        }
    }
}

#[derive(Clone, Debug)]
struct Tower {
    kind: TowerKind,
    level: TowerLevel,
    position: WorldPoint,
    orientation: f32,
    aimed: bool,
    last_fired_at: Option<Duration>,
    invested: u32,
    tile_bonus: f32,
    targeting: TargetingMode,
}

#[derive(Clone, Debug)]
struct Projectile {
    tower: TowerId,
    target: EnemyId,
    position: WorldPoint,
    impact_point: WorldPoint,
    damage: u32,
    speed: f32,
    splash: Option<f32>,
    chain: Option<(f32, f32)>,
    slow: Option<SlowEffect>,
    arrived: bool,
}

#[derive(Clone, Copy, Debug)]
struct PowerUpInstance {
    kind: PowerUpKind,
    expires_at: Duration,
}

#[derive(Clone, Copy, Debug)]
struct WaveState {
    map: MapIndex,
    wave: WaveIndex,
    total: u32,
    spawned: u32,
}

/// Authoritative state of one defence session.
#[derive(Debug)]
pub struct GameSession {
    clock: Duration,
    station_health: u32,
    station_max_health: u32,
    salvage: u32,
    score: u64,
    wave: Option<WaveState>,
    station_hits_this_wave: u32,
    enemies: Arena<EnemyId, Enemy>,
    towers: Arena<TowerId, Tower>,
    projectiles: Arena<ProjectileId, Projectile>,
    power_ups: Vec<PowerUpInstance>,
    kills: i64,
    waves_cleared: i64,
    maps_completed: i64,
    unlocked: BTreeSet<AchievementKind>,
    game_over: bool,
}

impl GameSession {
    /// Creates a session from starting conditions and restored progress.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            clock: Duration::ZERO,
            station_health: config.station_health,
            station_max_health: config.station_health,
            salvage: config.starting_salvage,
            score: 0,
            wave: None,
            station_hits_this_wave: 0,
            enemies: Arena::new(),
            towers: Arena::new(),
            projectiles: Arena::new(),
            power_ups: Vec::new(),
            kills: config.kills,
            waves_cleared: config.waves_cleared,
            maps_completed: config.maps_completed,
            unlocked: config.unlocked_achievements.into_iter().collect(),
            game_over: false,
        }
    }

    fn active_power_ups(&self) -> Vec<PowerUpKind> {
        self.power_ups
            .iter()
            .filter(|instance| instance.expires_at > self.clock)
            .map(|instance| instance.kind)
            .collect()
    }

    fn unlocked_achievements(&self) -> Vec<AchievementKind> {
        self.unlocked.iter().copied().collect()
    }

    fn neighbours_excluding(&self, tower: TowerId) -> Vec<(TowerKind, WorldPoint)> {
        self.towers
            .iter()
            .filter(|(id, _)| *id != tower)
            .map(|(_, other)| (other.kind, other.position))
            .collect()
    }

    fn synergy_for(&self, tower: TowerId) -> bonus::SynergyBonuses {
        let Some(mount) = self.towers.get(tower) else {
            return bonus::SynergyBonuses::default();
        };
        let unlocked = self.unlocked_achievements();
        let master = bonus::achievement_multiplier(&unlocked, BonusKind::SynergyMaster);
        bonus::synergy_bonuses(
            mount.kind,
            mount.position,
            &self.neighbours_excluding(tower),
            master,
        )
    }

    fn effective_fire_interval(&self, tower: TowerId) -> Option<Duration> {
        let mount = self.towers.get(tower)?;
        let synergy = self.synergy_for(tower);
        let speed_power_up =
            bonus::power_up_multiplier(&self.active_power_ups(), PowerUpKind::SpeedBoost);
        Some(bonus::effective_fire_interval(
            mount.kind.base_fire_interval(),
            &synergy,
            speed_power_up,
        ))
    }

    fn composed_damage(&self, tower: TowerId) -> u32 {
        let Some(mount) = self.towers.get(tower) else {
            return 0;
        };
        let active = self.active_power_ups();
        let unlocked = self.unlocked_achievements();
        let factors = bonus::DamageFactors {
            power_up: bonus::power_up_multiplier(&active, PowerUpKind::DamageBoost),
            achievement: bonus::achievement_multiplier(&unlocked, BonusKind::Damage),
            synergy: self.synergy_for(tower),
            tile_bonus: mount.tile_bonus,
        };
        bonus::final_damage(mount.kind.damage_for_level(mount.level), &factors)
    }
}

/// Applies the provided command to the session, mutating state deterministically.
pub fn apply(world: &mut GameSession, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            expire_power_ups(world, out_events);
            update_status_effects(world);
            advance_projectiles(world, dt);
        }
        Command::BeginWave {
            map,
            wave,
            total_enemies,
        } => {
            if world.game_over {
                out_events.push(Event::ActionRejected {
                    reason: ActionError::SessionOver,
                });
            } else if world.wave.is_some() {
                out_events.push(Event::ActionRejected {
                    reason: ActionError::WaveAlreadyActive,
                });
            } else {
                world.wave = Some(WaveState {
                    map,
                    wave,
                    total: total_enemies,
                    spawned: 0,
                });
                world.station_hits_this_wave = 0;
                out_events.push(Event::WaveStarted {
                    map,
                    wave,
                    total_enemies,
                });
            }
        }
        Command::SpawnEnemy { kind, position } => {
            if world.wave.is_none() {
                debug!("dropping spawn of {kind:?}: no wave is active");
                return;
            }
            if let Some(state) = world.wave.as_mut() {
                state.spawned = state.spawned.saturating_add(1);
            }
            let clock = world.clock;
            let enemy = world.enemies.insert(Enemy::spawn(kind, position, clock));
            out_events.push(Event::EnemySpawned {
                enemy,
                kind,
                position,
            });
        }
        Command::AdvanceEnemy {
            enemy,
            position,
            progress,
            velocity,
        } => {
            let mut reached_core = false;
            if let Some(unit) = world.enemies.get_mut(enemy) {
                unit.position = position;
                unit.progress = progress;
                unit.velocity = velocity;
                reached_core = progress >= 1.0;
                out_events.push(Event::EnemyAdvanced {
                    enemy,
                    position,
                    progress,
                });
            }
            if reached_core {
                resolve_core_breach(world, enemy, out_events);
            }
        }
        Command::AimTower {
            tower,
            orientation,
            aimed,
        } => {
            if let Some(mount) = world.towers.get_mut(tower) {
                mount.orientation = orientation;
                mount.aimed = aimed;
            }
        }
        Command::ChargeTower { tower, progress } => {
            if world.towers.contains(tower) {
                out_events.push(Event::TowerCharging { tower, progress });
            }
        }
        Command::FireTower {
            tower,
            target,
            impact_point,
        } => {
            fire_tower(world, tower, target, impact_point, out_events);
        }
        Command::ResolveProjectile { projectile, hit } => {
            resolve_projectile(world, projectile, hit, out_events);
        }
        Command::PlaceTower {
            kind,
            position,
            tile_bonus,
        } => {
            place_tower(world, kind, position, tile_bonus, out_events);
        }
        Command::UpgradeTower { tower } => {
            upgrade_tower(world, tower, out_events);
        }
        Command::SellTower { tower } => {
            let Some(mount) = world.towers.remove(tower) else {
                out_events.push(Event::ActionRejected {
                    reason: ActionError::UnknownTower,
                });
                return;
            };
            let refund = economy::sell_value(mount.invested);
            world.salvage = world.salvage.saturating_add(refund);
            out_events.push(Event::TowerSold { tower, refund });
        }
        Command::ApplyPowerUp { kind } => {
            world.power_ups.retain(|instance| instance.kind != kind);
            let expires_at = world.clock.saturating_add(kind.duration());
            world.power_ups.push(PowerUpInstance { kind, expires_at });
            out_events.push(Event::PowerUpApplied { kind, expires_at });
        }
        Command::CompleteWave => {
            let Some(state) = world.wave.take() else {
                return;
            };
            let perfect = world.station_hits_this_wave == 0;
            let wave_bonus = economy::wave_clear_bonus(state.map, state.wave, perfect);
            world.salvage = world.salvage.saturating_add(wave_bonus);
            world.score = world.score.saturating_add(u64::from(wave_bonus));
            world.waves_cleared = world.waves_cleared.saturating_add(1);
            out_events.push(Event::WaveCompleted {
                map: state.map,
                wave: state.wave,
                bonus: wave_bonus,
                perfect,
            });
            unlock_achievements(world, ProgressCounter::Waves, out_events);
        }
        Command::CompleteMap { map } => {
            world.maps_completed = world.maps_completed.saturating_add(1);
            out_events.push(Event::MapCompleted { map });
            unlock_achievements(world, ProgressCounter::Maps, out_events);
        }
    }
}

fn expire_power_ups(world: &mut GameSession, out_events: &mut Vec<Event>) {
    let clock = world.clock;
    let mut expired = Vec::new();
    world.power_ups.retain(|instance| {
        if instance.expires_at <= clock {
            expired.push(instance.kind);
            false
        } else {
            true
        }
    });
    for kind in expired {
        out_events.push(Event::PowerUpExpired { kind });
    }
}

fn update_status_effects(world: &mut GameSession) {
    let clock = world.clock;
    for (_, enemy) in world.enemies.iter_mut() {
        if let Some(slow_until) = enemy.slow_until {
            if slow_until <= clock {
                enemy.speed_multiplier = 1.0;
                enemy.slow_until = None;
            }
        }
        let Some((visible, hidden)) = enemy.kind.stealth_cycle() else {
            continue;
        };
        while let Some(next_phase_at) = enemy.next_phase_at {
            if next_phase_at > clock {
                break;
            }
            enemy.stealthed = !enemy.stealthed;
            let phase = if enemy.stealthed { hidden } else { visible };
            enemy.next_phase_at = Some(next_phase_at.saturating_add(phase));
        }
    }
}

fn advance_projectiles(world: &mut GameSession, dt: Duration) {
    for (_, projectile) in world.projectiles.iter_mut() {
        if projectile.arrived {
            continue;
        }
        let step = projectile.speed * dt.as_secs_f32();
        let remaining = projectile.position.distance(projectile.impact_point);
        if step >= remaining {
            projectile.position = projectile.impact_point;
            projectile.arrived = true;
        } else if remaining > 0.0 {
            projectile.position = projectile
                .position
                .lerp(projectile.impact_point, step / remaining);
        }
    }
}

fn resolve_core_breach(world: &mut GameSession, enemy: EnemyId, out_events: &mut Vec<Event>) {
    let Some(unit) = world.enemies.remove(enemy) else {
        return;
    };
    out_events.push(Event::EnemyReachedCore {
        enemy,
        kind: unit.kind,
    });
    if world.game_over {
        return;
    }
    if world.active_power_ups().contains(&PowerUpKind::Shield) {
        return;
    }
    world.station_health = world.station_health.saturating_sub(unit.kind.core_damage());
    world.station_hits_this_wave = world.station_hits_this_wave.saturating_add(1);
    out_events.push(Event::StationDamaged {
        remaining: world.station_health,
    });
    if world.station_health == 0 {
        world.game_over = true;
        out_events.push(Event::GameOver);
    }
}

fn fire_tower(
    world: &mut GameSession,
    tower: TowerId,
    target: EnemyId,
    impact_point: WorldPoint,
    out_events: &mut Vec<Event>,
) {
    let Some(mount) = world.towers.get(tower) else {
        return;
    };
    if !world.enemies.contains(target) {
        return;
    }
    let kind = mount.kind;
    let mount_position = mount.position;
    let last_fired_at = mount.last_fired_at;
    if let (Some(interval), Some(fired_at)) = (world.effective_fire_interval(tower), last_fired_at)
    {
        if world.clock.saturating_sub(fired_at) < interval {
            debug!("dropping fire from {tower:?}: cooldown has not elapsed");
            return;
        }
    }
    let damage = world.composed_damage(tower);
    if let Some(mount) = world.towers.get_mut(tower) {
        mount.last_fired_at = Some(world.clock);
    }
    out_events.push(Event::TowerFired {
        tower,
        target,
        delivery: kind.delivery(),
    });
    match kind.delivery() {
        DeliveryMode::Instant => {
            let point = world
                .enemies
                .get(target)
                .map_or(impact_point, |unit| unit.position);
            let spec = damage::ImpactSpec {
                target,
                point,
                damage,
                splash: kind.splash_radius(),
                chain: kind.chain(),
                slow: kind.slow_effect(),
            };
            damage::apply_impact(world, &spec, out_events);
        }
        DeliveryMode::Travelling => {
            let projectile = world.projectiles.insert(Projectile {
                tower,
                target,
                position: mount_position,
                impact_point,
                damage,
                speed: kind.projectile_speed(),
                splash: kind.splash_radius(),
                chain: kind.chain(),
                slow: kind.slow_effect(),
                arrived: false,
            });
            out_events.push(Event::ProjectileLaunched {
                projectile,
                tower,
                target,
            });
        }
    }
}

fn resolve_projectile(
    world: &mut GameSession,
    projectile: ProjectileId,
    hit: bool,
    out_events: &mut Vec<Event>,
) {
    let Some(round) = world.projectiles.remove(projectile) else {
        return;
    };
    if hit && world.enemies.contains(round.target) {
        let spec = damage::ImpactSpec {
            target: round.target,
            point: round.impact_point,
            damage: round.damage,
            splash: round.splash,
            chain: round.chain,
            slow: round.slow,
        };
        damage::apply_impact(world, &spec, out_events);
    } else {
        out_events.push(Event::ProjectileMissed { projectile });
    }
}

fn place_tower(
    world: &mut GameSession,
    kind: TowerKind,
    position: WorldPoint,
    tile_bonus: f32,
    out_events: &mut Vec<Event>,
) {
    if world.game_over {
        out_events.push(Event::ActionRejected {
            reason: ActionError::SessionOver,
        });
        return;
    }
    let crowded = world
        .towers
        .iter()
        .any(|(_, other)| other.position.distance(position) < MIN_TOWER_SPACING);
    if crowded {
        out_events.push(Event::ActionRejected {
            reason: ActionError::InvalidPlacement,
        });
        return;
    }
    let cost = economy::placement_cost(kind);
    if world.salvage < cost {
        out_events.push(Event::ActionRejected {
            reason: ActionError::InsufficientSalvage {
                required: cost,
                available: world.salvage,
            },
        });
        return;
    }
    world.salvage -= cost;
    let tower = world.towers.insert(Tower {
        kind,
        level: TowerLevel::ONE,
        position,
        orientation: 0.0,
        aimed: false,
        last_fired_at: None,
        invested: cost,
        tile_bonus,
        targeting: kind.targeting_mode(),
    });
    out_events.push(Event::TowerPlaced {
        tower,
        kind,
        position,
        cost,
    });
}

fn upgrade_tower(world: &mut GameSession, tower: TowerId, out_events: &mut Vec<Event>) {
    let Some(mount) = world.towers.get(tower) else {
        out_events.push(Event::ActionRejected {
            reason: ActionError::UnknownTower,
        });
        return;
    };
    let Some(next) = mount.level.next() else {
        out_events.push(Event::ActionRejected {
            reason: ActionError::TowerAtMaxLevel,
        });
        return;
    };
    let cost = economy::upgrade_cost(mount.kind, mount.level);
    if world.salvage < cost {
        out_events.push(Event::ActionRejected {
            reason: ActionError::InsufficientSalvage {
                required: cost,
                available: world.salvage,
            },
        });
        return;
    }
    world.salvage -= cost;
    if let Some(mount) = world.towers.get_mut(tower) {
        mount.level = next;
        mount.invested = mount.invested.saturating_add(cost);
    }
    out_events.push(Event::TowerUpgraded {
        tower,
        level: next,
        cost,
    });
}

fn unlock_achievements(
    world: &mut GameSession,
    counter: ProgressCounter,
    out_events: &mut Vec<Event>,
) {
    let value = match counter {
        ProgressCounter::Kills => world.kills,
        ProgressCounter::Waves => world.waves_cleared,
        ProgressCounter::Maps => world.maps_completed,
    };
    for kind in AchievementKind::ALL {
        if kind.counter() != counter || kind.threshold() > value {
            continue;
        }
        if world.unlocked.insert(kind) {
            out_events.push(Event::AchievementUnlocked { kind });
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::time::Duration;

    use station_defence_core::{
        AchievementKind, EnemySnapshot, EnemyView, MapIndex, PowerUpKind, ProjectileSnapshot,
        ProjectileView, TowerSnapshot, TowerView, WaveIndex,
    };
    use station_defence_system_bonus as bonus;

    use super::GameSession;

    /// Simulated time elapsed since the session began.
    #[must_use]
    pub fn clock(world: &GameSession) -> Duration {
        world.clock
    }

    /// Salvage currently banked.
    #[must_use]
    pub fn salvage(world: &GameSession) -> u32 {
        world.salvage
    }

    /// Score accumulated from kills and wave bonuses.
    #[must_use]
    pub fn score(world: &GameSession) -> u64 {
        world.score
    }

    /// Station health remaining.
    #[must_use]
    pub fn station_health(world: &GameSession) -> u32 {
        world.station_health
    }

    /// Station health the session began with.
    #[must_use]
    pub fn station_max_health(world: &GameSession) -> u32 {
        world.station_max_health
    }

    /// Whether the station still stands.
    #[must_use]
    pub fn station_alive(world: &GameSession) -> bool {
        !world.game_over
    }

    /// Bookkeeping for the active wave, if one is open.
    #[must_use]
    pub fn wave_status(world: &GameSession) -> Option<WaveStatus> {
        world.wave.map(|state| WaveStatus {
            map: state.map,
            wave: state.wave,
            total_enemies: state.total,
            spawned: state.spawned,
        })
    }

    /// Number of enemies currently alive.
    #[must_use]
    pub fn live_enemies(world: &GameSession) -> usize {
        world.enemies.len()
    }

    /// Captures a read-only view of all live enemies.
    #[must_use]
    pub fn enemy_view(world: &GameSession) -> EnemyView {
        let snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|(id, enemy)| EnemySnapshot {
                id,
                kind: enemy.kind,
                health: enemy.health,
                max_health: enemy.max_health,
                position: enemy.position,
                progress: enemy.progress,
                speed_multiplier: enemy.speed_multiplier,
                velocity: enemy.velocity,
                stealthed: enemy.stealthed,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of all towers with composed combat stats.
    #[must_use]
    pub fn tower_view(world: &GameSession) -> TowerView {
        let ids: Vec<_> = world.towers.keys().collect();
        let snapshots: Vec<TowerSnapshot> = ids
            .into_iter()
            .filter_map(|id| {
                let mount = world.towers.get(id)?;
                let synergy = world.synergy_for(id);
                let effective_range = bonus::effective_range(mount.kind.base_range(), &synergy);
                let interval = world
                    .effective_fire_interval(id)
                    .unwrap_or_else(|| mount.kind.base_fire_interval());
                let charge = match mount.last_fired_at {
                    None => 1.0,
                    Some(fired_at) => {
                        let elapsed = world.clock.saturating_sub(fired_at).as_secs_f32();
                        (elapsed / interval.as_secs_f32().max(f32::EPSILON)).clamp(0.0, 1.0)
                    }
                };
                Some(TowerSnapshot {
                    id,
                    kind: mount.kind,
                    level: mount.level,
                    position: mount.position,
                    orientation: mount.orientation,
                    aimed: mount.aimed,
                    targeting: mount.targeting,
                    effective_range,
                    effective_fire_interval: interval,
                    charge,
                    invested: mount.invested,
                })
            })
            .collect();
        TowerView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of all in-flight projectiles.
    #[must_use]
    pub fn projectile_view(world: &GameSession) -> ProjectileView {
        let snapshots: Vec<ProjectileSnapshot> = world
            .projectiles
            .iter()
            .map(|(id, round)| ProjectileSnapshot {
                id,
                tower: round.tower,
                target: world.enemies.contains(round.target).then_some(round.target),
                position: round.position,
                impact_point: round.impact_point,
                arrived: round.arrived,
            })
            .collect();
        ProjectileView::from_snapshots(snapshots)
    }

    /// Kinds of power-ups active at the current clock.
    #[must_use]
    pub fn active_power_ups(world: &GameSession) -> Vec<PowerUpKind> {
        world.active_power_ups()
    }

    /// Lifetime progress counters and unlocked achievements.
    #[must_use]
    pub fn progress(world: &GameSession) -> ProgressSnapshot {
        ProgressSnapshot {
            kills: world.kills,
            waves_cleared: world.waves_cleared,
            maps_completed: world.maps_completed,
            unlocked: world.unlocked.iter().copied().collect(),
        }
    }

    /// Bookkeeping for the active wave.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct WaveStatus {
        /// Map the wave belongs to.
        pub map: MapIndex,
        /// Wave ordinal within the map.
        pub wave: WaveIndex,
        /// Number of enemies the wave will spawn in total.
        pub total_enemies: u32,
        /// Enemies spawned so far.
        pub spawned: u32,
    }

    /// Lifetime progress counters and unlocked achievements.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ProgressSnapshot {
        /// Total enemies destroyed across all sessions.
        pub kills: i64,
        /// Total waves cleared across all sessions.
        pub waves_cleared: i64,
        /// Total maps completed across all sessions.
        pub maps_completed: i64,
        /// Achievements unlocked so far, in canonical order.
        pub unlocked: Vec<AchievementKind>,
    }
}
