#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session orchestration.
//!
//! The controller owns the authoritative world plus every planning system
//! and drives them through a fixed pipeline each frame: movement, clock,
//! targeting, projectile resolution, spawning, then wave-completion checks.
//! Systems never see each other; they only exchange commands and events
//! through the controller, which is what keeps a session replayable from
//! its seed alone.
//!
//! The controller also owns the campaign position (which map, which wave)
//! and mirrors lifetime progress into a [`ProgressStore`] so achievements
//! and counters survive across sessions.

use std::time::Duration;

use station_defence_core::{
    AchievementKind, ActionError, Command, Event, MapCatalog, MapIndex, MapLayout, PowerUpKind,
    ProgressCounter, ProgressStore, TowerId, TowerKind, WaveIndex, WorldPoint,
};
use station_defence_system_movement::MovementTracker;
use station_defence_system_targeting::TargetingEngine;
use station_defence_system_wave_director::WaveDirector;
use station_defence_world::{apply, query, GameSession, SessionConfig};

mod campaign;

pub use campaign::CampaignCatalog;

/// Damage multiplier for mounts built close to the enemy path.
const TILE_BONUS: f32 = 1.1;

/// Distance to the nearest path waypoint that counts as close.
const TILE_BONUS_RADIUS: f32 = 60.0;

/// Where the session currently sits in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No wave has started on the current map yet.
    Idle,
    /// A wave is running.
    WaveActive,
    /// The last wave closed; its aftermath is being settled.
    WaveComplete,
    /// The next wave of the current map is ready to start.
    NextWaveReady,
    /// Every wave of the current map was cleared.
    MapComplete,
    /// The campaign is advancing to the next map.
    NextMapLoading,
    /// The station fell.
    GameOver,
    /// The final map was completed.
    Victory,
}

impl SessionState {
    /// True for states from which no further play is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Read-only summary of the session for adapters.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    /// Lifecycle state of the session.
    pub state: SessionState,
    /// Map the campaign currently sits on.
    pub map: MapIndex,
    /// Wave that is running, or the next one to start.
    pub wave: WaveIndex,
    /// Simulation clock.
    pub clock: Duration,
    /// Salvage banked.
    pub salvage: u32,
    /// Score accumulated.
    pub score: u64,
    /// Station health remaining.
    pub station_health: u32,
    /// Enemies currently alive.
    pub live_enemies: usize,
}

/// Owns the world and the planning systems and drives one session.
pub struct SessionController {
    world: GameSession,
    movement: MovementTracker,
    targeting: TargetingEngine,
    director: WaveDirector,
    catalog: Box<dyn MapCatalog>,
    store: Box<dyn ProgressStore>,
    state: SessionState,
    current_map: MapIndex,
    next_wave: WaveIndex,
    commands: Vec<Command>,
}

impl SessionController {
    /// Creates a controller, restoring lifetime progress from the store.
    #[must_use]
    pub fn new(catalog: Box<dyn MapCatalog>, store: Box<dyn ProgressStore>, seed: u64) -> Self {
        let config = SessionConfig {
            kills: read_counter(store.as_ref(), ProgressCounter::Kills),
            waves_cleared: read_counter(store.as_ref(), ProgressCounter::Waves),
            maps_completed: read_counter(store.as_ref(), ProgressCounter::Maps),
            unlocked_achievements: AchievementKind::ALL
                .into_iter()
                .filter(|kind| store.get(kind.storage_key()) == Some(1))
                .collect(),
            ..SessionConfig::default()
        };
        Self::with_config(catalog, store, seed, config)
    }

    /// Creates a controller from explicit starting conditions.
    #[must_use]
    pub fn with_config(
        catalog: Box<dyn MapCatalog>,
        store: Box<dyn ProgressStore>,
        seed: u64,
        config: SessionConfig,
    ) -> Self {
        Self {
            world: GameSession::new(config),
            movement: MovementTracker::new(),
            targeting: TargetingEngine::new(),
            director: WaveDirector::new(seed),
            catalog,
            store,
            state: SessionState::Idle,
            current_map: MapIndex::FIRST,
            next_wave: WaveIndex::FIRST,
            commands: Vec::new(),
        }
    }

    /// Lifecycle state of the session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The authoritative world, for read-only queries.
    #[must_use]
    pub fn world(&self) -> &GameSession {
        &self.world
    }

    /// The progress store, for read-only inspection.
    #[must_use]
    pub fn store(&self) -> &dyn ProgressStore {
        self.store.as_ref()
    }

    /// Layout of the map the campaign currently sits on.
    #[must_use]
    pub fn current_layout(&self) -> Option<&MapLayout> {
        self.catalog.layout(self.current_map)
    }

    /// Read-only summary of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            map: self.current_map,
            wave: self.next_wave,
            clock: query::clock(&self.world),
            salvage: query::salvage(&self.world),
            score: query::score(&self.world),
            station_health: query::station_health(&self.world),
            live_enemies: query::live_enemies(&self.world),
        }
    }

    /// Starts the next wave of the current map.
    ///
    /// Only [`SessionState::Idle`] and [`SessionState::NextWaveReady`] accept
    /// the call. Terminal states reject with [`ActionError::SessionOver`];
    /// every other state, including the settling states between waves and
    /// maps, rejects with [`ActionError::WaveAlreadyActive`] because the
    /// previous wave has not finished resolving yet.
    pub fn start_wave(&mut self, out_events: &mut Vec<Event>) -> Result<(), ActionError> {
        match self.state {
            SessionState::Idle | SessionState::NextWaveReady => {}
            SessionState::GameOver | SessionState::Victory => return Err(ActionError::SessionOver),
            _ => return Err(ActionError::WaveAlreadyActive),
        }
        let Some(layout) = self.catalog.layout(self.current_map) else {
            return Err(ActionError::SessionOver);
        };
        let plan = self.director.begin(self.current_map, self.next_wave, layout);
        let mark = out_events.len();
        apply(
            &mut self.world,
            Command::BeginWave {
                map: self.current_map,
                wave: self.next_wave,
                total_enemies: plan.total_enemies,
            },
            out_events,
        );
        if let Some(reason) = first_rejection(&out_events[mark..]) {
            self.director.complete();
            return Err(reason);
        }
        self.state = SessionState::WaveActive;
        Ok(())
    }

    /// Places a tower, returning its identifier.
    ///
    /// Mounts within [`TILE_BONUS_RADIUS`] of a path waypoint receive the
    /// overlook damage bonus for their whole lifetime.
    pub fn place_tower(
        &mut self,
        kind: TowerKind,
        position: WorldPoint,
        out_events: &mut Vec<Event>,
    ) -> Result<TowerId, ActionError> {
        let tile_bonus = self
            .catalog
            .layout(self.current_map)
            .map_or(1.0, |layout| tile_bonus_at(layout, position));
        let mark = out_events.len();
        apply(
            &mut self.world,
            Command::PlaceTower {
                kind,
                position,
                tile_bonus,
            },
            out_events,
        );
        for event in &out_events[mark..] {
            match *event {
                Event::TowerPlaced { tower, .. } => return Ok(tower),
                Event::ActionRejected { reason } => return Err(reason),
                _ => {}
            }
        }
        Err(ActionError::InvalidPlacement)
    }

    /// Raises an existing tower's level by one.
    pub fn upgrade_tower(
        &mut self,
        tower: TowerId,
        out_events: &mut Vec<Event>,
    ) -> Result<(), ActionError> {
        let mark = out_events.len();
        apply(&mut self.world, Command::UpgradeTower { tower }, out_events);
        match first_rejection(&out_events[mark..]) {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }

    /// Sells an existing tower, returning the salvage refunded.
    pub fn sell_tower(
        &mut self,
        tower: TowerId,
        out_events: &mut Vec<Event>,
    ) -> Result<u32, ActionError> {
        let mark = out_events.len();
        apply(&mut self.world, Command::SellTower { tower }, out_events);
        for event in &out_events[mark..] {
            match *event {
                Event::TowerSold { refund, .. } => return Ok(refund),
                Event::ActionRejected { reason } => return Err(reason),
                _ => {}
            }
        }
        Err(ActionError::UnknownTower)
    }

    /// Activates a power-up, replacing any active one of its kind.
    pub fn apply_power_up(&mut self, kind: PowerUpKind, out_events: &mut Vec<Event>) {
        apply(&mut self.world, Command::ApplyPowerUp { kind }, out_events);
    }

    /// Advances the session by one frame.
    ///
    /// While a wave is active this runs the full planning pipeline. Between
    /// waves it settles one lifecycle transition per call, so adapters see
    /// every intermediate state.
    pub fn update(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mark = out_events.len();
        match self.state {
            SessionState::WaveActive => self.run_pipeline(dt, out_events),
            SessionState::WaveComplete => self.settle_wave(out_events),
            SessionState::MapComplete => self.settle_map(out_events),
            SessionState::NextMapLoading => self.load_next_map(),
            SessionState::Idle | SessionState::NextWaveReady => {
                // The clock runs between waves so power-ups keep expiring.
                apply(&mut self.world, Command::Tick { dt }, out_events);
            }
            SessionState::GameOver | SessionState::Victory => {}
        }
        self.persist_from(&out_events[mark..]);
    }

    fn run_pipeline(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let Some(layout) = self.catalog.layout(self.current_map).cloned() else {
            return;
        };
        let frame_start = out_events.len();
        let clock = query::clock(&self.world);

        self.movement.plan(
            &layout,
            &query::enemy_view(&self.world),
            clock,
            dt,
            &mut self.commands,
        );
        self.flush(out_events);

        apply(&mut self.world, Command::Tick { dt }, out_events);

        self.targeting.plan(
            &query::tower_view(&self.world),
            &query::enemy_view(&self.world),
            dt,
            &mut self.commands,
        );
        self.flush(out_events);

        station_defence_system_damage::plan(
            &query::projectile_view(&self.world),
            &query::enemy_view(&self.world),
            &mut self.commands,
        );
        self.flush(out_events);

        self.director.tick(dt, &layout, &mut self.commands);
        self.flush(out_events);

        if out_events[frame_start..]
            .iter()
            .any(|event| *event == Event::GameOver)
        {
            self.director.complete();
            self.state = SessionState::GameOver;
            return;
        }

        let fully_spawned = self.director.finished_spawning()
            && query::wave_status(&self.world)
                .is_some_and(|status| status.spawned >= status.total_enemies);
        if fully_spawned && query::live_enemies(&self.world) == 0 {
            apply(&mut self.world, Command::CompleteWave, out_events);
            self.director.complete();
            self.state = SessionState::WaveComplete;
        }
    }

    fn settle_wave(&mut self, out_events: &mut Vec<Event>) {
        let cleared = self.next_wave;
        self.next_wave = WaveIndex::new(cleared.get() + 1);
        let waves_on_map = self
            .catalog
            .layout(self.current_map)
            .map_or(0, MapLayout::waves);
        if self.next_wave.get() <= waves_on_map {
            self.state = SessionState::NextWaveReady;
        } else {
            apply(
                &mut self.world,
                Command::CompleteMap {
                    map: self.current_map,
                },
                out_events,
            );
            self.state = SessionState::MapComplete;
        }
    }

    fn settle_map(&mut self, out_events: &mut Vec<Event>) {
        if self.current_map.get() >= self.catalog.map_count() {
            out_events.push(Event::Victory);
            self.state = SessionState::Victory;
        } else {
            let unlocked = self.current_map.get() + 1;
            self.store.set(&map_unlock_key(unlocked), 1);
            self.state = SessionState::NextMapLoading;
        }
    }

    fn load_next_map(&mut self) {
        self.current_map = MapIndex::new(self.current_map.get() + 1);
        self.next_wave = WaveIndex::FIRST;
        self.state = SessionState::Idle;
        log::info!("campaign advanced to map {}", self.current_map.get());
    }

    fn flush(&mut self, out_events: &mut Vec<Event>) {
        let mut commands = std::mem::take(&mut self.commands);
        for command in commands.drain(..) {
            apply(&mut self.world, command, out_events);
        }
        self.commands = commands;
    }

    /// Mirrors world progress into the store for every event that moves a
    /// lifetime counter.
    fn persist_from(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::EnemyKilled { .. } => {
                    let progress = query::progress(&self.world);
                    self.store
                        .set(ProgressCounter::Kills.storage_key(), progress.kills);
                }
                Event::WaveCompleted { .. } => {
                    let progress = query::progress(&self.world);
                    self.store
                        .set(ProgressCounter::Waves.storage_key(), progress.waves_cleared);
                }
                Event::MapCompleted { .. } => {
                    let progress = query::progress(&self.world);
                    self.store
                        .set(ProgressCounter::Maps.storage_key(), progress.maps_completed);
                }
                Event::AchievementUnlocked { kind } => {
                    self.store.set(kind.storage_key(), 1);
                }
                _ => {}
            }
        }
    }
}

/// Storage key marking a map as reachable from the campaign screen.
#[must_use]
pub fn map_unlock_key(map: u32) -> String {
    format!("map_unlocked.{map}")
}

fn tile_bonus_at(layout: &MapLayout, position: WorldPoint) -> f32 {
    let overlooks_path = layout
        .path()
        .iter()
        .any(|waypoint| waypoint.distance(position) <= TILE_BONUS_RADIUS);
    if overlooks_path {
        TILE_BONUS
    } else {
        1.0
    }
}

fn first_rejection(events: &[Event]) -> Option<ActionError> {
    events.iter().find_map(|event| match event {
        Event::ActionRejected { reason } => Some(*reason),
        _ => None,
    })
}

fn read_counter(store: &dyn ProgressStore, counter: ProgressCounter) -> i64 {
    store.get(counter.storage_key()).unwrap_or(0)
}
