//! End-to-end session behaviour through the controller's public surface.

use std::time::Duration;

use station_defence_core::{
    ActionError, Event, MapCatalog, MapIndex, MapLayout, MemoryStore, ProgressCounter,
    ProgressStore, TowerKind, WorldPoint,
};
use station_defence_session::{CampaignCatalog, SessionController, SessionState};
use station_defence_world::SessionConfig;

const FRAME: Duration = Duration::from_millis(100);

fn rich_controller(seed: u64) -> SessionController {
    SessionController::with_config(
        Box::new(CampaignCatalog::new()),
        Box::new(MemoryStore::new()),
        seed,
        SessionConfig {
            starting_salvage: 5_000,
            ..SessionConfig::default()
        },
    )
}

/// Lines the first map's opening corridor with lasers.
fn build_defence(controller: &mut SessionController, events: &mut Vec<Event>) {
    for step in 0..4 {
        let position = WorldPoint::new(60.0 + 80.0 * step as f32, 300.0);
        controller
            .place_tower(TowerKind::Laser, position, events)
            .expect("placement should succeed with a full bank");
    }
}

/// Two single-wave maps with a corridor short enough to settle in seconds.
struct SprintCatalog {
    maps: Vec<MapLayout>,
}

impl SprintCatalog {
    fn new() -> Self {
        let corridor = || {
            MapLayout::new(
                vec![WorldPoint::new(0.0, 0.0), WorldPoint::new(200.0, 0.0)],
                vec![WorldPoint::new(0.0, 0.0)],
                1,
            )
        };
        Self {
            maps: vec![corridor(), corridor()],
        }
    }
}

impl MapCatalog for SprintCatalog {
    fn layout(&self, map: MapIndex) -> Option<&MapLayout> {
        self.maps.get((map.get() as usize).checked_sub(1)?)
    }

    fn map_count(&self) -> u32 {
        self.maps.len() as u32
    }
}

fn sprint_controller(seed: u64) -> SessionController {
    SessionController::new(
        Box::new(SprintCatalog::new()),
        Box::new(MemoryStore::new()),
        seed,
    )
}

fn run_until<F>(controller: &mut SessionController, events: &mut Vec<Event>, done: F)
where
    F: Fn(&SessionController) -> bool,
{
    for _ in 0..4_000 {
        controller.update(FRAME, events);
        if done(controller) {
            return;
        }
    }
    panic!("condition not reached within the frame limit");
}

#[test]
fn a_defended_wave_runs_to_completion() {
    let mut controller = rich_controller(42);
    let mut events = Vec::new();
    build_defence(&mut controller, &mut events);
    controller
        .start_wave(&mut events)
        .expect("the first wave should start from idle");
    assert_eq!(controller.state(), SessionState::WaveActive);

    run_until(&mut controller, &mut events, |c| {
        c.state() != SessionState::WaveActive
    });
    assert_eq!(controller.state(), SessionState::WaveComplete);

    controller.update(FRAME, &mut events);
    assert_eq!(controller.state(), SessionState::NextWaveReady);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::WaveCompleted { .. })));
}

#[test]
fn starting_a_wave_twice_is_rejected() {
    let mut controller = rich_controller(1);
    let mut events = Vec::new();
    controller.start_wave(&mut events).expect("first start");
    assert_eq!(
        controller.start_wave(&mut events),
        Err(ActionError::WaveAlreadyActive)
    );
}

#[test]
fn identical_seeds_replay_identically() {
    let mut left = rich_controller(99);
    let mut right = rich_controller(99);
    let mut left_events = Vec::new();
    let mut right_events = Vec::new();

    build_defence(&mut left, &mut left_events);
    build_defence(&mut right, &mut right_events);
    left.start_wave(&mut left_events).expect("left start");
    right.start_wave(&mut right_events).expect("right start");

    for _ in 0..300 {
        left.update(FRAME, &mut left_events);
        right.update(FRAME, &mut right_events);
    }

    assert_eq!(left_events, right_events);
    assert_eq!(left.snapshot(), right.snapshot());
}

#[test]
fn an_undefended_station_on_one_health_falls() {
    let mut controller = SessionController::with_config(
        Box::new(CampaignCatalog::new()),
        Box::new(MemoryStore::new()),
        7,
        SessionConfig {
            station_health: 1,
            ..SessionConfig::default()
        },
    );
    let mut events = Vec::new();
    controller.start_wave(&mut events).expect("start");

    run_until(&mut controller, &mut events, |c| {
        c.state() == SessionState::GameOver
    });
    assert_eq!(events.iter().filter(|e| **e == Event::GameOver).count(), 1);
    assert_eq!(
        controller.start_wave(&mut events),
        Err(ActionError::SessionOver)
    );
}

#[test]
fn cleared_waves_are_persisted_to_the_store() {
    let mut controller = rich_controller(5);
    let mut events = Vec::new();
    build_defence(&mut controller, &mut events);
    controller.start_wave(&mut events).expect("start");

    run_until(&mut controller, &mut events, |c| {
        c.state() == SessionState::NextWaveReady
    });

    let kills = station_defence_world::query::progress(controller.world()).kills;
    let store = controller.store();
    assert_eq!(store.get(ProgressCounter::Waves.storage_key()), Some(1));
    if kills > 0 {
        assert_eq!(store.get(ProgressCounter::Kills.storage_key()), Some(kills));
    }
}

#[test]
fn restored_counters_seed_the_next_session() {
    let mut store = MemoryStore::new();
    store.set(ProgressCounter::Kills.storage_key(), 24);
    let controller = SessionController::new(
        Box::new(CampaignCatalog::new()),
        Box::new(store),
        3,
    );
    let progress = station_defence_world::query::progress(controller.world());
    assert_eq!(progress.kills, 24);
}

#[test]
fn a_cleared_catalog_ends_in_victory_exactly_once() {
    let mut controller = sprint_controller(7);
    let mut events = Vec::new();

    controller
        .start_wave(&mut events)
        .expect("the first wave should start from idle");
    run_until(&mut controller, &mut events, |c| {
        c.state() == SessionState::WaveComplete
    });

    controller.update(FRAME, &mut events);
    assert_eq!(controller.state(), SessionState::MapComplete);
    controller.update(FRAME, &mut events);
    assert_eq!(controller.state(), SessionState::NextMapLoading);
    controller.update(FRAME, &mut events);
    assert_eq!(controller.state(), SessionState::Idle);

    controller
        .start_wave(&mut events)
        .expect("the second map should start from idle");
    run_until(&mut controller, &mut events, |c| {
        c.state() == SessionState::MapComplete
    });
    run_until(&mut controller, &mut events, |c| {
        c.state() == SessionState::Victory
    });

    assert!(controller.state().is_terminal());
    let victories = events.iter().filter(|e| **e == Event::Victory).count();
    assert_eq!(victories, 1);
    assert_eq!(
        controller.start_wave(&mut events),
        Err(ActionError::SessionOver)
    );
}

#[test]
fn starting_a_wave_while_the_last_one_settles_is_rejected() {
    let mut controller = sprint_controller(13);
    let mut events = Vec::new();

    controller.start_wave(&mut events).expect("start");
    run_until(&mut controller, &mut events, |c| {
        c.state() == SessionState::WaveComplete
    });

    assert_eq!(
        controller.start_wave(&mut events),
        Err(ActionError::WaveAlreadyActive)
    );
    controller.update(FRAME, &mut events);
    assert_eq!(controller.state(), SessionState::MapComplete);
    assert_eq!(
        controller.start_wave(&mut events),
        Err(ActionError::WaveAlreadyActive)
    );
}
