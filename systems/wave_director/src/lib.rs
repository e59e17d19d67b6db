#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave scheduling.
//!
//! The director decides what each wave contains and when every unit enters
//! the field. Given a map, a wave index, and a session seed it produces a
//! deterministic stream of [`Command::SpawnEnemy`] batches: the same seed
//! always yields the same composition, the same spawn points, and the same
//! timing, which is what makes recorded sessions replayable.
//!
//! The director never touches authoritative state. It only appends spawn
//! commands to the caller's buffer; the session decides when to apply them.

use std::time::Duration;

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use station_defence_core::{
    Command, EnemyKind, MapIndex, MapLayout, WaveIndex, WorldPoint,
};

/// Shortest allowed gap between consecutive spawns.
const MIN_SPAWN_INTERVAL: Duration = Duration::from_millis(400);

/// Enemy counts for the opening waves of the first map.
const TUTORIAL_TOTALS: [u32; 3] = [4, 6, 8];

/// Lateral scatter applied to units spawned as part of a cluster.
const CLUSTER_JITTER: f32 = 8.0;

/// The headline numbers for a single wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavePlan {
    /// How many units the wave will field in total.
    pub total_enemies: u32,
    /// Pause between consecutive spawn batches.
    pub spawn_interval: Duration,
}

/// Computes the size and pacing of a wave from its map and wave indices.
///
/// The first three waves of the first map use a fixed gentle ramp. Every
/// other wave grows linearly with both indices, and the spawn interval
/// shrinks the same way down to a hard floor.
#[must_use]
pub fn plan_wave(map: MapIndex, wave: WaveIndex) -> WavePlan {
    let wave_steps = wave.get().saturating_sub(1);
    let map_steps = map.get().saturating_sub(1);
    let total_enemies = if map == MapIndex::FIRST && wave.get() <= 3 {
        TUTORIAL_TOTALS[wave_steps as usize]
    } else {
        8 + 2 * wave_steps + 3 * map_steps
    };
    let seconds = 2.0 - 0.1 * wave_steps as f32 - 0.15 * map_steps as f32;
    let spawn_interval = Duration::from_secs_f32(seconds.max(0.0))
        .max(MIN_SPAWN_INTERVAL);
    WavePlan {
        total_enemies,
        spawn_interval,
    }
}

struct ActiveWave {
    map: MapIndex,
    wave: WaveIndex,
    total: u32,
    interval: Duration,
    scheduled: u32,
    accumulator: Duration,
}

/// Deterministic spawn scheduler for one session.
pub struct WaveDirector {
    seed: u64,
    rng: ChaCha8Rng,
    active: Option<ActiveWave>,
}

impl WaveDirector {
    /// Creates a director whose entire output is a function of `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            active: None,
        }
    }

    /// Starts scheduling a wave and returns its plan.
    ///
    /// The stream for a wave depends only on the session seed and the two
    /// indices, never on how earlier waves played out.
    pub fn begin(&mut self, map: MapIndex, wave: WaveIndex, layout: &MapLayout) -> WavePlan {
        let plan = plan_wave(map, wave);
        self.rng = ChaCha8Rng::seed_from_u64(wave_seed(self.seed, map, wave));
        if layout.spawn_points().is_empty() {
            log::warn!(
                "map {} has no spawn points, falling back to the path origin",
                map.get()
            );
        }
        self.active = Some(ActiveWave {
            map,
            wave,
            total: plan.total_enemies,
            interval: plan.spawn_interval,
            // Primed so the first batch leaves on the first tick.
            scheduled: 0,
            accumulator: plan.spawn_interval,
        });
        plan
    }

    /// True when every unit of the active wave has been scheduled, or when
    /// no wave is active at all.
    #[must_use]
    pub fn finished_spawning(&self) -> bool {
        self.active
            .as_ref()
            .map_or(true, |wave| wave.scheduled >= wave.total)
    }

    /// Forgets the active wave.
    pub fn complete(&mut self) {
        self.active = None;
    }

    /// Advances the spawn clock by `dt` and appends due spawn commands.
    pub fn tick(&mut self, dt: Duration, layout: &MapLayout, out_commands: &mut Vec<Command>) {
        let Some(wave) = self.active.as_mut() else {
            return;
        };
        let rng = &mut self.rng;
        wave.accumulator = wave.accumulator.saturating_add(dt);
        while wave.accumulator >= wave.interval && wave.scheduled < wave.total {
            wave.accumulator -= wave.interval;
            let kind = draw_kind(rng, wave.map, wave.wave);
            let remaining = wave.total - wave.scheduled;
            let batch = kind
                .cluster_size_range()
                .map_or(1, |(low, high)| rng.gen_range(low..=high))
                .min(remaining);
            let anchor = spawn_position(rng, layout);
            for _ in 0..batch {
                let position = if batch > 1 {
                    anchor.offset(
                        rng.gen_range(-CLUSTER_JITTER..=CLUSTER_JITTER),
                        rng.gen_range(-CLUSTER_JITTER..=CLUSTER_JITTER),
                    )
                } else {
                    anchor
                };
                out_commands.push(Command::SpawnEnemy { kind, position });
                wave.scheduled += 1;
            }
        }
    }
}

/// Mixes the session seed with the wave coordinates so sibling waves draw
/// from unrelated streams.
fn wave_seed(seed: u64, map: MapIndex, wave: WaveIndex) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(((map.get() as u64) << 32) | wave.get() as u64)
}

/// Draws one enemy kind from the composition table for this wave.
///
/// The tables are banded by an effective difficulty index so later maps
/// reuse the late-wave mixes of earlier ones.
fn draw_kind(rng: &mut ChaCha8Rng, map: MapIndex, wave: WaveIndex) -> EnemyKind {
    let effective = wave.get() + 2 * map.get().saturating_sub(1);
    let (kinds, weights): (&[EnemyKind], &[u32]) = if effective <= 2 {
        (
            &[EnemyKind::Scout, EnemyKind::Swarm, EnemyKind::Fighter],
            &[6, 2, 2],
        )
    } else if effective <= 5 {
        (
            &[
                EnemyKind::Scout,
                EnemyKind::Fighter,
                EnemyKind::Bomber,
                EnemyKind::Stealth,
            ],
            &[3, 4, 2, 1],
        )
    } else if effective <= 8 {
        (
            &[
                EnemyKind::Fighter,
                EnemyKind::Bomber,
                EnemyKind::Destroyer,
                EnemyKind::Shield,
                EnemyKind::Stealth,
            ],
            &[3, 3, 2, 2, 1],
        )
    } else {
        (
            &[
                EnemyKind::Bomber,
                EnemyKind::Destroyer,
                EnemyKind::Titan,
                EnemyKind::Shield,
                EnemyKind::Stealth,
            ],
            &[2, 3, 2, 2, 1],
        )
    };
    let Ok(distribution) = WeightedIndex::new(weights) else {
        return EnemyKind::Scout;
    };
    kinds[distribution.sample(rng)]
}

fn spawn_position(rng: &mut ChaCha8Rng, layout: &MapLayout) -> WorldPoint {
    let points = layout.spawn_points();
    if points.is_empty() {
        return layout.path().first().copied().unwrap_or(WorldPoint::ORIGIN);
    }
    points[rng.gen_range(0..points.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> MapLayout {
        MapLayout::new(
            vec![WorldPoint::new(0.0, 0.0), WorldPoint::new(400.0, 0.0)],
            vec![WorldPoint::new(0.0, 0.0), WorldPoint::new(0.0, 40.0)],
            5,
        )
    }

    fn drain(director: &mut WaveDirector, ticks: u32) -> Vec<Command> {
        let map = layout();
        let mut commands = Vec::new();
        for _ in 0..ticks {
            director.tick(Duration::from_millis(500), &map, &mut commands);
        }
        commands
    }

    #[test]
    fn tutorial_waves_use_the_fixed_ramp() {
        let first = plan_wave(MapIndex::FIRST, WaveIndex::FIRST);
        assert_eq!(first.total_enemies, 4);
        assert_eq!(first.spawn_interval, Duration::from_secs(2));
        let third = plan_wave(MapIndex::FIRST, WaveIndex::new(3));
        assert_eq!(third.total_enemies, 8);
    }

    #[test]
    fn zero_indices_clamp_to_the_opening_plan() {
        let plan = plan_wave(MapIndex::new(0), WaveIndex::new(0));
        assert_eq!(plan.total_enemies, 8);
        assert_eq!(plan.spawn_interval, Duration::from_secs(2));
        let tutorial = plan_wave(MapIndex::FIRST, WaveIndex::new(0));
        assert_eq!(tutorial.total_enemies, 4);
    }

    #[test]
    fn later_waves_grow_linearly() {
        let plan = plan_wave(MapIndex::new(2), WaveIndex::new(4));
        assert_eq!(plan.total_enemies, 8 + 6 + 3);
        let first_of_two = plan_wave(MapIndex::new(2), WaveIndex::FIRST);
        assert_eq!(first_of_two.total_enemies, 11);
    }

    #[test]
    fn spawn_interval_never_drops_below_the_floor() {
        let plan = plan_wave(MapIndex::new(5), WaveIndex::new(20));
        assert_eq!(plan.spawn_interval, MIN_SPAWN_INTERVAL);
    }

    #[test]
    fn the_whole_wave_gets_scheduled() {
        let mut director = WaveDirector::new(11);
        let plan = director.begin(MapIndex::new(2), WaveIndex::new(3), &layout());
        let commands = drain(&mut director, 200);
        assert_eq!(commands.len() as u32, plan.total_enemies);
        assert!(director.finished_spawning());
    }

    #[test]
    fn same_seed_replays_the_same_stream() {
        let mut left = WaveDirector::new(7);
        let mut right = WaveDirector::new(7);
        let _ = left.begin(MapIndex::new(2), WaveIndex::new(2), &layout());
        let _ = right.begin(MapIndex::new(2), WaveIndex::new(2), &layout());
        assert_eq!(drain(&mut left, 60), drain(&mut right, 60));
    }

    #[test]
    fn idle_director_emits_nothing() {
        let mut director = WaveDirector::new(3);
        assert!(drain(&mut director, 10).is_empty());
        assert!(director.finished_spawning());
    }

    #[test]
    fn missing_spawn_points_fall_back_to_the_path_origin() {
        let map = MapLayout::new(
            vec![WorldPoint::new(5.0, 5.0), WorldPoint::new(50.0, 5.0)],
            Vec::new(),
            1,
        );
        let mut director = WaveDirector::new(1);
        let _ = director.begin(MapIndex::FIRST, WaveIndex::FIRST, &map);
        let mut commands = Vec::new();
        director.tick(Duration::from_secs(1), &map, &mut commands);
        let Some(Command::SpawnEnemy { position, .. }) = commands.first() else {
            panic!("expected a spawn command");
        };
        // Lone spawns are never jittered, clusters stay near the origin.
        assert!(position.distance(WorldPoint::new(5.0, 5.0)) <= CLUSTER_JITTER * 1.5);
    }
}
