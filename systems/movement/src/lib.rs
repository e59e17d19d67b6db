#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that advances enemies along the map path.
//!
//! Each tick the tracker walks every live enemy forward proportionally to
//! its effective speed and keeps a smoothed velocity estimate per enemy for
//! predictive aiming. Enemies that reach the end of the path are advanced to
//! progress 1.0 and left for the world to settle as a core breach.

use std::collections::BTreeMap;
use std::time::Duration;

use station_defence_core::{Command, EnemyId, EnemyView, MapLayout, Velocity, WorldPoint};

/// How often the velocity estimator takes a fresh position sample.
const SAMPLE_INTERVAL: Duration = Duration::from_millis(200);

/// Blend factor applied to each fresh velocity sample.
const SMOOTHING: f32 = 0.5;

#[derive(Clone, Copy, Debug)]
struct VelocityEstimator {
    sampled_at: Duration,
    position: WorldPoint,
    velocity: Velocity,
}

impl VelocityEstimator {
    const fn seeded(clock: Duration, position: WorldPoint) -> Self {
        Self {
            sampled_at: clock,
            position,
            velocity: Velocity::ZERO,
        }
    }

    fn observe(&mut self, clock: Duration, position: WorldPoint) -> Velocity {
        let elapsed = clock.saturating_sub(self.sampled_at);
        if elapsed < SAMPLE_INTERVAL {
            return self.velocity;
        }
        let seconds = elapsed.as_secs_f32();
        let raw = Velocity::new(
            (position.x() - self.position.x()) / seconds,
            (position.y() - self.position.y()) / seconds,
        );
        self.velocity = Velocity::new(
            self.velocity.dx() + (raw.dx() - self.velocity.dx()) * SMOOTHING,
            self.velocity.dy() + (raw.dy() - self.velocity.dy()) * SMOOTHING,
        );
        self.sampled_at = clock;
        self.position = position;
        self.velocity
    }
}

/// Advances enemies along the path and estimates their velocities.
#[derive(Debug, Default)]
pub struct MovementTracker {
    estimators: BTreeMap<EnemyId, VelocityEstimator>,
}

impl MovementTracker {
    /// Creates a tracker with no per-enemy history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans one movement step for every live enemy.
    ///
    /// Emits an `AdvanceEnemy` command per enemy; progress clamps at 1.0 so
    /// the world observes exactly one goal-reaching advance per breach.
    pub fn plan(
        &mut self,
        layout: &MapLayout,
        enemies: &EnemyView,
        clock: Duration,
        dt: Duration,
        out_commands: &mut Vec<Command>,
    ) {
        let total_length = layout.total_length();
        if total_length <= 0.0 {
            return;
        }
        for enemy in enemies.iter() {
            let speed = enemy.kind.base_speed() * enemy.speed_multiplier;
            let progress_delta = speed * dt.as_secs_f32() / total_length;
            let progress = (enemy.progress + progress_delta).min(1.0);
            let position = layout.point_at_progress(progress);
            let estimator = self
                .estimators
                .entry(enemy.id)
                .or_insert_with(|| VelocityEstimator::seeded(clock, enemy.position));
            let velocity = estimator.observe(clock, position);
            out_commands.push(Command::AdvanceEnemy {
                enemy: enemy.id,
                position,
                progress,
                velocity,
            });
        }
        self.prune(enemies);
    }

    fn prune(&mut self, enemies: &EnemyView) {
        self.estimators
            .retain(|id, _| enemies.iter().any(|enemy| enemy.id == *id));
    }
}

#[cfg(test)]
mod tests {
    use super::MovementTracker;
    use station_defence_core::{
        Command, EnemyId, EnemyKind, EnemySnapshot, EnemyView, MapLayout, Velocity, WorldPoint,
    };
    use std::time::Duration;

    fn straight_layout() -> MapLayout {
        MapLayout::new(
            vec![WorldPoint::new(0.0, 0.0), WorldPoint::new(100.0, 0.0)],
            vec![WorldPoint::new(0.0, 0.0)],
            3,
        )
    }

    fn snapshot(id: u32, kind: EnemyKind, progress: f32, multiplier: f32) -> EnemySnapshot {
        let position = straight_layout().point_at_progress(progress);
        EnemySnapshot {
            id: EnemyId::new(id),
            kind,
            health: kind.base_health(),
            max_health: kind.base_health(),
            position,
            progress,
            speed_multiplier: multiplier,
            velocity: Velocity::ZERO,
            stealthed: false,
        }
    }

    #[test]
    fn enemies_advance_proportionally_to_speed() {
        let layout = straight_layout();
        let mut tracker = MovementTracker::new();
        let view = EnemyView::from_snapshots(vec![snapshot(0, EnemyKind::Scout, 0.0, 1.0)]);
        let mut commands = Vec::new();
        tracker.plan(
            &layout,
            &view,
            Duration::ZERO,
            Duration::from_millis(500),
            &mut commands,
        );
        match commands.as_slice() {
            [Command::AdvanceEnemy {
                position, progress, ..
            }] => {
                // Scout walks 60 units per second along a 100-unit path.
                assert!((progress - 0.3).abs() < 1e-5);
                assert!((position.x() - 30.0).abs() < 1e-3);
            }
            other => panic!("expected one advance, got {other:?}"),
        }
    }

    #[test]
    fn slowed_enemies_advance_at_the_reduced_rate() {
        let layout = straight_layout();
        let mut tracker = MovementTracker::new();
        let view = EnemyView::from_snapshots(vec![snapshot(0, EnemyKind::Scout, 0.0, 0.25)]);
        let mut commands = Vec::new();
        tracker.plan(
            &layout,
            &view,
            Duration::ZERO,
            Duration::from_millis(500),
            &mut commands,
        );
        match commands.as_slice() {
            [Command::AdvanceEnemy { progress, .. }] => {
                assert!((progress - 0.075).abs() < 1e-5);
            }
            other => panic!("expected one advance, got {other:?}"),
        }
    }

    #[test]
    fn progress_clamps_at_the_path_end() {
        let layout = straight_layout();
        let mut tracker = MovementTracker::new();
        let view = EnemyView::from_snapshots(vec![snapshot(0, EnemyKind::Swarm, 0.99, 1.0)]);
        let mut commands = Vec::new();
        tracker.plan(
            &layout,
            &view,
            Duration::ZERO,
            Duration::from_secs(5),
            &mut commands,
        );
        match commands.as_slice() {
            [Command::AdvanceEnemy {
                progress, position, ..
            }] => {
                assert!((progress - 1.0).abs() < f32::EPSILON);
                assert!((position.x() - 100.0).abs() < 1e-3);
            }
            other => panic!("expected one advance, got {other:?}"),
        }
    }

    #[test]
    fn velocity_estimate_converges_on_the_travel_direction() {
        let layout = straight_layout();
        let mut tracker = MovementTracker::new();
        let dt = Duration::from_millis(250);
        let mut clock = Duration::ZERO;
        let mut progress = 0.0_f32;
        let mut last_velocity = Velocity::ZERO;
        for _ in 0..6 {
            let view = EnemyView::from_snapshots(vec![snapshot(0, EnemyKind::Scout, progress, 1.0)]);
            let mut commands = Vec::new();
            tracker.plan(&layout, &view, clock, dt, &mut commands);
            if let Some(Command::AdvanceEnemy {
                progress: next,
                velocity,
                ..
            }) = commands.first()
            {
                progress = *next;
                last_velocity = *velocity;
            }
            clock += dt;
        }
        // Scout travels along +x at 60 units per second.
        assert!(last_velocity.dx() > 30.0);
        assert!(last_velocity.dy().abs() < 1e-3);
    }

    #[test]
    fn histories_for_dead_enemies_are_dropped() {
        let layout = straight_layout();
        let mut tracker = MovementTracker::new();
        let view = EnemyView::from_snapshots(vec![snapshot(0, EnemyKind::Scout, 0.0, 1.0)]);
        let mut commands = Vec::new();
        tracker.plan(
            &layout,
            &view,
            Duration::ZERO,
            Duration::from_millis(100),
            &mut commands,
        );
        assert_eq!(tracker.estimators.len(), 1);

        let empty = EnemyView::from_snapshots(Vec::new());
        let mut commands = Vec::new();
        tracker.plan(
            &layout,
            &empty,
            Duration::from_millis(100),
            Duration::from_millis(100),
            &mut commands,
        );
        assert!(tracker.estimators.is_empty());
        assert!(commands.is_empty());
    }
}
