#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that selects targets, rotates mounts, and gates weapon fire.
//!
//! Per tower and tick: gather in-range candidates (stealthed units are never
//! eligible), score them under the tower's targeting mode with a stable
//! tie-break, predict an impact point from the target's estimated velocity,
//! rotate the mount within its turn-rate limit, and fire only once the mount
//! is aimed and the weapon fully charged.

use std::f32::consts::PI;
use std::time::Duration;

use station_defence_core::{
    Command, DeliveryMode, EnemyId, EnemySnapshot, EnemyView, TargetingMode, TowerKind,
    TowerSnapshot, TowerView, WorldPoint,
};

/// Tower fire-control system that reuses a scratch buffer per tick.
#[derive(Debug, Default)]
pub struct TargetingEngine {
    candidates: Vec<Candidate>,
}

impl TargetingEngine {
    /// Creates a new engine with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans aim, charge, and fire commands for every tower.
    pub fn plan(
        &mut self,
        towers: &TowerView,
        enemies: &EnemyView,
        dt: Duration,
        out_commands: &mut Vec<Command>,
    ) {
        for tower in towers.iter() {
            self.gather_candidates(tower, enemies);
            let Some(best) = self.select(tower.targeting) else {
                continue;
            };
            let aim_point = predict_impact(tower, &best);
            let desired = tower.position.bearing_to(aim_point);
            let (orientation, aimed) = rotate_toward(
                tower.orientation,
                desired,
                tower.kind.turn_rate() * dt.as_secs_f32(),
                tower.kind.aim_tolerance(),
            );
            out_commands.push(Command::AimTower {
                tower: tower.id,
                orientation,
                aimed,
            });

            if tower.kind.requires_full_charge() && tower.charge < 1.0 {
                out_commands.push(Command::ChargeTower {
                    tower: tower.id,
                    progress: tower.charge,
                });
                continue;
            }
            if aimed && tower.charge >= 1.0 {
                out_commands.push(Command::FireTower {
                    tower: tower.id,
                    target: best.id,
                    impact_point: aim_point,
                });
            }
        }
    }

    fn gather_candidates(&mut self, tower: &TowerSnapshot, enemies: &EnemyView) {
        self.candidates.clear();
        for enemy in enemies.iter() {
            if enemy.stealthed {
                continue;
            }
            let distance = tower.position.distance(enemy.position);
            if distance > tower.effective_range {
                continue;
            }
            self.candidates.push(Candidate {
                id: enemy.id,
                snapshot: *enemy,
                distance,
            });
        }
    }

    fn select(&self, mode: TargetingMode) -> Option<Candidate> {
        let mut best: Option<(f32, Candidate)> = None;
        for candidate in &self.candidates {
            let score = match mode {
                TargetingMode::Nearest => -candidate.distance,
                TargetingMode::Furthest => candidate.distance,
                TargetingMode::Strongest => candidate.snapshot.max_health as f32,
                TargetingMode::Weakest => -(candidate.snapshot.health as f32),
                TargetingMode::First => candidate.snapshot.progress,
                TargetingMode::Last => -candidate.snapshot.progress,
            };
            match &mut best {
                // Candidates iterate in ascending id order, so a strict
                // comparison keeps the lowest id on ties.
                Some((best_score, _)) if score <= *best_score => {}
                Some(slot) => *slot = (score, *candidate),
                None => best = Some((score, *candidate)),
            }
        }
        best.map(|(_, candidate)| candidate)
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    id: EnemyId,
    snapshot: EnemySnapshot,
    distance: f32,
}

/// Predicts where the shot should land for the given tower and target.
///
/// Ballistic rounds lead the target by their flight time; guided warheads
/// and instant beams aim at the raw position.
fn predict_impact(tower: &TowerSnapshot, candidate: &Candidate) -> WorldPoint {
    let kind = tower.kind;
    if kind.delivery() != DeliveryMode::Travelling || kind == TowerKind::Missile {
        return candidate.snapshot.position;
    }
    let speed = kind.projectile_speed();
    if speed <= 0.0 {
        return candidate.snapshot.position;
    }
    let travel_time = candidate.distance / speed;
    candidate
        .snapshot
        .velocity
        .project(candidate.snapshot.position, travel_time)
}

/// Rotates `current` toward `desired` by at most `max_step` radians.
///
/// Returns the new orientation and whether it lies within `tolerance` of the
/// desired bearing.
fn rotate_toward(current: f32, desired: f32, max_step: f32, tolerance: f32) -> (f32, bool) {
    let diff = wrap_angle(desired - current);
    let step = diff.clamp(-max_step, max_step);
    let orientation = wrap_angle(current + step);
    let remaining = wrap_angle(desired - orientation);
    (orientation, remaining.abs() <= tolerance)
}

/// Wraps an angle into `(-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = angle % (2.0 * PI);
    if wrapped > PI {
        wrapped -= 2.0 * PI;
    } else if wrapped <= -PI {
        wrapped += 2.0 * PI;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::{wrap_angle, TargetingEngine};
    use station_defence_core::{
        Command, EnemyId, EnemyKind, EnemySnapshot, EnemyView, TargetingMode, TowerId, TowerKind,
        TowerLevel, TowerSnapshot, TowerView, Velocity, WorldPoint,
    };
    use std::f32::consts::FRAC_PI_2;
    use std::time::Duration;

    fn tower(kind: TowerKind, targeting: TargetingMode, orientation: f32, charge: f32) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(1),
            kind,
            level: TowerLevel::ONE,
            position: WorldPoint::ORIGIN,
            orientation,
            aimed: false,
            targeting,
            effective_range: kind.base_range(),
            effective_fire_interval: kind.base_fire_interval(),
            charge,
            invested: kind.base_cost(),
        }
    }

    fn enemy(id: u32, x: f32, health: u32, progress: f32, stealthed: bool) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Fighter,
            health,
            max_health: health,
            position: WorldPoint::new(x, 0.0),
            progress,
            speed_multiplier: 1.0,
            velocity: Velocity::ZERO,
            stealthed,
        }
    }

    fn fired_target(commands: &[Command]) -> Option<EnemyId> {
        commands.iter().find_map(|command| match command {
            Command::FireTower { target, .. } => Some(*target),
            _ => None,
        })
    }

    #[test]
    fn nearest_mode_picks_the_closest_in_range_unit() {
        let mut engine = TargetingEngine::new();
        let towers = TowerView::from_snapshots(vec![tower(
            TowerKind::MachineGun,
            TargetingMode::Nearest,
            0.0,
            1.0,
        )]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(0, 80.0, 60, 0.2, false),
            enemy(1, 30.0, 60, 0.1, false),
            enemy(2, 150.0, 60, 0.3, false),
        ]);
        let mut commands = Vec::new();
        engine.plan(&towers, &enemies, Duration::from_millis(100), &mut commands);
        assert_eq!(fired_target(&commands), Some(EnemyId::new(1)));
    }

    #[test]
    fn furthest_mode_ignores_units_beyond_range() {
        let mut engine = TargetingEngine::new();
        let towers = TowerView::from_snapshots(vec![tower(
            TowerKind::MachineGun,
            TargetingMode::Furthest,
            0.0,
            1.0,
        )]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(0, 30.0, 60, 0.1, false),
            enemy(1, 80.0, 60, 0.2, false),
            // Outside the 120-unit machine-gun range.
            enemy(2, 150.0, 60, 0.3, false),
        ]);
        let mut commands = Vec::new();
        engine.plan(&towers, &enemies, Duration::from_millis(100), &mut commands);
        assert_eq!(fired_target(&commands), Some(EnemyId::new(1)));
    }

    #[test]
    fn first_mode_prefers_the_greatest_path_progress() {
        let mut engine = TargetingEngine::new();
        let towers = TowerView::from_snapshots(vec![tower(
            TowerKind::Laser,
            TargetingMode::First,
            0.0,
            1.0,
        )]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(0, 40.0, 60, 0.5, false),
            enemy(1, 90.0, 60, 0.9, false),
        ]);
        let mut commands = Vec::new();
        engine.plan(&towers, &enemies, Duration::from_millis(100), &mut commands);
        assert_eq!(fired_target(&commands), Some(EnemyId::new(1)));
    }

    #[test]
    fn stealthed_units_are_never_selected() {
        let mut engine = TargetingEngine::new();
        let towers = TowerView::from_snapshots(vec![tower(
            TowerKind::MachineGun,
            TargetingMode::Nearest,
            0.0,
            1.0,
        )]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(0, 10.0, 60, 0.5, true),
            enemy(1, 90.0, 60, 0.2, false),
        ]);
        let mut commands = Vec::new();
        engine.plan(&towers, &enemies, Duration::from_millis(100), &mut commands);
        assert_eq!(fired_target(&commands), Some(EnemyId::new(1)));
    }

    #[test]
    fn equal_scores_resolve_to_the_lowest_id() {
        let mut engine = TargetingEngine::new();
        let towers = TowerView::from_snapshots(vec![tower(
            TowerKind::Plasma,
            TargetingMode::Strongest,
            0.0,
            1.0,
        )]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(7, 50.0, 60, 0.1, false),
            enemy(3, 70.0, 60, 0.2, false),
        ]);
        let mut commands = Vec::new();
        engine.plan(&towers, &enemies, Duration::from_millis(100), &mut commands);
        assert_eq!(fired_target(&commands), Some(EnemyId::new(3)));
    }

    #[test]
    fn rotation_is_limited_by_the_turn_rate() {
        let mut engine = TargetingEngine::new();
        // Target sits at bearing PI/2; machine gun turns 6 rad/s.
        let towers = TowerView::from_snapshots(vec![tower(
            TowerKind::MachineGun,
            TargetingMode::Nearest,
            0.0,
            1.0,
        )]);
        let enemies = EnemyView::from_snapshots(vec![EnemySnapshot {
            position: WorldPoint::new(0.0, 50.0),
            ..enemy(0, 0.0, 60, 0.1, false)
        }]);
        let mut commands = Vec::new();
        engine.plan(&towers, &enemies, Duration::from_millis(50), &mut commands);
        match commands.as_slice() {
            [Command::AimTower {
                orientation, aimed, ..
            }] => {
                assert!((orientation - 0.3).abs() < 1e-4);
                assert!(!aimed);
            }
            other => panic!("expected a lone aim command, got {other:?}"),
        }
    }

    #[test]
    fn aimed_mount_fires_the_same_tick() {
        let mut engine = TargetingEngine::new();
        let towers = TowerView::from_snapshots(vec![tower(
            TowerKind::Laser,
            TargetingMode::First,
            0.0,
            1.0,
        )]);
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 60.0, 60, 0.4, false)]);
        let mut commands = Vec::new();
        engine.plan(&towers, &enemies, Duration::from_millis(100), &mut commands);
        assert!(matches!(commands.first(), Some(Command::AimTower { aimed: true, .. })));
        assert_eq!(fired_target(&commands), Some(EnemyId::new(0)));
    }

    #[test]
    fn charge_weapons_report_progress_instead_of_firing() {
        let mut engine = TargetingEngine::new();
        let towers = TowerView::from_snapshots(vec![tower(
            TowerKind::Kinetic,
            TargetingMode::Strongest,
            0.0,
            0.4,
        )]);
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 60.0, 60, 0.4, false)]);
        let mut commands = Vec::new();
        engine.plan(&towers, &enemies, Duration::from_millis(100), &mut commands);
        assert!(fired_target(&commands).is_none());
        assert!(commands.iter().any(|command| matches!(
            command,
            Command::ChargeTower { progress, .. } if (progress - 0.4).abs() < f32::EPSILON
        )));
    }

    #[test]
    fn ballistic_rounds_lead_a_moving_target() {
        let mut engine = TargetingEngine::new();
        let towers = TowerView::from_snapshots(vec![tower(
            TowerKind::Kinetic,
            TargetingMode::Strongest,
            0.0,
            1.0,
        )]);
        // 65 units away moving +y at 65 units/s; kinetic rounds fly at 650,
        // so the predicted impact sits 6.5 units up the target's track.
        let enemies = EnemyView::from_snapshots(vec![EnemySnapshot {
            velocity: Velocity::new(0.0, 65.0),
            ..enemy(0, 65.0, 300, 0.4, false)
        }]);
        let mut commands = Vec::new();
        engine.plan(&towers, &enemies, Duration::from_millis(100), &mut commands);
        let impact = commands.iter().find_map(|command| match command {
            Command::FireTower { impact_point, .. } => Some(*impact_point),
            _ => None,
        });
        let impact = impact.expect("kinetic at full charge fires");
        assert!((impact.x() - 65.0).abs() < 1e-3);
        assert!((impact.y() - 6.5).abs() < 1e-3);
    }

    #[test]
    fn wrap_angle_stays_within_half_turns() {
        assert!((wrap_angle(3.0 * FRAC_PI_2) + FRAC_PI_2).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * FRAC_PI_2) - FRAC_PI_2).abs() < 1e-5);
    }
}
