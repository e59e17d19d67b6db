#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves travelling projectiles at the end of flight.
//!
//! A round that completed its flight counts as a hit only when its target is
//! still alive and currently within the hit radius of the predicted impact
//! point. Everything else resolves as a miss; the world settles the rest.

use station_defence_core::{Command, EnemyView, ProjectileView};

/// Distance within which an arrived round still strikes its target.
pub const HIT_RADIUS: f32 = 12.0;

/// Emits a resolution command for every projectile that finished its flight.
pub fn plan(projectiles: &ProjectileView, enemies: &EnemyView, out_commands: &mut Vec<Command>) {
    for round in projectiles.iter() {
        if !round.arrived {
            continue;
        }
        let hit = round.target.is_some_and(|target| {
            enemies.iter().any(|enemy| {
                enemy.id == target && enemy.position.distance(round.impact_point) <= HIT_RADIUS
            })
        });
        out_commands.push(Command::ResolveProjectile {
            projectile: round.id,
            hit,
        });
    }
}
