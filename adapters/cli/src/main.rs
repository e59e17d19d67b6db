#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line runner.
//!
//! Plays the stock campaign without a renderer: a simple build policy lines
//! each map's path with towers, then the runner starts waves and pumps the
//! session until the campaign ends or the station falls. Useful for
//! balance passes and for eyeballing the event stream of a given seed.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use station_defence_core::{Event, MemoryStore, TowerKind};
use station_defence_session::{CampaignCatalog, SessionController, SessionState};
use station_defence_world::query;

/// Build order the runner cycles through when it can afford a tower.
const BUILD_ORDER: [TowerKind; 4] = [
    TowerKind::MachineGun,
    TowerKind::Laser,
    TowerKind::Freeze,
    TowerKind::Plasma,
];

/// Runs the station defence campaign headlessly.
#[derive(Debug, Parser)]
#[command(name = "station-defence", version)]
struct Args {
    /// Seed that fixes wave composition, spawn points, and timing.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Stop after this many waves even if the campaign is unfinished.
    #[arg(long, default_value_t = 50)]
    max_waves: u32,

    /// Print every event instead of the notable ones.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.tick_ms == 0 {
        bail!("--tick-ms must be at least 1");
    }

    let mut controller = SessionController::new(
        Box::new(CampaignCatalog::new()),
        Box::new(MemoryStore::new()),
        args.seed,
    );
    let dt = Duration::from_millis(args.tick_ms);
    let mut events = Vec::new();
    let mut waves_started = 0;

    while !controller.state().is_terminal() {
        if matches!(
            controller.state(),
            SessionState::Idle | SessionState::NextWaveReady
        ) {
            if waves_started >= args.max_waves {
                break;
            }
            build_defence(&mut controller, &mut events);
            controller
                .start_wave(&mut events)
                .map_err(|reason| anyhow::anyhow!("failed to start a wave: {reason}"))?;
            waves_started += 1;
        }
        controller.update(dt, &mut events);
        report(&events, args.verbose);
        events.clear();
    }

    let snapshot = controller.snapshot();
    println!(
        "seed {} finished in state {:?}: score {}, salvage {}, station {} hp",
        args.seed, snapshot.state, snapshot.score, snapshot.salvage, snapshot.station_health
    );
    Ok(())
}

/// Spends the bank on towers placed just off the current map's path.
///
/// Positions alternate sides of the path at even spacing; rejected spots
/// (crowded or otherwise invalid) are simply skipped.
fn build_defence(controller: &mut SessionController, out_events: &mut Vec<Event>) {
    let Some(layout) = controller.current_layout().cloned() else {
        return;
    };
    let mut slot = 0;
    loop {
        let kind = BUILD_ORDER[slot % BUILD_ORDER.len()];
        if query::salvage(controller.world()) < kind.base_cost() {
            break;
        }
        let fraction = 0.1 + 0.08 * (slot % 10) as f32;
        let side = if slot % 2 == 0 { 40.0 } else { -40.0 };
        let position = layout.point_at_progress(fraction).offset(0.0, side);
        match controller.place_tower(kind, position, out_events) {
            Ok(tower) => log::debug!("placed {kind:?} as {tower:?} at slot {slot}"),
            Err(reason) => log::debug!("skipped slot {slot}: {reason}"),
        }
        slot += 1;
        if slot >= 40 {
            break;
        }
    }
}

fn report(events: &[Event], verbose: bool) {
    for event in events {
        match event {
            Event::WaveStarted { map, wave, total_enemies } => {
                println!(
                    "wave {} of map {} started with {total_enemies} enemies",
                    wave.get(),
                    map.get()
                );
            }
            Event::WaveCompleted { map, wave, bonus, perfect } => {
                let suffix = if *perfect { " (perfect)" } else { "" };
                println!(
                    "wave {} of map {} cleared for {bonus} salvage{suffix}",
                    wave.get(),
                    map.get()
                );
            }
            Event::MapCompleted { map } => println!("map {} completed", map.get()),
            Event::AchievementUnlocked { kind } => println!("achievement unlocked: {kind:?}"),
            Event::StationDamaged { remaining } => {
                println!("station hit, {remaining} hp remaining");
            }
            Event::GameOver => println!("the station has fallen"),
            Event::Victory => println!("campaign complete"),
            other if verbose => println!("{other:?}"),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_build_order_only_names_affordable_openers() {
        let cheapest = BUILD_ORDER
            .iter()
            .map(|kind| kind.base_cost())
            .min()
            .unwrap_or(0);
        assert!(cheapest <= 300, "openers must fit the starting bank");
    }
}
