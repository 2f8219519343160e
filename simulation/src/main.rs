//! Jubblution headless runner
//!
//! Usage: `jubblution-simulation [CONFIG_JSON] [TICKS]`

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use anyhow::Context;
use jubblution::runner::FrameRunner;
use jubblution::{SimConfig, SimulationWorld};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_TICKS: u64 = 600;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path))?;
            SimConfig::from_json(&json).with_context(|| format!("loading config {}", path))?
        }
        None => SimConfig::default(),
    };
    let ticks = match args.next() {
        Some(raw) => raw.parse::<u64>().with_context(|| format!("invalid tick count {:?}", raw))?,
        None => DEFAULT_TICKS,
    };

    info!(seed = config.seed, ticks, "Jubblution starting...");
    let report_every = u64::from(config.frame_rate.max(1));
    let mut world = SimulationWorld::new(config)?;

    let start = Instant::now();
    let mut last = None;
    let ran = FrameRunner::new(0).run(&mut world, ticks, |result| {
        if result.tick % report_every == 0 {
            info!(
                tick = result.tick,
                population = result.population,
                alive = result.alive,
                kills = result.kills,
                "progress"
            );
        }
        last = Some(*result);
        ControlFlow::Continue(())
    });
    let elapsed = start.elapsed();

    info!(
        "Run complete: {} ticks in {:?}, {:?} per tick",
        ran,
        elapsed,
        per_tick(elapsed, ran)
    );
    if let Some(result) = last {
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(())
}

/// Mean wall time of one tick; a run of zero ticks counts as one.
fn per_tick(elapsed: Duration, ticks: u64) -> Duration {
    elapsed.div_f64(ticks.max(1) as f64)
}
