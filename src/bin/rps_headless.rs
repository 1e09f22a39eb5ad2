//! Runs the automaton without a window and logs species populations.
//!
//! `RUST_LOG=info rps-headless --frames 1200 --width 512 --height 512`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rps_automata::config::{TARGET_FPS, WORLD_WIDTH};
use rps_automata::{Config, FrameScheduler, Grid, NoInput, Renderer, Session, Species};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "rps-headless",
    about = "Step the rock-paper-scissors automaton without a window"
)]
struct Args {
    /// Frames to run before exiting.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// World width in cells.
    #[arg(long, default_value_t = WORLD_WIDTH)]
    width: u32,

    /// World height in cells (defaults to the width).
    #[arg(long)]
    height: Option<u32>,

    /// Target frame rate.
    #[arg(long, default_value_t = TARGET_FPS)]
    fps: u32,

    /// Seed for the randomness field and the initial patches.
    #[arg(long)]
    seed: Option<u64>,

    /// Compute worker threads; 0 lets rayon decide.
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Patches painted per species at startup.
    #[arg(long, default_value_t = 32)]
    patches: usize,

    /// Log populations every this many frames.
    #[arg(long, default_value_t = 60)]
    log_every: u64,
}

/// Logs populations and stops the loop after the last frame.
struct PopulationLog {
    every: u64,
    frames: u64,
    exit: Arc<AtomicBool>,
}

impl Renderer for PopulationLog {
    fn display(&mut self, grid: &Grid, frame: u64) {
        if frame % self.every == 0 {
            let [empty, a, b, c] = grid.population();
            info!(frame, empty, a, b, c, "population");
        }
        if frame + 1 >= self.frames {
            self.exit.store(true, Ordering::SeqCst);
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = Config {
        width: args.width,
        height: args.height.unwrap_or(args.width),
        target_fps: args.fps,
        worker_threads: args.threads,
        seed: Some(seed),
        ..Config::default()
    };

    let mut session = Session::new(&config)?;
    scatter_patches(&mut session, args.patches, seed)?;

    ctrlc::set_handler(interrupt_handler(session.exit_flag()))?;

    let exit = session.exit_flag();
    if args.frames == 0 {
        exit.store(true, Ordering::SeqCst);
    }
    let mut log = PopulationLog {
        every: args.log_every.max(1),
        frames: args.frames,
        exit,
    };

    let mut scheduler = FrameScheduler::new(config.target_fps);
    let ticks = scheduler.run(&mut session, &mut log, &mut NoInput);

    let [empty, a, b, c] = session.engine().population();
    info!(
        ticks,
        generation = session.engine().generation(),
        empty,
        a,
        b,
        c,
        "finished"
    );
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Ctrl-C stops the loop at the top of the next tick instead of killing the process.
fn interrupt_handler(exit: Arc<AtomicBool>) -> impl Fn() + Send + 'static {
    move || {
        info!("interrupt received");
        exit.store(true, Ordering::SeqCst);
    }
}

/// Paint small square patches of each species at random positions.
fn scatter_patches(session: &mut Session, patches: usize, seed: u64) -> Result<()> {
    const RADIUS: usize = 2;

    let engine = session.engine_mut();
    let (width, height) = (engine.width(), engine.height());
    let mut rng = SmallRng::seed_from_u64(seed ^ 0x5EED_CAFE);

    for _ in 0..patches {
        for species in [Species::A, Species::B, Species::C] {
            let row = rng.random_range(0..height);
            let col = rng.random_range(0..width);
            for dr in 0..=2 * RADIUS {
                for dc in 0..=2 * RADIUS {
                    engine.paint((row + dr) % height, (col + dc) % width, species)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_interrupt_stops_loop() {
        let config = Config {
            seed: Some(4),
            worker_threads: 1,
            ..Config::with_world(16, 16)
        };
        let mut session = Session::new(&config).unwrap();
        let mut log = PopulationLog {
            every: 1,
            frames: u64::MAX,
            exit: session.exit_flag(),
        };
        let mut scheduler = FrameScheduler::new(1000);
        let mut sleep = |_: Duration| {};

        assert!(scheduler
            .tick(&mut session, &mut log, &mut NoInput, &mut sleep)
            .is_some());

        interrupt_handler(session.exit_flag())();
        assert!(scheduler
            .tick(&mut session, &mut log, &mut NoInput, &mut sleep)
            .is_none());
        assert_eq!(session.frame(), 1);
    }

    #[test]
    fn test_patches_paint_every_species() {
        let config = Config {
            seed: Some(4),
            worker_threads: 1,
            ..Config::with_world(32, 32)
        };
        let mut session = Session::new(&config).unwrap();
        scatter_patches(&mut session, 2, 4).unwrap();

        // The last patch painted is never overwritten
        let [empty, a, b, c] = session.engine().population();
        assert!(c >= 25);
        assert_eq!(empty + a + b + c, 32 * 32);
    }
}
