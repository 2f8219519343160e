//! Frame Runner - drives a world tick by tick at a fixed frame rate

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;

use crate::world::{SimulationWorld, TickResult};

/// Lets another party end a run between two ticks.
///
/// A stop requested while no run is in progress cancels the next run
/// before its first tick.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Runs a world on the calling thread, one tick per frame.
pub struct FrameRunner {
    is_running: bool,
    stop_requested: Arc<AtomicBool>,
    frame_interval: Option<Duration>,
}

impl FrameRunner {
    /// `frame_rate` of 0 runs ticks back to back.
    pub fn new(frame_rate: u32) -> Self {
        let frame_interval =
            (frame_rate > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(frame_rate)));
        Self {
            is_running: false,
            stop_requested: Arc::new(AtomicBool::new(false)),
            frame_interval,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stop_requested))
    }

    /// Run up to `max_ticks` ticks, handing each result to `callback`.
    ///
    /// The run ends early when the callback breaks or a [`StopHandle`] is
    /// used. Returns the number of ticks run.
    pub fn run<F>(&mut self, world: &mut SimulationWorld, max_ticks: u64, mut callback: F) -> u64
    where
        F: FnMut(&TickResult) -> ControlFlow<()>,
    {
        info!(max_ticks, paced = self.frame_interval.is_some(), "starting frame runner");
        self.is_running = true;

        let mut ticks = 0;
        // Consuming the request here means each stop ends exactly one run.
        while ticks < max_ticks && !self.stop_requested.swap(false, Ordering::Relaxed) {
            let frame_start = Instant::now();
            let result = world.tick();
            ticks += 1;

            if callback(&result).is_break() {
                break;
            }

            if let Some(interval) = self.frame_interval {
                thread::sleep(interval.saturating_sub(frame_start.elapsed()));
            }
        }

        self.is_running = false;
        info!(ticks, "frame runner stopped");
        ticks
    }

    /// Check if a run is in progress
    pub fn is_running(&self) -> bool {
        self.is_running
    }
}
