//! Jubblution Simulation Engine
//!
//! Deterministic, frame-stepped artificial life: circular "jubbles" wander a
//! bounded plane, grow, spot and chase each other, fight, die and decompose.
//! Rendering, windowing and input stay outside; the core only describes what
//! to draw and accepts goal requests.

pub mod colour;
pub mod components;
pub mod config;
pub mod geometry;
pub mod jubble;
pub mod render;
pub mod rng;
pub mod runner;
pub mod stepper;
pub mod systems;
pub mod world;

pub use components::*;
pub use config::{ConfigError, SimConfig};
pub use jubble::{GoalError, Jubble};
pub use stepper::{step_population, StepOutcome};
pub use world::{SimulationWorld, TickResult};

/// A newborn jubble with random identity, position and colour.
pub fn create_agent<R: rand::Rng + ?Sized>(config: &std::sync::Arc<SimConfig>, rng: &mut R) -> Jubble {
    Jubble::spawn(config, rng)
}
