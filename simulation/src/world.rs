//! Simulation World - main orchestrator

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{ConfigError, SimConfig};
use crate::jubble::Jubble;
use crate::render::{NullRenderer, Renderer};
use crate::rng::{create_rng, SimRng};
use crate::stepper::step_population;
use crate::systems;

/// Summary of one tick, for the driver and for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickResult {
    pub tick: u64,
    pub population: u32,
    pub alive: u32,
    pub kills: u32,
    pub goals_assigned: u32,
    pub pruned: u32,
    pub spawned: u32,
}

pub struct SimulationWorld {
    config: Arc<SimConfig>,
    population: Vec<Jubble>,
    rng: SimRng,
    renderer: Box<dyn Renderer>,
    current_tick: u64,
}

impl SimulationWorld {
    /// A world holding a single newborn, as at program start.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config = Arc::new(config);
        let mut rng = create_rng(config.seed);
        let population = vec![Jubble::spawn(&config, &mut rng)];

        Ok(Self {
            config,
            population,
            rng,
            renderer: Box::new(NullRenderer),
            current_tick: 0,
        })
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = renderer;
    }

    /// Run one simulation tick, then top the population up.
    pub fn tick(&mut self) -> TickResult {
        self.current_tick += 1;

        let agents = std::mem::take(&mut self.population);
        let outcome = step_population(agents, &self.config, self.renderer.as_mut(), &mut self.rng);
        self.population = outcome.population;

        for victim in &outcome.victims {
            info!(tick = self.current_tick, victim = victim.0, "jubble killed");
        }

        let spawned = systems::bootstrap_system(&mut self.population, &self.config, &mut self.rng);

        TickResult {
            tick: self.current_tick,
            population: self.population.len() as u32,
            alive: self.alive_count() as u32,
            kills: outcome.victims.len() as u32,
            goals_assigned: outcome.goals_assigned,
            pruned: outcome.pruned,
            spawned: u32::from(spawned.is_some()),
        }
    }

    /// Send every live jubble towards `(x, y)`, as a pointer click does.
    /// Returns how many accepted the goal.
    pub fn click(&mut self, x: f64, y: f64) -> usize {
        let mut accepted = 0;
        for jubble in self.population.iter_mut().filter(|j| j.is_alive()) {
            match jubble.set_coord_goal(x, y) {
                Ok(()) => accepted += 1,
                Err(e) => warn!(id = jubble.id().0, "goal rejected: {}", e),
            }
        }
        accepted
    }

    /// Ticks run so far
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    pub fn population(&self) -> &[Jubble] {
        &self.population
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of jubbles currently alive
    pub fn alive_count(&self) -> usize {
        self.population.iter().filter(|j| j.is_alive()).count()
    }
}
