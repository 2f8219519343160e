//! Population stepper
//!
//! Advances a whole generation of jubbles by one tick. Decisions are read
//! from a settled snapshot and written to a clone, so every jubble sees the
//! same world regardless of where it sits in the population.

use rand::Rng;

use crate::components::AgentId;
use crate::config::SimConfig;
use crate::geometry::Point;
use crate::jubble::Jubble;
use crate::render::{Renderer, Sprite};
use crate::systems::{
    combat_system, decomposition_system, index_by_id, movement_system, targeting_system,
};

/// The next generation plus what happened while producing it.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub population: Vec<Jubble>,
    /// Jubbles killed in fights this tick.
    pub victims: Vec<AgentId>,
    pub goals_assigned: u32,
    pub pruned: u32,
}

/// Run one tick over `agents` and return the next generation.
pub fn step_population<R: Rng + ?Sized>(
    mut agents: Vec<Jubble>,
    config: &SimConfig,
    renderer: &mut dyn Renderer,
    rng: &mut R,
) -> StepOutcome {
    for sprite in sprites(&agents, config) {
        renderer.erase_footprint(&sprite.recoloured(config.background));
    }

    let victims = combat_system(&mut agents);

    let mut next = agents.clone();
    let goals_assigned = targeting_system(&agents, &mut next);
    drop(agents);

    let pruned = decomposition_system(&mut next);

    movement_system(&mut next, rng);

    for sprite in sprites(&next, config) {
        renderer.draw_agent(&sprite);
    }

    StepOutcome {
        population: next,
        victims,
        goals_assigned,
        pruned,
    }
}

fn sprites<'a>(population: &'a [Jubble], config: &'a SimConfig) -> impl Iterator<Item = Sprite> + 'a {
    let index = index_by_id(population);
    population.iter().map(move |jubble| {
        let goal_target: Option<Point> = jubble
            .agent_goal()
            .and_then(|target| index.get(&target))
            .map(|&t| population[t].position);
        Sprite::compose(jubble, goal_target, config)
    })
}
