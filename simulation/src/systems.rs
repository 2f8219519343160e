//! Tick phases - each system runs once per tick over the whole population

pub mod combat;
pub mod decomposition;
pub mod movement;
pub mod spawning;
pub mod targeting;

pub use combat::combat_system;
pub use decomposition::decomposition_system;
pub use movement::movement_system;
pub use spawning::bootstrap_system;
pub use targeting::targeting_system;

use std::collections::HashMap;

use crate::components::AgentId;
use crate::jubble::Jubble;

/// Map each identity to its index in `population`.
pub fn index_by_id(population: &[Jubble]) -> HashMap<AgentId, usize> {
    population
        .iter()
        .enumerate()
        .map(|(index, jubble)| (jubble.id(), index))
        .collect()
}
