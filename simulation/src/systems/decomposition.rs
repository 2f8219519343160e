//! Decomposition System
//!
//! Removes corpses that have finished rotting.

use tracing::debug;

use crate::jubble::Jubble;

/// Drop every fully decomposed jubble, keeping survivors in order.
/// Returns the number removed.
pub fn decomposition_system(population: &mut Vec<Jubble>) -> u32 {
    let before = population.len();

    population.retain(|jubble| {
        let keep = jubble.should_be_rendered();
        if !keep {
            debug!(id = jubble.id().0, age = jubble.age, "fully decomposed");
        }
        keep
    });

    (before - population.len()) as u32
}
