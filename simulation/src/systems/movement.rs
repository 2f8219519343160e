//! Movement System
//!
//! Runs every jubble's own per-tick update.

use rand::Rng;

use super::index_by_id;
use crate::jubble::Jubble;

/// Update every jubble in population order.
///
/// A chaser sees its target as it is at that moment in the pass, so a target
/// earlier in the population has already taken its step this tick. Targets
/// missing from the population are reported as gone.
pub fn movement_system<R: Rng + ?Sized>(population: &mut [Jubble], rng: &mut R) {
    let index = index_by_id(population);

    for i in 0..population.len() {
        let target = population[i]
            .agent_goal()
            .and_then(|target| index.get(&target))
            .map(|&t| population[t].sighting());
        population[i].update(target, rng);
    }
}
