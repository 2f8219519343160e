//! Spawning System
//!
//! Tops the population up with newborns.

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::components::AgentId;
use crate::config::SimConfig;
use crate::jubble::Jubble;

/// Add one newborn if fewer than `target_population` jubbles are alive.
/// Returns the newborn's identity.
pub fn bootstrap_system<R: Rng + ?Sized>(
    population: &mut Vec<Jubble>,
    config: &Arc<SimConfig>,
    rng: &mut R,
) -> Option<AgentId> {
    let alive = population.iter().filter(|j| j.is_alive()).count();
    if alive >= config.target_population {
        return None;
    }

    let mut newborn = Jubble::spawn(config, rng);
    while population.iter().any(|j| j.id() == newborn.id()) {
        newborn = Jubble::spawn(config, rng);
    }

    let id = newborn.id();
    info!(
        id = id.0,
        x = newborn.position.x,
        y = newborn.position.y,
        alive = alive + 1,
        "jubble born"
    );
    population.push(newborn);
    Some(id)
}
