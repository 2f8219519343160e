//! Combat System
//!
//! Resolves fights between chasers and the prey they have caught.

use tracing::debug;

use super::index_by_id;
use crate::components::AgentId;
use crate::jubble::Jubble;

/// Let every chaser that is touching its target try to kill it.
///
/// Fights are settled in population order and a kill lands immediately, so a
/// jubble killed earlier in the pass can no longer win its own fight.
/// Returns the identities of this tick's victims.
pub fn combat_system(population: &mut [Jubble]) -> Vec<AgentId> {
    let index = index_by_id(population);
    let mut victims = Vec::new();

    for hunter in 0..population.len() {
        let Some(prey) = population[hunter]
            .agent_goal()
            .and_then(|target| index.get(&target).copied())
        else {
            continue;
        };

        let wins = {
            let (chaser, target) = (&population[hunter], &population[prey]);
            chaser.is_colliding_with(target) && chaser.will_win_against(target)
        };

        if wins {
            population[prey].kill();
            let victim = population[prey].id();
            debug!(
                hunter = population[hunter].id().0,
                victim = victim.0,
                "fight won"
            );
            victims.push(victim);
        }
    }

    victims
}
