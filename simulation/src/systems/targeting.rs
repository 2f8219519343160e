//! Targeting System
//!
//! Live jubbles without prey pick the first jubble they see and are willing
//! to fight.

use tracing::debug;

use crate::jubble::Jubble;

/// Assign chase goals.
///
/// Every decision reads `settled` (the population as it stood before this
/// phase); goals are written into `next`, its clone, so an assignment made
/// for one jubble never influences another's choice in the same tick.
/// Candidates are scanned in population order and the first match wins.
/// Returns the number of goals assigned.
pub fn targeting_system(settled: &[Jubble], next: &mut [Jubble]) -> u32 {
    debug_assert_eq!(settled.len(), next.len());
    let mut assigned = 0;

    for (j, chaser) in settled.iter().enumerate() {
        if !chaser.is_alive() || chaser.has_agent_goal() {
            continue;
        }

        let choice = settled.iter().enumerate().find(|&(oj, prey)| {
            oj != j && prey.is_alive() && chaser.can_detect(prey) && chaser.will_fight_with(prey)
        });

        if let Some((oj, prey)) = choice {
            debug!(chaser = chaser.id().0, prey = prey.id().0, "new chase target");
            next[j].set_agent_goal(next[oj].id());
            assigned += 1;
        }
    }

    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour;
    use crate::components::{AgentId, Goal};
    use crate::config::SimConfig;
    use crate::geometry::Point;
    use std::sync::Arc;

    fn jubble(id: u64, x: f64, y: f64, age: u32, config: &Arc<SimConfig>) -> Jubble {
        let mut jubble = Jubble::new(AgentId(id), Point::new(x, y), Colour::grey(0), Arc::clone(config));
        jubble.age = age;
        jubble
    }

    #[test]
    fn test_first_visible_candidate_wins() {
        let config = Arc::new(SimConfig::default());
        let settled = vec![
            jubble(1, 100.0, 100.0, 80, &config),
            jubble(2, 160.0, 100.0, 10, &config),
            jubble(3, 120.0, 100.0, 5, &config),
        ];
        let mut next = settled.clone();

        assert_eq!(targeting_system(&settled, &mut next), 1);
        assert_eq!(next[0].goal(), Goal::Agent(AgentId(2)));
        // Decisions were read from the untouched snapshot.
        assert!(!settled[0].has_agent_goal());
        // Nobody younger sees anyone they would fight.
        assert_eq!(next[1].goal(), Goal::None);
        assert_eq!(next[2].goal(), Goal::None);
    }

    #[test]
    fn test_skips_dead_busy_and_older() {
        let config = Arc::new(SimConfig::default());
        let mut busy = jubble(1, 100.0, 100.0, 80, &config);
        busy.set_agent_goal(AgentId(42));
        let mut corpse = jubble(2, 120.0, 100.0, 10, &config);
        corpse.kill();
        let elder = jubble(3, 140.0, 100.0, 500, &config);
        let settled = vec![busy, corpse, elder, jubble(4, 60.0, 100.0, 50, &config)];
        let mut next = settled.clone();

        assert_eq!(targeting_system(&settled, &mut next), 0);
        assert_eq!(next[0].goal(), Goal::Agent(AgentId(42)));
        assert_eq!(next[3].goal(), Goal::None);
    }

    #[test]
    fn test_equal_ages_target_each_other() {
        let config = Arc::new(SimConfig::default());
        let mut right = jubble(2, 110.0, 100.0, 100, &config);
        right.angle = std::f64::consts::PI;
        let settled = vec![jubble(1, 100.0, 100.0, 100, &config), right];
        let mut next = settled.clone();

        assert_eq!(targeting_system(&settled, &mut next), 2);
        assert_eq!(next[0].agent_goal(), Some(AgentId(2)));
        assert_eq!(next[1].agent_goal(), Some(AgentId(1)));
    }
}
