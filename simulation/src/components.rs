//! Building blocks of a jubble's state
//!
//! Small value types that [`crate::jubble::Jubble`] is assembled from.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

// ============================================================================
// Identity
// ============================================================================

/// Opaque identity of a jubble. Only ever compared for equality; goal
/// references are resolved through it so a pruned target can never dangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl AgentId {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen())
    }
}

// ============================================================================
// Goals
// ============================================================================

/// What a jubble is currently heading for. At most one goal is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Goal {
    None,
    /// A fixed point, dropped once reached.
    Coord(Point),
    /// Another jubble, re-targeted to its live position every tick.
    Agent(AgentId),
}

/// What an agent-goal's target looks like at the moment the chaser updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    pub alive: bool,
    pub position: Point,
}

// ============================================================================
// Biology
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitality {
    Alive,
    /// Dead since the tick the jubble was `age_of_death` ticks old.
    Dead { age_of_death: u32 },
}

impl Vitality {
    pub fn is_alive(&self) -> bool {
        matches!(self, Vitality::Alive)
    }

    pub fn age_of_death(&self) -> Option<u32> {
        match self {
            Vitality::Alive => None,
            Vitality::Dead { age_of_death } => Some(*age_of_death),
        }
    }
}
