//! Round phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a round is currently being played
///
/// Game over and game clear are not resting states: both reset the round
/// immediately, so the engine is always either idle or ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Between rounds: roster and settings may change
    Idle,
    /// Cards are dealt and being played
    Ongoing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Ongoing => write!(f, "ongoing"),
        }
    }
}
