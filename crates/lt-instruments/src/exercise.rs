//! Option exercise style.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When an option may be exercised on the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExerciseType {
    /// Only at the expiry step.
    #[default]
    European,
    /// At every node up to and including expiry.
    American,
}

impl ExerciseType {
    /// `true` for American exercise.
    pub fn is_american(self) -> bool {
        matches!(self, ExerciseType::American)
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseType::European => write!(f, "European"),
            ExerciseType::American => write!(f, "American"),
        }
    }
}
