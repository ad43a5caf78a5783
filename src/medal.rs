//! End-of-session medals

use serde::{Deserialize, Serialize};

/// Award tiers for a finished session's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Medal {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Medal {
    /// Highest medal the score earns, if any
    pub fn for_score(score: u32) -> Option<Self> {
        match score {
            40.. => Some(Medal::Platinum),
            30..=39 => Some(Medal::Gold),
            20..=29 => Some(Medal::Silver),
            10..=19 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Bronze => "Bronze",
            Medal::Silver => "Silver",
            Medal::Gold => "Gold",
            Medal::Platinum => "Platinum",
        }
    }
}

impl std::fmt::Display for Medal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
