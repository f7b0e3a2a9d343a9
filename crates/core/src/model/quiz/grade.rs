use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter rank for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    APlus,
    A,
    BPlus,
    B,
    CPlus,
    C,
    F,
}

impl Rank {
    /// Maps a total score (0-100) to its rank using fixed, disjoint thresholds.
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            95.. => Self::APlus,
            90..=94 => Self::A,
            85..=89 => Self::BPlus,
            80..=84 => Self::B,
            75..=79 => Self::CPlus,
            70..=74 => Self::C,
            _ => Self::F,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::APlus => "A+",
            Rank::A => "A",
            Rank::BPlus => "B+",
            Rank::B => "B",
            Rank::CPlus => "C+",
            Rank::C => "C",
            Rank::F => "F",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
