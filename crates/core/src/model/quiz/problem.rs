use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::QuizError;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty tier; controls the numeric range operands are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Advanced,
}

impl Difficulty {
    /// Every tier, in menu order.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Moderate, Self::Advanced];

    /// Inclusive operand range for this tier.
    #[must_use]
    pub fn operand_range(self) -> RangeInclusive<i64> {
        match self {
            Difficulty::Easy => 1..=9,
            Difficulty::Moderate => 10..=99,
            Difficulty::Advanced => 1000..=9999,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Capitalized label for menus.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "moderate" => Ok(Self::Moderate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(QuizError::UnknownDifficulty(s.to_string())),
        }
    }
}

//
// ─── OPERATOR ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    /// Picks add or subtract with equal probability.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Self::Add
        } else {
            Self::Subtract
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }

    #[must_use]
    pub fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
        }
    }
}

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// A single arithmetic problem. The expected result is computed on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    first: i64,
    second: i64,
    operator: Operator,
    expected: i64,
}

impl Problem {
    #[must_use]
    pub fn new(first: i64, second: i64, operator: Operator) -> Self {
        Self {
            first,
            second,
            operator,
            expected: operator.apply(first, second),
        }
    }

    /// Draws both operands uniformly from the tier's range and a random operator.
    pub fn random<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let range = difficulty.operand_range();
        let first = rng.random_range(range.clone());
        let second = rng.random_range(range);
        Self::new(first, second, Operator::random(rng))
    }

    #[must_use]
    pub fn first(&self) -> i64 {
        self.first
    }

    #[must_use]
    pub fn second(&self) -> i64 {
        self.second
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub fn expected(&self) -> i64 {
        self.expected
    }

    /// Question text, e.g. `"5 + 3 ="`.
    #[must_use]
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} =",
            self.first,
            self.operator.symbol(),
            self.second
        )
    }
}
