//! Match score type and the lexical/semantic blend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of the combined score taken from the lexical score
pub const LEXICAL_WEIGHT: f64 = 0.4;
/// Share of the combined score taken from the semantic score
pub const SEMANTIC_WEIGHT: f64 = 0.6;

/// A percentage rounded to two decimal places
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchScore(f64);

impl MatchScore {
    pub const ZERO: MatchScore = MatchScore(0.0);

    /// Round a raw percentage; non-finite input becomes zero
    pub fn new(percent: f64) -> Self {
        if percent.is_finite() {
            MatchScore(round2(percent))
        } else {
            MatchScore::ZERO
        }
    }

    /// Scale a ratio in [0, 1] to a percentage
    pub fn from_ratio(ratio: f64) -> Self {
        Self::new(ratio * 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<MatchScore> for f64 {
    fn from(score: MatchScore) -> Self {
        score.0
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Blend lexical and semantic percentages with the fixed 40/60 weights
pub fn combined_score(lexical: f64, semantic: f64) -> f64 {
    round2(lexical * LEXICAL_WEIGHT + semantic * SEMANTIC_WEIGHT)
}

pub struct ScoreCombiner;

impl ScoreCombiner {
    pub fn combine(lexical: MatchScore, semantic: MatchScore) -> MatchScore {
        MatchScore(combined_score(lexical.value(), semantic.value()))
    }
}
