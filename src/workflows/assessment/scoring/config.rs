use serde::{Deserialize, Serialize};

/// Policy dials for scoring heuristics and report emphasis.
///
/// The free-text fallback (midpoint score with reduced confidence) is a
/// deliberate heuristic, not a law, so it stays parameterized here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Applied to extraction confidence when only free text backs a score.
    pub freetext_fallback_multiplier: f64,
    /// Category scores below this confidence are flagged for human review.
    pub low_confidence_threshold: f64,
    /// Overall confidence at or above this value classifies as High.
    pub high_confidence_floor: f64,
    /// Overall confidence at or above this value classifies as Medium.
    pub medium_confidence_floor: f64,
    /// Category score at or above this marks a vendor strength.
    pub strength_floor: f64,
    /// Category score below this marks a vendor weakness.
    pub weakness_ceiling: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            freetext_fallback_multiplier: 0.5,
            low_confidence_threshold: 0.5,
            high_confidence_floor: 0.75,
            medium_confidence_floor: 0.5,
            strength_floor: 75.0,
            weakness_ceiling: 50.0,
        }
    }
}
