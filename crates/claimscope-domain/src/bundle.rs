//! Bundle module - the terminal output of one analysis run

/// Final result of running the three stages over one paper
///
/// Every field is copied verbatim from the stage that produced it:
/// `claims` from the extractor, `novelty_score` and `reasoning` from the
/// novelty assessor, `summary` from the summarizer. The score is not
/// range-checked and an empty claim list is a valid bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PredictionBundle {
    /// Claims in the order the extractor returned them
    pub claims: Vec<String>,

    /// Novelty score, nominally 1-10
    pub novelty_score: i64,

    /// Assessor's justification for the score
    pub reasoning: String,

    /// Short summary of the paper
    pub summary: String,
}

/// Lowest score on the nominal novelty scale
const MIN_NOVELTY_SCORE: i64 = 1;

/// Highest score on the nominal novelty scale
pub const MAX_NOVELTY_SCORE: i64 = 10;

/// Whether `score` falls inside the nominal 1-10 scale
///
/// Informational only; out-of-range scores are still carried through.
pub fn score_in_nominal_range(score: i64) -> bool {
    (MIN_NOVELTY_SCORE..=MAX_NOVELTY_SCORE).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_range() {
        assert!(score_in_nominal_range(1));
        assert!(score_in_nominal_range(8));
        assert!(score_in_nominal_range(10));
        assert!(!score_in_nominal_range(0));
        assert!(!score_in_nominal_range(11));
        assert!(!score_in_nominal_range(-3));
    }

    #[test]
    fn test_empty_claims_are_allowed() {
        let bundle = PredictionBundle::default();
        assert!(bundle.claims.is_empty());
    }
}
