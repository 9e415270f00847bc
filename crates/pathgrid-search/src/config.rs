use crate::heuristics::HeuristicKind;

/// Default suboptimality bound `w2` for the multi-heuristic runners.
pub const DEFAULT_BOUND: f64 = 1.5;

/// Heuristic driving the anchor queue of the multi-heuristic runners and
/// the single-queue searches.
pub const ANCHOR_HEURISTIC: HeuristicKind = HeuristicKind::Chebyshev;

/// Tuning for [`Search`](crate::Search).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// `w2`: an inadmissible queue may expand while its minimum key is at
    /// most `bound` times the anchor's. Values below 1 are raised to 1.
    pub bound: f64,
    /// Inadmissible heuristics, one queue each, after the anchor.
    pub heuristics: Vec<HeuristicKind>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bound: DEFAULT_BOUND,
            heuristics: vec![
                HeuristicKind::Euclidean,
                HeuristicKind::SquaredEuclidean,
                HeuristicKind::Manhattan,
                HeuristicKind::Octile,
            ],
        }
    }
}

impl SearchConfig {
    /// Anchor followed by the inadmissible heuristics.
    pub(crate) fn queue_heuristics(&self) -> Vec<HeuristicKind> {
        std::iter::once(ANCHOR_HEURISTIC)
            .chain(self.heuristics.iter().copied())
            .collect()
    }

    pub(crate) fn effective_bound(&self) -> f64 {
        clamp_factor(self.bound)
    }
}

/// A heuristic weight or bound in `[1, f64::MAX]`; NaN becomes 1.
///
/// Keeping it finite keeps `w·h` at the goal (`h = 0`) at zero instead of
/// NaN.
pub(crate) fn clamp_factor(factor: f64) -> f64 {
    if factor.is_nan() { 1.0 } else { factor.clamp(1.0, f64::MAX) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_are_finite_and_at_least_one() {
        assert_eq!(clamp_factor(0.25), 1.0);
        assert_eq!(clamp_factor(f64::NAN), 1.0);
        assert_eq!(clamp_factor(f64::NEG_INFINITY), 1.0);
        assert_eq!(clamp_factor(3.0), 3.0);
        assert_eq!(clamp_factor(f64::INFINITY), f64::MAX);
        assert_eq!(clamp_factor(f64::INFINITY) * 0.0, 0.0);

        let config = SearchConfig {
            bound: f64::INFINITY,
            ..SearchConfig::default()
        };
        assert!(config.effective_bound().is_finite());
        assert_eq!(config.queue_heuristics()[0], ANCHOR_HEURISTIC);
    }
}
