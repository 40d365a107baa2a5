//! Reconciling window-level scores back onto units.
//!
//! Each unit receives the per-category arithmetic mean of the vectors of
//! every window it belongs to. The unit → windows relation is computed once
//! into a [`CoverageIndex`] rather than rescanned per unit.

use crate::{AffectError, AffectResult, EmotionVector, ScoreResult, Unit, Window};

/// Unit id → ids of the windows that contain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageIndex {
    by_unit: Vec<Vec<usize>>,
}

impl CoverageIndex {
    /// Index `windows` over `unit_count` units.
    ///
    /// Fails when a window names a unit that does not exist or when any unit
    /// is left without a covering window.
    pub fn build(unit_count: usize, windows: &[Window]) -> AffectResult<Self> {
        let mut by_unit = vec![Vec::new(); unit_count];
        for window in windows {
            for &unit_id in window.member_unit_ids() {
                let slot = by_unit.get_mut(unit_id).ok_or_else(|| {
                    AffectError::validation(format!(
                        "window {} references unknown unit {}",
                        window.id(),
                        unit_id
                    ))
                })?;
                slot.push(window.id());
            }
        }

        for covering in &mut by_unit {
            covering.sort_unstable();
            covering.dedup();
        }

        if let Some(unit_id) = by_unit.iter().position(Vec::is_empty) {
            return Err(AffectError::validation(format!(
                "unit {} is not covered by any window",
                unit_id
            )));
        }

        Ok(Self { by_unit })
    }

    /// Window ids covering a unit, ascending.
    pub fn windows_for(&self, unit_id: usize) -> &[usize] {
        self.by_unit
            .get(unit_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn unit_count(&self) -> usize {
        self.by_unit.len()
    }
}

/// Maps window scores to unit scores by per-category averaging.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    /// Produce one vector per unit, keyed by unit id in unit order.
    ///
    /// `window_scores` must hold a vector for every window. The result does
    /// not depend on the order in which window scores were inserted.
    pub fn aggregate(
        &self,
        units: &[Unit],
        windows: &[Window],
        window_scores: &ScoreResult,
    ) -> AffectResult<ScoreResult> {
        let index = CoverageIndex::build(units.len(), windows)?;

        for window in windows {
            if !window_scores.contains(window.id()) {
                return Err(AffectError::validation(format!(
                    "missing score for window {}",
                    window.id()
                )));
            }
        }

        let mut unit_scores = ScoreResult::with_capacity(units.len());
        for unit in units {
            let covering = index.windows_for(unit.id());
            let vectors = covering.iter().filter_map(|id| window_scores.get(*id));
            let mean = EmotionVector::mean(vectors)?.ok_or_else(|| {
                AffectError::validation(format!("unit {} has no window scores", unit.id()))
            })?;
            unit_scores.insert(unit.id(), mean)?;
        }

        log::debug!(
            "aggregated {} window scores onto {} units",
            window_scores.len(),
            unit_scores.len()
        );
        Ok(unit_scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{segment, EmotionSet, WindowBuilder};

    fn fixture(unit_count: usize, size: usize, stride: usize) -> (Vec<Unit>, Vec<Window>) {
        let lines: Vec<String> = (0..unit_count).map(|i| format!("unit {}", i)).collect();
        let units = segment(&lines, 1).unwrap();
        let windows = WindowBuilder::new(size, stride)
            .unwrap()
            .build(&units)
            .unwrap()
            .collect();
        (units, windows)
    }

    fn fear(set: &EmotionSet, value: f64) -> EmotionVector {
        EmotionVector::from_fn(set, |name| Ok(if name == "fear" { value } else { 0.0 })).unwrap()
    }

    #[test]
    fn test_coverage_index() {
        let (_, windows) = fixture(3, 2, 1);
        let index = CoverageIndex::build(3, &windows).unwrap();
        assert_eq!(index.windows_for(0), &[0]);
        assert_eq!(index.windows_for(1), &[0, 1]);
        assert_eq!(index.windows_for(2), &[1]);
        assert!(index.windows_for(7).is_empty());
    }

    #[test]
    fn test_coverage_index_rejects_gaps() {
        let (_, windows) = fixture(3, 1, 1);
        let err = CoverageIndex::build(4, &windows).unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_two_windows_average() {
        let set = EmotionSet::new(["fear", "hope"]).unwrap();
        let (units, windows) = fixture(3, 2, 1);
        let scores = ScoreResult::from_entries(vec![(0, fear(&set, 0.2)), (1, fear(&set, 0.8))]).unwrap();

        let unit_scores = Aggregator::new().aggregate(&units, &windows, &scores).unwrap();
        assert_eq!(unit_scores.ids().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(unit_scores.get(0), scores.get(0));
        assert!((unit_scores.get(1).unwrap().get("fear").unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(unit_scores.get(1).unwrap().get("hope"), Some(0.0));
        assert_eq!(unit_scores.get(2), scores.get(1));
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let set = EmotionSet::new(["fear"]).unwrap();
        let (units, windows) = fixture(5, 3, 1);
        let values = [0.1, 0.7, 0.4];
        let forward =
            ScoreResult::from_entries(values.iter().enumerate().map(|(id, v)| (id, fear(&set, *v)))).unwrap();
        let backward = ScoreResult::from_entries(
            values.iter().enumerate().rev().map(|(id, v)| (id, fear(&set, *v))),
        )
        .unwrap();

        let aggregator = Aggregator::new();
        assert_eq!(
            aggregator.aggregate(&units, &windows, &forward).unwrap(),
            aggregator.aggregate(&units, &windows, &backward).unwrap()
        );
    }

    #[test]
    fn test_unit_windows_are_identity() {
        let set = EmotionSet::new(["fear"]).unwrap();
        let (units, windows) = fixture(4, 1, 1);
        let scores = ScoreResult::from_entries((0..4).map(|id| (id, fear(&set, id as f64 / 4.0)))).unwrap();
        let unit_scores = Aggregator::new().aggregate(&units, &windows, &scores).unwrap();
        assert_eq!(unit_scores, scores);
    }

    #[test]
    fn test_missing_window_score() {
        let set = EmotionSet::new(["fear"]).unwrap();
        let (units, windows) = fixture(3, 2, 1);
        let scores = ScoreResult::from_entries(vec![(0, fear(&set, 0.2))]).unwrap();
        let err = Aggregator::new()
            .aggregate(&units, &windows, &scores)
            .unwrap_err();
        assert_eq!(err, AffectError::validation("missing score for window 1"));
    }
}
