//! Side-by-side reading of two runs over the same text, typically a
//! lexicon run against an entailment run.

use layered_affect::{AffectError, AffectResult, PipelineRun};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DominantComparison {
    pub unit: usize,
    pub left: Option<String>,
    pub right: Option<String>,
    /// Both runs name the same dominant emotion, or both name none.
    pub agrees: bool,
}

/// Dominant emotion of each unit in `left` next to the one in `right`.
pub fn compare_dominant(left: &PipelineRun, right: &PipelineRun) -> AffectResult<Vec<DominantComparison>> {
    if left.unit_scores.len() != right.unit_scores.len() {
        return Err(AffectError::validation(format!(
            "cannot compare '{}' ({} units) with '{}' ({} units)",
            left.scorer,
            left.unit_scores.len(),
            right.scorer,
            right.unit_scores.len()
        )));
    }

    left.unit_scores
        .iter()
        .map(|(unit, left_scores)| {
            let right_scores = right.unit_scores.get(unit).ok_or_else(|| {
                AffectError::validation(format!("'{}' has no score for unit {}", right.scorer, unit))
            })?;
            let left = left_scores.dominant().map(|(name, _)| name.to_string());
            let right = right_scores.dominant().map(|(name, _)| name.to_string());
            Ok(DominantComparison {
                unit,
                agrees: left == right,
                left,
                right,
            })
        })
        .collect()
}

/// Share of agreeing units; `None` for an empty comparison.
pub fn agreement(comparisons: &[DominantComparison]) -> Option<f64> {
    if comparisons.is_empty() {
        return None;
    }
    let agreeing = comparisons.iter().filter(|c| c.agrees).count();
    Some(agreeing as f64 / comparisons.len() as f64)
}
