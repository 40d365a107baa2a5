use layered_affect::{AffectError, AffectResult, EmotionVector, PipelineRun, ScoreResult};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One scored window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WindowRecord {
    pub id: usize,
    pub start_unit: usize,
    pub end_unit: usize,
    pub text: String,
    /// `None` when every intensity is zero.
    pub dominant: Option<String>,
    /// Intensity of `dominant`, `0.0` without one.
    pub confidence: f64,
    pub scores: EmotionVector,
}

/// One unit with its aggregated scores.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UnitRecord {
    pub id: usize,
    pub lines: Vec<String>,
    pub dominant: Option<String>,
    pub scores: EmotionVector,
}

/// A whole run, ready to serialize.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunExport {
    pub scorer: String,
    pub categories: Vec<String>,
    pub windows: Vec<WindowRecord>,
    pub units: Vec<UnitRecord>,
}

fn scores_for<'r>(result: &'r ScoreResult, kind: &str, id: usize) -> AffectResult<&'r EmotionVector> {
    result
        .get(id)
        .ok_or_else(|| AffectError::validation(format!("run has no score for {} {}", kind, id)))
}

fn dominant(vector: &EmotionVector) -> (Option<String>, f64) {
    match vector.dominant() {
        Some((name, value)) => (Some(name.to_string()), value),
        None => (None, 0.0),
    }
}

impl RunExport {
    /// Flatten a run. Every window and unit must have a score.
    pub fn from_run(run: &PipelineRun) -> AffectResult<Self> {
        let windows = run
            .windows
            .iter()
            .map(|window| {
                let scores = scores_for(&run.window_scores, "window", window.id())?;
                let (dominant, confidence) = dominant(scores);
                Ok(WindowRecord {
                    id: window.id(),
                    start_unit: window.start_unit(),
                    end_unit: window.end_unit(),
                    text: window.text().to_string(),
                    dominant,
                    confidence,
                    scores: scores.clone(),
                })
            })
            .collect::<AffectResult<Vec<_>>>()?;

        let units = run
            .units
            .iter()
            .map(|unit| {
                let scores = scores_for(&run.unit_scores, "unit", unit.id())?;
                Ok(UnitRecord {
                    id: unit.id(),
                    lines: unit.lines().to_vec(),
                    dominant: dominant(scores).0,
                    scores: scores.clone(),
                })
            })
            .collect::<AffectResult<Vec<_>>>()?;

        let categories = units
            .first()
            .map(|unit| unit.scores.categories().names().to_vec())
            .unwrap_or_default();

        Ok(Self {
            scorer: run.scorer.clone(),
            categories,
            windows,
            units,
        })
    }

    pub fn to_value(&self) -> AffectResult<Value> {
        serde_json::to_value(self)
            .map_err(|e| AffectError::validation(format!("export does not serialize: {}", e)))
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> AffectResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AffectError::validation(format!("export does not serialize: {}", e)))
    }

    pub fn write_json(&self, path: &Path) -> AffectResult<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| AffectError::io(path.display().to_string(), e.to_string()))
    }
}
