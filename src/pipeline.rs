//! Orchestration: Segment → BuildWindows → Score → Aggregate.
//!
//! A [`Pipeline`] holds only its configuration; every run builds its own
//! units and windows, so runs with different parameters may execute
//! concurrently.

use crate::{
    AffectError, AffectResult, Aggregator, AnalysisConfig, EmotionVector, ScoreResult, Scorer,
    Segmenter, TextNormalizer, Unit, Window, WhitespaceNormalizer,
};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that aborts an in-progress run.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    raised: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

/// Everything one scorer produced over one input.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Name of the scorer that produced these results.
    pub scorer: String,
    pub units: Vec<Unit>,
    pub windows: Vec<Window>,
    /// Scores keyed by window id.
    pub window_scores: ScoreResult,
    /// Aggregated scores keyed by unit id.
    pub unit_scores: ScoreResult,
}

/// Configured scoring pipeline.
pub struct Pipeline<N = WhitespaceNormalizer> {
    config: AnalysisConfig,
    segmenter: Segmenter<N>,
    aggregator: Aggregator,
    cancel: Option<CancelFlag>,
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            segmenter: Segmenter::new(),
            aggregator: Aggregator::new(),
            cancel: None,
        }
    }
}

impl<N: TextNormalizer> Pipeline<N> {
    /// Use a custom line normalizer for segmentation.
    pub fn with_normalizer<M: TextNormalizer>(self, normalizer: M) -> Pipeline<M> {
        Pipeline {
            config: self.config,
            segmenter: Segmenter::with_normalizer(normalizer),
            aggregator: self.aggregator,
            cancel: self.cancel,
        }
    }

    /// Abort scoring once `flag` is raised.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every stage for one scorer.
    ///
    /// Validation happens before any scoring. A scoring failure anywhere
    /// aborts the run; no partial result is returned.
    pub fn run<S: AsRef<str>>(&self, lines: &[S], scorer: &dyn Scorer) -> AffectResult<PipelineRun> {
        self.config.validate()?;
        let expected = self.config.emotion_set()?;
        if scorer.categories() != &expected {
            return Err(AffectError::configuration(format!(
                "scorer '{}' scores {:?} but the configuration names {:?}",
                scorer.name(),
                scorer.categories(),
                expected
            )));
        }

        let units = self.segmenter.segment(lines, self.config.group_size)?;
        let windows: Vec<Window> = self.config.window_builder()?.build(&units)?.collect();

        let window_scores = self.score_windows(&windows, scorer)?;
        let unit_scores = self.aggregator.aggregate(&units, &windows, &window_scores)?;

        Ok(PipelineRun {
            scorer: scorer.name().to_string(),
            units,
            windows,
            window_scores,
            unit_scores,
        })
    }

    /// One [`PipelineRun`] per scorer, in the order given.
    pub fn run_all<S: AsRef<str>>(
        &self,
        lines: &[S],
        scorers: &[&dyn Scorer],
    ) -> AffectResult<Vec<PipelineRun>> {
        scorers.iter().map(|scorer| self.run(lines, *scorer)).collect()
    }

    fn score_windows(&self, windows: &[Window], scorer: &dyn Scorer) -> AffectResult<ScoreResult> {
        let score_one = |window: &Window| -> AffectResult<(usize, EmotionVector)> {
            if self.cancel.as_ref().map_or(false, CancelFlag::is_cancelled) {
                return Err(AffectError::Cancelled);
            }
            let vector = scorer.score(window.text())?;
            if vector.categories() != scorer.categories() {
                return Err(AffectError::validation(format!(
                    "scorer '{}' returned categories {:?} for window {}",
                    scorer.name(),
                    vector.categories(),
                    window.id()
                )));
            }
            Ok((window.id(), vector))
        };

        // Both branches collect in window order, not completion order.
        let scored: Vec<(usize, EmotionVector)> = if self.config.parallel {
            windows.par_iter().map(score_one).collect::<AffectResult<_>>()?
        } else {
            windows.iter().map(score_one).collect::<AffectResult<_>>()?
        };

        log::debug!("scorer '{}' scored {} windows", scorer.name(), scored.len());
        ScoreResult::from_entries(scored)
    }
}

/// Run the pipeline with explicit sizes over the scorer's own categories.
///
/// Returns `(unit_scores, window_scores)`.
pub fn run<S: AsRef<str>>(
    lines: &[S],
    group_size: usize,
    window_size: usize,
    stride: usize,
    scorer: &dyn Scorer,
) -> AffectResult<(ScoreResult, ScoreResult)> {
    let config = AnalysisConfig {
        group_size,
        window_size,
        stride,
        categories: scorer.categories().names().to_vec(),
        parallel: false,
    };
    let run = Pipeline::new(config).run(lines, scorer)?;
    Ok((run.unit_scores, run.window_scores))
}
