//! The pluggable scoring capability.
//!
//! The aggregator and pipeline only ever see `dyn Scorer`; concrete
//! strategies (keyword lexicon, entailment model) live in their own crates.

use crate::{AffectResult, EmotionSet, EmotionVector};
use std::sync::Arc;

/// Maps a text span to a per-emotion intensity vector.
///
/// Given the same text and the same internal parameters, `score` must return
/// the same vector. Implementations are shared across worker threads when a
/// run scores windows in parallel.
pub trait Scorer: Send + Sync {
    /// Name used in logs and exported results.
    fn name(&self) -> &str;

    /// The categories every returned vector covers.
    fn categories(&self) -> &EmotionSet;

    fn score(&self, text: &str) -> AffectResult<EmotionVector>;
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn categories(&self) -> &EmotionSet {
        (**self).categories()
    }

    fn score(&self, text: &str) -> AffectResult<EmotionVector> {
        (**self).score(text)
    }
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn categories(&self) -> &EmotionSet {
        (**self).categories()
    }

    fn score(&self, text: &str) -> AffectResult<EmotionVector> {
        (**self).score(text)
    }
}

impl<S: Scorer + ?Sized> Scorer for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn categories(&self) -> &EmotionSet {
        (**self).categories()
    }

    fn score(&self, text: &str) -> AffectResult<EmotionVector> {
        (**self).score(text)
    }
}
