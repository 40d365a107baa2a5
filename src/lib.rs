#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Window-based emotion scoring for segmented narrative text.
//!
//! Lines are grouped into fixed-size [`Unit`]s (tercets by default),
//! overlapping [`Window`]s of units are scored by a pluggable [`Scorer`],
//! and the [`Aggregator`] maps window scores back onto units.
//!
//! ## Stages
//!
//! - [`Segmenter`] - lines → units
//! - [`WindowBuilder`] - units → overlapping windows
//! - [`Scorer`] - window text → [`EmotionVector`]
//! - [`Aggregator`] - window scores → unit scores
//! - [`Pipeline`] - runs the stages in order for one or more scorers
//!
//! Concrete scorers live in `layered-affect-lexicon` (keyword counts) and
//! `layered-affect-entailment` (injected entailment model).
//!
//! ## Example
//!
//! ```
//! use layered_affect::{AffectResult, EmotionSet, EmotionVector, Scorer};
//!
//! struct Constant(EmotionSet);
//!
//! impl Scorer for Constant {
//!     fn name(&self) -> &str {
//!         "constant"
//!     }
//!     fn categories(&self) -> &EmotionSet {
//!         &self.0
//!     }
//!     fn score(&self, _text: &str) -> AffectResult<EmotionVector> {
//!         EmotionVector::from_values(&self.0, vec![0.5])
//!     }
//! }
//!
//! let scorer = Constant(EmotionSet::new(["fear"]).unwrap());
//! let lines: Vec<String> = (0..9).map(|i| format!("verse {}", i)).collect();
//! let (units, windows) = layered_affect::run(&lines, 3, 2, 1, &scorer).unwrap();
//! assert_eq!(units.len(), 3);
//! assert_eq!(windows.len(), 2);
//! ```

mod aggregate;
mod config;
mod display;
mod emotion;
mod errors;
mod pipeline;
mod score_result;
mod scorer;
mod unit;
mod window;

pub use aggregate::{Aggregator, CoverageIndex};
pub use config::{AnalysisConfig, DEFAULT_CATEGORIES};
pub use display::{EmotionBars, ScoreTable};
pub use emotion::{EmotionSet, EmotionVector};
pub use errors::{AffectError, AffectResult};
pub use pipeline::{run, CancelFlag, Pipeline, PipelineRun};
pub use score_result::ScoreResult;
pub use scorer::Scorer;
pub use unit::{segment, Segmenter, TextNormalizer, Unit, WhitespaceNormalizer};
pub use window::{window_count, Window, WindowBuilder, Windows};

#[cfg(test)]
mod tests {
    mod pipeline;
}
