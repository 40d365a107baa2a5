//! Scenario fixture format.
//!
//! A fixture is a TOML document describing one pipeline run and what it
//! must produce:
//!
//! ```toml
//! title = "Lexicon share"
//! lines = ["a dark and lost forest"]
//!
//! [config]
//! group_size = 1
//! window_size = 1
//! categories = ["fear"]
//!
//! [scorer]
//! kind = "lexicon"
//! lexicon = { fear = ["dark", "lost"] }
//!
//! [[expect.unit_scores]]
//! id = 0
//! scores = { fear = 0.4 }
//! ```
//!
//! Entailment scenarios replace the model with scripted rules; see
//! [`ScriptedEntailment`](crate::ScriptedEntailment).

use layered_affect::AnalysisConfig;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Tolerance used when a fixture does not set one.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// One parsed scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffectFixture {
    #[serde(default)]
    pub title: Option<String>,
    pub lines: Vec<String>,
    #[serde(default)]
    pub config: AnalysisConfig,
    pub scorer: ScorerSpec,
    #[serde(default)]
    pub expect: Expectation,
}

/// Which scorer the scenario runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorerSpec {
    Lexicon {
        lexicon: BTreeMap<String, Vec<String>>,
    },
    Entailment {
        /// Hypothesis template; the default English one when absent.
        #[serde(default)]
        template: Option<String>,
        #[serde(default)]
        rules: Vec<EntailmentRule>,
        /// Probability when no rule matches.
        #[serde(default)]
        otherwise: f64,
    },
}

/// One scripted answer of the fake entailment model.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntailmentRule {
    pub category: String,
    /// Only applies when the premise contains this word (folded).
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub probability: f64,
    /// Fail the call with this message instead of answering.
    #[serde(default)]
    pub fail: Option<String>,
}

/// What the run must produce.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expectation {
    #[serde(default)]
    pub units: Option<usize>,
    #[serde(default)]
    pub windows: Option<usize>,
    #[serde(default)]
    pub unit_scores: Vec<ExpectedScores>,
    #[serde(default)]
    pub window_scores: Vec<ExpectedScores>,
    /// Allowed absolute difference per intensity.
    #[serde(default)]
    pub tolerance: Option<f64>,
    /// The run must fail with this error kind (`"validation"`, `"inference"`, ...).
    #[serde(default)]
    pub error: Option<String>,
}

impl Expectation {
    pub fn tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }
}

/// Expected intensities of one window or unit. Categories left out are
/// not checked.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedScores {
    pub id: usize,
    pub scores: BTreeMap<String, f64>,
}

impl AffectFixture {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("untitled")
    }
}
