#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Fixture-driven scenario testing for layered-affect.
//!
//! Scenarios are declared in TOML files under `fixtures/`: the input lines,
//! the analysis configuration, a lexicon or a scripted entailment model, and
//! the scores (within a tolerance band) or error kind the run must produce.
//!
//! ## Modules
//!
//! - [`fixture`] - The fixture document format
//! - [`loader`] - Fixture file loading
//! - [`scripted`] - Rule-driven stand-in for an entailment model
//! - [`runner`] - Runs fixtures and reports mismatches
//! - [`errors`] - Error types for the fixture system

pub mod errors;
pub mod fixture;
pub mod loader;
pub mod runner;
pub mod scripted;

pub use errors::{SpecError, SpecResult};
pub use fixture::{AffectFixture, EntailmentRule, Expectation, ExpectedScores, ScorerSpec, DEFAULT_TOLERANCE};
pub use loader::{load_all_fixtures, load_fixture, parse_fixture};
pub use runner::{format_summary, run_fixture, FixtureOutcome, Mismatch};
pub use scripted::ScriptedEntailment;
