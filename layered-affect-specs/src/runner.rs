//! Runs a fixture through the pipeline and compares the outcome.

use crate::fixture::{AffectFixture, ExpectedScores, ScorerSpec};
use crate::ScriptedEntailment;
use layered_affect::{AffectResult, Pipeline, PipelineRun, ScoreResult, Scorer};
use layered_affect_entailment::{EntailmentScorer, HypothesisTemplate};
use layered_affect_lexicon::{Lexicon, LexiconScorer};
use std::fmt;

/// A single difference between a fixture's expectation and the run.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    Count {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    Score {
        what: &'static str,
        id: usize,
        category: String,
        expected: f64,
        actual: f64,
    },
    MissingScore {
        what: &'static str,
        id: usize,
        category: String,
    },
    UnexpectedError {
        kind: &'static str,
        message: String,
    },
    MissingError {
        expected: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Count {
                what,
                expected,
                actual,
            } => write!(f, "{} count: expected {}, found {}", what, expected, actual),
            Mismatch::Score {
                what,
                id,
                category,
                expected,
                actual,
            } => write!(
                f,
                "{} {} {}: expected {}, found {}",
                what, id, category, expected, actual
            ),
            Mismatch::MissingScore { what, id, category } => {
                write!(f, "{} {} {}: no score", what, id, category)
            }
            Mismatch::UnexpectedError { kind, message } => {
                write!(f, "run failed ({}): {}", kind, message)
            }
            Mismatch::MissingError { expected } => {
                write!(f, "expected a {} error, run succeeded", expected)
            }
        }
    }
}

/// Result of running one fixture.
#[derive(Debug, Clone)]
pub struct FixtureOutcome {
    pub name: String,
    pub mismatches: Vec<Mismatch>,
}

impl FixtureOutcome {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

fn build_scorer(fixture: &AffectFixture) -> AffectResult<Box<dyn Scorer>> {
    let set = fixture.config.emotion_set()?;
    match &fixture.scorer {
        ScorerSpec::Lexicon { lexicon } => {
            let lexicon = Lexicon::from_pairs(lexicon.iter().map(|(c, s)| (c.as_str(), s)))?;
            Ok(Box::new(LexiconScorer::new(&set, &lexicon)))
        }
        ScorerSpec::Entailment {
            template,
            rules,
            otherwise,
        } => {
            let template = match template {
                Some(template) => HypothesisTemplate::new(template.as_str())?,
                None => HypothesisTemplate::default(),
            };
            let model = ScriptedEntailment::new(template.clone(), rules.clone(), *otherwise);
            Ok(Box::new(EntailmentScorer::new(model, &set).with_template(template)))
        }
    }
}

fn execute(fixture: &AffectFixture) -> AffectResult<PipelineRun> {
    let scorer = build_scorer(fixture)?;
    Pipeline::new(fixture.config.clone()).run(&fixture.lines, scorer.as_ref())
}

fn compare_scores(
    what: &'static str,
    expected: &[ExpectedScores],
    actual: &ScoreResult,
    tolerance: f64,
    mismatches: &mut Vec<Mismatch>,
) {
    for entry in expected {
        for (category, &want) in &entry.scores {
            match actual.get(entry.id).and_then(|vector| vector.get(category)) {
                Some(found) if (found - want).abs() <= tolerance => {}
                Some(found) => mismatches.push(Mismatch::Score {
                    what,
                    id: entry.id,
                    category: category.clone(),
                    expected: want,
                    actual: found,
                }),
                None => mismatches.push(Mismatch::MissingScore {
                    what,
                    id: entry.id,
                    category: category.clone(),
                }),
            }
        }
    }
}

/// Run a fixture and collect every way it diverges from its expectation.
pub fn run_fixture(name: &str, fixture: &AffectFixture) -> FixtureOutcome {
    let expect = &fixture.expect;
    let mut mismatches = Vec::new();

    match (execute(fixture), &expect.error) {
        (Err(err), Some(kind)) if err.kind() == kind.as_str() => {}
        (Err(err), _) => mismatches.push(Mismatch::UnexpectedError {
            kind: err.kind(),
            message: err.to_string(),
        }),
        (Ok(_), Some(kind)) => mismatches.push(Mismatch::MissingError {
            expected: kind.clone(),
        }),
        (Ok(run), None) => {
            let counts = [
                ("unit", expect.units, run.units.len()),
                ("window", expect.windows, run.windows.len()),
            ];
            for (what, expected, actual) in counts {
                if let Some(expected) = expected {
                    if expected != actual {
                        mismatches.push(Mismatch::Count {
                            what,
                            expected,
                            actual,
                        });
                    }
                }
            }
            let tolerance = expect.tolerance();
            compare_scores("unit", &expect.unit_scores, &run.unit_scores, tolerance, &mut mismatches);
            compare_scores("window", &expect.window_scores, &run.window_scores, tolerance, &mut mismatches);
        }
    }

    FixtureOutcome {
        name: name.to_string(),
        mismatches,
    }
}

/// One line per fixture plus one indented line per mismatch.
pub fn format_summary(outcomes: &[FixtureOutcome]) -> String {
    let mut output = String::new();
    for outcome in outcomes {
        let status = if outcome.passed() { "PASS" } else { "FAIL" };
        output.push_str(&format!("{}: {}\n", status, outcome.name));
        for mismatch in &outcome.mismatches {
            output.push_str(&format!("  {}\n", mismatch));
        }
    }
    let passed = outcomes.iter().filter(|o| o.passed()).count();
    output.push_str(&format!("{}/{} fixtures passed", passed, outcomes.len()));
    output
}
