use crate::{ConcurrencyLimit, EntailmentFailure, EntailmentScorer, HypothesisTemplate, Retry};
use layered_affect::{AffectError, AnalysisConfig, Pipeline, ScoreTable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const CANTO: &[&str] = &[
    "Nel mezzo del cammin di nostra vita",
    "mi ritrovai per una selva oscura,",
    "ché la diritta via era smarrita.",
    "Ahi quanto a dir qual era è cosa dura",
    "esta selva selvaggia e aspra e forte",
    "che nel pensier rinova la paura!",
    "Tant' è amara che poco è più morte;",
    "ma per trattar del ben ch'i' vi trovai,",
    "dirò de l'altre cose ch'i' v'ho scorte.",
];

fn has_word(text: &str, word: &str) -> bool {
    text.split_whitespace().any(|w| w == word)
}

/// Canned model: fear follows "selva", hope follows "ben".
fn canned(premise: &str, hypothesis: &str) -> Result<f64, EntailmentFailure> {
    if hypothesis.ends_with("paura.") {
        Ok(if has_word(premise, "selva") { 0.8 } else { 0.2 })
    } else if hypothesis.ends_with("speranza.") {
        Ok(if has_word(premise, "ben") { 0.6 } else { 0.0 })
    } else {
        Err(EntailmentFailure::Failed(format!("unexpected hypothesis: {}", hypothesis)))
    }
}

fn config(parallel: bool) -> AnalysisConfig {
    AnalysisConfig {
        parallel,
        ..AnalysisConfig::with_categories(["paura", "speranza"])
    }
}

fn scorer<E: crate::Entailment>(capability: E) -> EntailmentScorer<E> {
    let set = config(false).emotion_set().unwrap();
    EntailmentScorer::new(capability, &set).with_template(HypothesisTemplate::italian())
}

#[test]
fn windows_are_scored_and_averaged() {
    let run = Pipeline::new(config(false)).run(CANTO, &scorer(canned)).unwrap();

    assert_eq!(run.scorer, "entailment");
    insta::assert_snapshot!(ScoreTable::new(&run.window_scores).with_label("window").to_string(), @r"
    window  paura  speranza
    0       0.80   0.00
    1       0.80   0.60
    ");
    insta::assert_snapshot!(ScoreTable::new(&run.unit_scores).with_label("unit").to_string(), @r"
    unit  paura  speranza
    0     0.80   0.00
    1     0.80   0.30
    2     0.80   0.60
    ");
}

#[test]
fn failing_window_fails_the_run() {
    let broken = |premise: &str, hypothesis: &str| -> Result<f64, EntailmentFailure> {
        if has_word(premise, "ben") {
            Err(EntailmentFailure::Timeout(Duration::from_secs(30)))
        } else {
            canned(premise, hypothesis)
        }
    };

    for parallel in [false, true] {
        let err = Pipeline::new(config(parallel))
            .run(CANTO, &scorer(broken))
            .unwrap_err();
        assert_eq!(err.kind(), "inference");
        assert!(matches!(err, AffectError::Inference { .. }));
    }
}

#[test]
fn retry_wrapper_is_transparent() {
    let calls = AtomicUsize::new(0);
    // every odd call fails, so each first attempt that fails is retried into success
    let flaky = |premise: &str, hypothesis: &str| -> Result<f64, EntailmentFailure> {
        if calls.fetch_add(1, Ordering::SeqCst) % 2 == 1 {
            Err(EntailmentFailure::Unavailable("warming up".into()))
        } else {
            canned(premise, hypothesis)
        }
    };

    let plain = Pipeline::new(config(false)).run(CANTO, &scorer(canned)).unwrap();
    let retried = Pipeline::new(config(false))
        .run(CANTO, &scorer(Retry::new(&flaky, 2, Duration::ZERO)))
        .unwrap();

    assert_eq!(plain.unit_scores, retried.unit_scores);
    assert_eq!(plain.window_scores, retried.window_scores);
}

#[test]
fn concurrency_limit_under_parallel_scoring() {
    let lines: Vec<String> = (0..30)
        .map(|i| if i % 4 == 0 { "una selva".to_string() } else { format!("del ben {}", i) })
        .collect();

    let serial = Pipeline::new(config(false)).run(&lines, &scorer(canned)).unwrap();
    let limited = Pipeline::new(config(true))
        .run(&lines, &scorer(ConcurrencyLimit::new(canned, 2)))
        .unwrap();

    assert_eq!(serial.unit_scores, limited.unit_scores);
}
