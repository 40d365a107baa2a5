use crate::{agreement, compare_dominant, RunExport};
use layered_affect::{AffectResult, AnalysisConfig, EmotionSet, EmotionVector, Pipeline, PipelineRun, Scorer};

/// 1.0 for each category named in the text; `swap` reports fear as hope and
/// hope as fear.
struct MentionScorer {
    name: &'static str,
    set: EmotionSet,
    swap: bool,
}

impl MentionScorer {
    fn new(name: &'static str, swap: bool) -> Self {
        Self {
            name,
            set: EmotionSet::new(["fear", "hope"]).unwrap(),
            swap,
        }
    }
}

impl Scorer for MentionScorer {
    fn name(&self) -> &str {
        self.name
    }

    fn categories(&self) -> &EmotionSet {
        &self.set
    }

    fn score(&self, text: &str) -> AffectResult<EmotionVector> {
        EmotionVector::from_fn(&self.set, |category| {
            let looked_for = match (self.swap, category) {
                (true, "fear") => "hope",
                (true, "hope") => "fear",
                (_, other) => other,
            };
            Ok(if text.split_whitespace().any(|w| w == looked_for) { 1.0 } else { 0.0 })
        })
    }
}

fn run(lines: &[&str], scorer: &MentionScorer) -> PipelineRun {
    let config = AnalysisConfig {
        group_size: 1,
        window_size: 2,
        stride: 1,
        parallel: false,
        ..AnalysisConfig::with_categories(["fear", "hope"])
    };
    Pipeline::new(config).run(lines, scorer).unwrap()
}

const LINES: &[&str] = &["fear", "x", "hope"];

#[test]
fn records_follow_the_run() {
    let export = RunExport::from_run(&run(LINES, &MentionScorer::new("mention", false))).unwrap();

    assert_eq!(export.scorer, "mention");
    assert_eq!(export.categories, vec!["fear", "hope"]);
    assert_eq!(export.windows.len(), 2);
    assert_eq!(export.units.len(), 3);

    let w1 = &export.windows[1];
    assert_eq!((w1.start_unit, w1.end_unit), (1, 2));
    assert_eq!(w1.text, "x hope");
    assert_eq!(w1.dominant.as_deref(), Some("hope"));
    assert_eq!(w1.confidence, 1.0);

    // tie between fear and hope goes to the first category
    assert_eq!(export.units[1].dominant.as_deref(), Some("fear"));
    assert_eq!(export.units[1].lines, vec!["x"]);

    insta::assert_snapshot!(serde_json::to_string_pretty(&export.windows[0]).unwrap(), @r#"
    {
      "id": 0,
      "start_unit": 0,
      "end_unit": 1,
      "text": "fear x",
      "dominant": "fear",
      "confidence": 1.0,
      "scores": {
        "fear": 1.0,
        "hope": 0.0
      }
    }
    "#);
}

#[test]
fn silent_window_has_no_dominant() {
    let export = RunExport::from_run(&run(&["a", "b"], &MentionScorer::new("mention", false))).unwrap();
    assert_eq!(export.windows[0].dominant, None);
    assert_eq!(export.windows[0].confidence, 0.0);
}

#[test]
fn write_and_read_back() {
    let export = RunExport::from_run(&run(LINES, &MentionScorer::new("mention", false))).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    export.write_json(&path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value, export.to_value().unwrap());
    assert_eq!(value["units"][2]["scores"]["hope"], 1.0);

    let err = export
        .write_json(&dir.path().join("missing").join("run.json"))
        .unwrap_err();
    assert_eq!(err.kind(), "io");
}

#[test]
fn dominant_comparison_between_scorers() {
    let plain = run(LINES, &MentionScorer::new("lexicon", false));
    let swapped = run(LINES, &MentionScorer::new("entailment", true));

    let comparisons = compare_dominant(&plain, &swapped).unwrap();
    let summary: Vec<_> = comparisons
        .iter()
        .map(|c| (c.unit, c.left.as_deref(), c.right.as_deref(), c.agrees))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, Some("fear"), Some("hope"), false),
            (1, Some("fear"), Some("fear"), true),
            (2, Some("hope"), Some("fear"), false),
        ]
    );
    assert!((agreement(&comparisons).unwrap() - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(agreement(&[]), None);
}

#[test]
fn comparison_needs_same_units() {
    let short = run(&["fear", "x"], &MentionScorer::new("a", false));
    let long = run(LINES, &MentionScorer::new("b", false));
    assert_eq!(compare_dominant(&short, &long).unwrap_err().kind(), "validation");
}
