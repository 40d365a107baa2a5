//! Zero-shot emotion scorer over an entailment capability.

use crate::{Entailment, HypothesisTemplate};
use layered_affect::{AffectError, AffectResult, EmotionSet, EmotionVector, Scorer};
use std::time::{Duration, Instant};

/// Scores each category as the probability that the text entails the
/// category's rendered hypothesis.
///
/// One `entails` call per category per text; any failure fails the whole
/// score with [`AffectError::Inference`].
///
/// ```
/// use layered_affect::{EmotionSet, Scorer};
/// use layered_affect_entailment::{EntailmentFailure, EntailmentScorer};
///
/// let set = EmotionSet::new(["fear", "hope"]).unwrap();
/// let model = |premise: &str, hypothesis: &str| -> Result<f64, EntailmentFailure> {
///     Ok(if premise.contains("dark") && hypothesis.contains("fear") { 0.9 } else { 0.1 })
/// };
/// let scorer = EntailmentScorer::new(model, &set);
///
/// let vector = scorer.score("a dark wood").unwrap();
/// assert_eq!(vector.get("fear"), Some(0.9));
/// assert_eq!(vector.get("hope"), Some(0.1));
/// ```
#[derive(Debug, Clone)]
pub struct EntailmentScorer<E> {
    name: String,
    capability: E,
    set: EmotionSet,
    template: HypothesisTemplate,
    call_timeout: Option<Duration>,
}

impl<E: Entailment> EntailmentScorer<E> {
    pub fn new(capability: E, set: &EmotionSet) -> Self {
        Self {
            name: "entailment".to_string(),
            capability,
            set: set.clone(),
            template: HypothesisTemplate::default(),
            call_timeout: None,
        }
    }

    pub fn with_template(mut self, template: HypothesisTemplate) -> Self {
        self.template = template;
        self
    }

    /// Treat calls slower than `timeout` as failed.
    ///
    /// The call is not interrupted; its result is discarded once it returns.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn template(&self) -> &HypothesisTemplate {
        &self.template
    }

    pub fn capability(&self) -> &E {
        &self.capability
    }

    fn intensity(&self, text: &str, category: &str) -> AffectResult<f64> {
        let hypothesis = self.template.render(category);
        let started = Instant::now();

        let probability = self
            .capability
            .entails(text, &hypothesis)
            .map_err(|failure| {
                AffectError::inference(format!(
                    "entailment for '{}' failed: {}",
                    category, failure
                ))
            })?;

        if let Some(limit) = self.call_timeout {
            let elapsed = started.elapsed();
            if elapsed > limit {
                return Err(AffectError::inference(format!(
                    "entailment for '{}' took {:?}, limit is {:?}",
                    category, elapsed, limit
                )));
            }
        }

        if !(0.0..=1.0).contains(&probability) {
            return Err(AffectError::inference(format!(
                "entailment for '{}' returned {}, expected a probability",
                category, probability
            )));
        }

        Ok(probability)
    }
}

impl<E: Entailment> Scorer for EntailmentScorer<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn categories(&self) -> &EmotionSet {
        &self.set
    }

    fn score(&self, text: &str) -> AffectResult<EmotionVector> {
        EmotionVector::from_fn(&self.set, |category| self.intensity(text, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntailmentFailure;
    use std::sync::Mutex;
    use std::thread;

    fn set() -> EmotionSet {
        EmotionSet::new(["fear", "hope"]).unwrap()
    }

    #[test]
    fn test_renders_one_hypothesis_per_category() {
        let seen = Mutex::new(Vec::new());
        let recorder = |premise: &str, hypothesis: &str| -> Result<f64, EntailmentFailure> {
            seen.lock().unwrap().push((premise.to_string(), hypothesis.to_string()));
            Ok(0.5)
        };
        let scorer = EntailmentScorer::new(&recorder, &set()).with_template(HypothesisTemplate::italian());
        scorer.score("selva oscura").unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("selva oscura".to_string(), "Questo testo esprime fear.".to_string()),
                ("selva oscura".to_string(), "Questo testo esprime hope.".to_string()),
            ]
        );
    }

    #[test]
    fn test_capability_failure_is_inference_error() {
        let failing = |_: &str, h: &str| -> Result<f64, EntailmentFailure> {
            if h.contains("hope") {
                Err(EntailmentFailure::Timeout(Duration::from_secs(30)))
            } else {
                Ok(0.2)
            }
        };
        let err = EntailmentScorer::new(failing, &set()).score("x").unwrap_err();
        assert_eq!(err.kind(), "inference");
        assert!(err.to_string().contains("'hope'"), "{}", err);
    }

    #[test]
    fn test_out_of_range_probability_is_rejected() {
        for bad in [1.5, -0.1, f64::NAN] {
            let model = move |_: &str, _: &str| -> Result<f64, EntailmentFailure> { Ok(bad) };
            let err = EntailmentScorer::new(model, &set()).score("x").unwrap_err();
            assert_eq!(err.kind(), "inference", "value: {}", bad);
        }
    }

    #[test]
    fn test_slow_call_exceeds_timeout() {
        let slow = |_: &str, _: &str| -> Result<f64, EntailmentFailure> {
            thread::sleep(Duration::from_millis(20));
            Ok(0.5)
        };
        let scorer = EntailmentScorer::new(slow, &set()).with_call_timeout(Duration::from_millis(1));
        assert_eq!(scorer.score("x").unwrap_err().kind(), "inference");

        let patient = EntailmentScorer::new(slow, &set()).with_call_timeout(Duration::from_secs(60));
        assert_eq!(patient.score("x").unwrap().get("fear"), Some(0.5));
    }

    #[test]
    fn test_boundary_probabilities_are_accepted() {
        let model = |_: &str, h: &str| -> Result<f64, EntailmentFailure> {
            Ok(if h.contains("fear") { 1.0 } else { 0.0 })
        };
        let scorer = EntailmentScorer::new(model, &set()).with_name("nli");
        assert_eq!(scorer.name(), "nli");
        let v = scorer.score("x").unwrap();
        assert_eq!(v.dominant(), Some(("fear", 1.0)));
    }
}
