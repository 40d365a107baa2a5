//! A rule-driven stand-in for an entailment model.

use crate::EntailmentRule;
use layered_affect_entailment::{Entailment, EntailmentFailure, HypothesisTemplate};
use layered_affect_lexicon::{fold_word, words};

/// Answers `entails` from fixture rules.
///
/// The hypothesis is matched back to its category through the template.
/// The first rule for that category whose `word` (if any) occurs in the
/// premise decides the answer; otherwise the call returns `otherwise`.
#[derive(Debug, Clone)]
pub struct ScriptedEntailment {
    template: HypothesisTemplate,
    rules: Vec<EntailmentRule>,
    otherwise: f64,
}

impl ScriptedEntailment {
    pub fn new(template: HypothesisTemplate, rules: Vec<EntailmentRule>, otherwise: f64) -> Self {
        Self {
            template,
            rules,
            otherwise,
        }
    }
}

impl Entailment for ScriptedEntailment {
    fn entails(&self, premise: &str, hypothesis: &str) -> Result<f64, EntailmentFailure> {
        let premise_words = words(premise);
        let rule = self.rules.iter().find(|rule| {
            self.template.render(&rule.category) == hypothesis
                && rule
                    .word
                    .as_deref()
                    .map_or(true, |word| premise_words.contains(&fold_word(word)))
        });

        match rule {
            Some(EntailmentRule { fail: Some(message), .. }) => {
                Err(EntailmentFailure::Failed(message.clone()))
            }
            Some(rule) => Ok(rule.probability),
            None => Ok(self.otherwise),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(category: &str, word: Option<&str>, probability: f64) -> EntailmentRule {
        EntailmentRule {
            category: category.to_string(),
            word: word.map(str::to_string),
            probability,
            fail: None,
        }
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let template = HypothesisTemplate::default();
        let model = ScriptedEntailment::new(
            template.clone(),
            vec![rule("fear", Some("Selva"), 0.8), rule("fear", None, 0.2)],
            0.05,
        );
        assert_eq!(model.entails("una selva oscura", &template.render("fear")), Ok(0.8));
        assert_eq!(model.entails("la diritta via", &template.render("fear")), Ok(0.2));
        assert_eq!(model.entails("una selva oscura", &template.render("hope")), Ok(0.05));
    }

    #[test]
    fn test_failing_rule() {
        let template = HypothesisTemplate::italian();
        let mut failing = rule("paura", Some("ben"), 0.0);
        failing.fail = Some("model offline".to_string());
        let model = ScriptedEntailment::new(template.clone(), vec![failing], 0.0);

        assert_eq!(
            model.entails("del ben", &template.render("paura")),
            Err(EntailmentFailure::Failed("model offline".to_string()))
        );
        assert_eq!(model.entails("del male", &template.render("paura")), Ok(0.0));
    }
}
