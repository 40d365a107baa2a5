use layered_affect::{AffectError, AffectResult};

const PLACEHOLDER: &str = "{}";

/// A hypothesis sentence with exactly one `{}` slot for the category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypothesisTemplate {
    template: String,
}

impl HypothesisTemplate {
    pub fn new(template: impl Into<String>) -> AffectResult<Self> {
        let template = template.into();
        match template.matches(PLACEHOLDER).count() {
            1 => Ok(Self { template }),
            n => Err(AffectError::configuration(format!(
                "hypothesis template '{}' must contain exactly one '{{}}', found {}",
                template, n
            ))),
        }
    }

    /// `"Questo testo esprime {}."`
    pub fn italian() -> Self {
        Self {
            template: "Questo testo esprime {}.".to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn render(&self, category: &str) -> String {
        self.template.replacen(PLACEHOLDER, category, 1)
    }
}

impl Default for HypothesisTemplate {
    fn default() -> Self {
        Self {
            template: "This text expresses {}.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(
            HypothesisTemplate::default().render("fear"),
            "This text expresses fear."
        );
        assert_eq!(
            HypothesisTemplate::italian().render("paura"),
            "Questo testo esprime paura."
        );
        let custom = HypothesisTemplate::new("{} is felt here").unwrap();
        assert_eq!(custom.render("hope"), "hope is felt here");
    }

    #[test]
    fn test_placeholder_count() {
        for bad in ["no slot", "{} and {}", ""] {
            let err = HypothesisTemplate::new(bad).unwrap_err();
            assert_eq!(err.kind(), "configuration", "template: {:?}", bad);
        }
    }
}
