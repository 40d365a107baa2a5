//! Keyword-count emotion scorer.

use crate::words::words;
use crate::Lexicon;
use layered_affect::{AffectResult, EmotionSet, EmotionVector, Scorer};

/// Scores a category as the share of words that start with one of its stems.
///
/// ```
/// use layered_affect::{EmotionSet, Scorer};
/// use layered_affect_lexicon::{Lexicon, LexiconScorer};
///
/// let set = EmotionSet::new(["fear"]).unwrap();
/// let lexicon = Lexicon::from_pairs(vec![("fear", vec!["dark", "lost"])]).unwrap();
/// let scorer = LexiconScorer::new(&set, &lexicon);
///
/// let vector = scorer.score("a dark and lost forest").unwrap();
/// assert!((vector.get("fear").unwrap() - 0.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    name: String,
    set: EmotionSet,
    /// Stems per category, aligned with `set`.
    stems: Vec<Vec<String>>,
}

/// What a [`LexiconScorer`] saw in one text.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconReport {
    pub vector: EmotionVector,
    /// Words the intensities are divided by.
    pub total_words: usize,
    /// Each matching word occurrence with the categories it triggered.
    pub matches: Vec<WordMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    /// The folded word.
    pub word: String,
    pub categories: Vec<String>,
}

impl LexiconScorer {
    /// Bind a lexicon to the run's closed category set.
    ///
    /// Lexicon categories outside the set are ignored with a warning;
    /// categories with no lexicon entry always score `0.0`.
    pub fn new(set: &EmotionSet, lexicon: &Lexicon) -> Self {
        for category in lexicon.categories() {
            if !set.contains(category) {
                log::warn!(
                    "ignoring lexicon category '{}': not one of {:?}",
                    category,
                    set
                );
            }
        }

        let stems = set
            .iter()
            .map(|category| match lexicon.stems(category) {
                Some(stems) => stems.to_vec(),
                None => {
                    log::debug!("no lexicon stems for category '{}'", category);
                    Vec::new()
                }
            })
            .collect();

        Self {
            name: "lexicon".to_string(),
            set: set.clone(),
            stems,
        }
    }

    /// Rename the scorer in results and logs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Score `text` and report which words matched.
    pub fn explain(&self, text: &str) -> AffectResult<LexiconReport> {
        let words = words(text);
        let mut counts = vec![0usize; self.stems.len()];
        let mut matches = Vec::new();

        for word in &words {
            let mut hit = Vec::new();
            for (idx, stems) in self.stems.iter().enumerate() {
                if stems.iter().any(|stem| word.starts_with(stem.as_str())) {
                    counts[idx] += 1;
                    hit.push(self.set.names()[idx].clone());
                }
            }
            if !hit.is_empty() {
                matches.push(WordMatch {
                    word: word.clone(),
                    categories: hit,
                });
            }
        }

        let total_words = words.len();
        let values = counts
            .into_iter()
            .map(|count| {
                if total_words == 0 {
                    0.0
                } else {
                    count as f64 / total_words as f64
                }
            })
            .collect();

        Ok(LexiconReport {
            vector: EmotionVector::from_values(&self.set, values)?,
            total_words,
            matches,
        })
    }
}

impl Scorer for LexiconScorer {
    fn name(&self) -> &str {
        &self.name
    }

    fn categories(&self) -> &EmotionSet {
        &self.set
    }

    fn score(&self, text: &str) -> AffectResult<EmotionVector> {
        self.explain(text).map(|report| report.vector)
    }
}
