//! Emotion lexicon data: category → trigger stems.
//!
//! Lexicons are plain data validated once at load time. The accepted JSON
//! shapes are
//!
//! ```json
//! { "paura": ["paura", "terror", "selva"], "speranza": ["sper", "luce"] }
//! ```
//!
//! and the nested form whose list fields are merged:
//!
//! ```json
//! {
//!   "_metadata": { "source": "..." },
//!   "paura": { "keywords_modern": ["paura"], "keywords_dante": ["smarrita"] }
//! }
//! ```
//!
//! Top-level keys starting with `_` are metadata and skipped.

use crate::words::fold_word;
use layered_affect::{AffectError, AffectResult};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Validated category → folded stems mapping.
///
/// Categories keep insertion order (JSON input arrives sorted by key); each
/// category's stems are sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<(String, Vec<String>)>,
}

impl Lexicon {
    /// Build from in-memory pairs. Stems are folded; blank stems are
    /// rejected because they would match every word.
    pub fn from_pairs<I, C, S, T>(pairs: I) -> AffectResult<Self>
    where
        I: IntoIterator<Item = (C, S)>,
        C: Into<String>,
        S: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut lexicon = Lexicon::default();
        for (category, stems) in pairs {
            let category = category.into();
            let mut folded = Vec::new();
            for stem in stems {
                folded.push(fold_stem(&category, stem.as_ref())?);
            }
            lexicon.push(category, folded)?;
        }
        Ok(lexicon)
    }

    /// Parse lexicon JSON.
    pub fn from_json_str(content: &str) -> AffectResult<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| AffectError::configuration(format!("lexicon is not valid JSON: {}", e)))?;
        Self::from_json_value(&value)
    }

    /// Validate an already parsed JSON document.
    pub fn from_json_value(value: &Value) -> AffectResult<Self> {
        let root = value.as_object().ok_or_else(|| {
            AffectError::configuration("lexicon root must be a mapping of category to stems")
        })?;

        let mut lexicon = Lexicon::default();
        for (category, entry) in root {
            if category.starts_with('_') {
                continue;
            }

            let mut stems = Vec::new();
            match entry {
                Value::Array(items) => collect_stems(category, items, &mut stems)?,
                Value::Object(fields) => {
                    for (field, items) in fields {
                        let items = items.as_array().ok_or_else(|| {
                            AffectError::configuration(format!(
                                "lexicon field '{}.{}' must be a list of stems",
                                category, field
                            ))
                        })?;
                        collect_stems(category, items, &mut stems)?;
                    }
                }
                _ => {
                    return Err(AffectError::configuration(format!(
                        "lexicon entry '{}' must be a list of stems",
                        category
                    )))
                }
            }
            lexicon.push(category.clone(), stems)?;
        }

        log::debug!(
            "lexicon loaded: {} categories, {} stems",
            lexicon.entries.len(),
            lexicon.stem_count()
        );
        Ok(lexicon)
    }

    /// Read and validate a lexicon JSON file.
    pub fn load(path: &Path) -> AffectResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AffectError::io(path.display().to_string(), e.to_string()))?;
        Self::from_json_str(&content)
    }

    fn push(&mut self, category: String, mut stems: Vec<String>) -> AffectResult<()> {
        if category.trim().is_empty() {
            return Err(AffectError::configuration("lexicon category names must not be blank"));
        }
        if self.stems(&category).is_some() {
            return Err(AffectError::configuration(format!(
                "lexicon category '{}' is listed twice",
                category
            )));
        }
        stems.sort();
        stems.dedup();
        self.entries.push((category, stems));
        Ok(())
    }

    /// Folded stems of a category.
    pub fn stems(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, stems)| stems.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total stems across all categories.
    pub fn stem_count(&self) -> usize {
        self.entries.iter().map(|(_, stems)| stems.len()).sum()
    }
}

fn collect_stems(category: &str, items: &[Value], stems: &mut Vec<String>) -> AffectResult<()> {
    for item in items {
        let stem = item.as_str().ok_or_else(|| {
            AffectError::configuration(format!(
                "lexicon entry '{}' contains a non-string stem: {}",
                category, item
            ))
        })?;
        stems.push(fold_stem(category, stem)?);
    }
    Ok(())
}

fn fold_stem(category: &str, stem: &str) -> AffectResult<String> {
    let folded = fold_word(stem.trim());
    if folded.is_empty() {
        return Err(AffectError::configuration(format!(
            "lexicon entry '{}' contains a blank stem",
            category
        )));
    }
    Ok(folded)
}
