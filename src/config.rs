//! Analysis configuration.
//!
//! Loaded from TOML, e.g.
//!
//! ```toml
//! group_size = 3
//! window_size = 2
//! stride = 1
//! categories = ["paura", "tristezza", "rabbia", "speranza", "smarrimento"]
//! parallel = true
//! ```

use crate::{AffectError, AffectResult, EmotionSet, WindowBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Keys that hold a count and must be at least 1.
const SIZE_KEYS: &[&str] = &["group_size", "window_size", "stride"];

/// Categories scored when a configuration names none.
pub const DEFAULT_CATEGORIES: &[&str] = &["paura", "tristezza", "rabbia", "speranza", "smarrimento"];

/// Parameters of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Lines per unit.
    pub group_size: usize,
    /// Units per window.
    pub window_size: usize,
    /// Units between window starts.
    pub stride: usize,
    /// The closed set of emotion categories.
    pub categories: Vec<String>,
    /// Score windows on the rayon thread pool.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            group_size: 3,
            window_size: 2,
            stride: 1,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Default sizes over a custom category set.
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    ///
    /// Syntax errors, unknown keys and mistyped values are configuration
    /// errors. A size below 1, negative ones included, is a validation
    /// error.
    pub fn from_toml_str(content: &str) -> AffectResult<Self> {
        let invalid = |e: toml::de::Error| AffectError::configuration(format!("invalid analysis config: {}", e));
        let document: toml::Table = toml::from_str(content).map_err(invalid)?;
        for key in SIZE_KEYS {
            if let Some(value) = document.get(*key).and_then(toml::Value::as_integer) {
                if value < 1 {
                    return Err(AffectError::validation(format!("{} must be at least 1, got {}", key, value)));
                }
            }
        }
        let config: AnalysisConfig = toml::Value::Table(document).try_into().map_err(invalid)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> AffectResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AffectError::io(path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Reject zero sizes, a stride longer than the window, and bad
    /// category sets.
    pub fn validate(&self) -> AffectResult<()> {
        if self.group_size == 0 {
            return Err(AffectError::validation("group_size must be at least 1"));
        }
        self.window_builder()?;
        self.emotion_set()?;
        Ok(())
    }

    pub fn emotion_set(&self) -> AffectResult<EmotionSet> {
        EmotionSet::new(self.categories.iter().cloned())
    }

    pub fn window_builder(&self) -> AffectResult<WindowBuilder> {
        WindowBuilder::new(self.window_size, self.stride)
    }
}
