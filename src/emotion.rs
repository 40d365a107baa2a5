//! Emotion categories and per-category intensity vectors.
//!
//! An [`EmotionSet`] is the fixed, closed set of categories a run scores.
//! An [`EmotionVector`] assigns every category of its set an intensity in
//! `[0.0, 1.0]`. Vectors are built once and never mutated in place.

use crate::{AffectError, AffectResult};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// The closed, ordered set of emotion categories.
///
/// Cloning is cheap; the names are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct EmotionSet {
    names: Arc<[String]>,
}

impl EmotionSet {
    /// Create a set from category names.
    ///
    /// Fails with a configuration error when the set is empty, or a name is
    /// blank or repeated.
    pub fn new<I, S>(names: I) -> AffectResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(AffectError::configuration(
                "emotion category set must not be empty",
            ));
        }

        let mut seen = HashSet::new();
        for name in &names {
            if name.trim().is_empty() {
                return Err(AffectError::configuration(
                    "emotion category names must not be blank",
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(AffectError::configuration(format!(
                    "duplicate emotion category '{}'",
                    name
                )));
            }
        }

        Ok(Self {
            names: names.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Position of a category within the set.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

impl fmt::Debug for EmotionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names.iter()).finish()
    }
}

/// Per-category intensities for one text span.
#[derive(Clone, PartialEq)]
pub struct EmotionVector {
    set: EmotionSet,
    values: Vec<f64>,
}

impl EmotionVector {
    /// A vector with every intensity at `0.0`.
    pub fn zeros(set: &EmotionSet) -> Self {
        Self {
            set: set.clone(),
            values: vec![0.0; set.len()],
        }
    }

    /// Build a vector from intensities given in category order.
    ///
    /// Every value must be finite and within `[0.0, 1.0]`.
    pub fn from_values(set: &EmotionSet, values: Vec<f64>) -> AffectResult<Self> {
        if values.len() != set.len() {
            return Err(AffectError::validation(format!(
                "expected {} intensities, got {}",
                set.len(),
                values.len()
            )));
        }

        for (name, value) in set.iter().zip(values.iter()) {
            if !is_intensity(*value) {
                return Err(AffectError::validation(format!(
                    "intensity for '{}' is outside [0, 1]: {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            set: set.clone(),
            values,
        })
    }

    /// Build a vector by computing each category's intensity.
    pub fn from_fn<F>(set: &EmotionSet, mut intensity: F) -> AffectResult<Self>
    where
        F: FnMut(&str) -> AffectResult<f64>,
    {
        let values = set
            .iter()
            .map(|name| intensity(name))
            .collect::<AffectResult<Vec<_>>>()?;
        Self::from_values(set, values)
    }

    /// Per-category arithmetic mean of several vectors over the same set.
    ///
    /// Returns `None` when `vectors` is empty. Categories are averaged
    /// independently.
    pub fn mean<'a, I>(vectors: I) -> AffectResult<Option<Self>>
    where
        I: IntoIterator<Item = &'a EmotionVector>,
    {
        let mut iter = vectors.into_iter();
        let first = match iter.next() {
            Some(first) => first,
            None => return Ok(None),
        };

        let mut sums = first.values.clone();
        let mut count = 1usize;
        for vector in iter {
            if vector.set != first.set {
                return Err(AffectError::validation(format!(
                    "cannot average vectors over different categories: {:?} and {:?}",
                    first.set, vector.set
                )));
            }
            for (sum, value) in sums.iter_mut().zip(vector.values.iter()) {
                *sum += value;
            }
            count += 1;
        }

        if count == 1 {
            return Ok(Some(first.clone()));
        }

        let values = sums
            .into_iter()
            .map(|sum| (sum / count as f64).clamp(0.0, 1.0))
            .collect();
        Ok(Some(Self {
            set: first.set.clone(),
            values,
        }))
    }

    pub fn categories(&self) -> &EmotionSet {
        &self.set
    }

    /// Intensity of a category, if it belongs to the set.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.set.index_of(name).map(|idx| self.values[idx])
    }

    /// Intensities in category order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.set.iter().zip(self.values.iter().copied())
    }

    /// The category with the highest intensity.
    ///
    /// Ties go to the category listed first. Returns `None` when nothing
    /// registered, i.e. every intensity is zero.
    pub fn dominant(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (name, value) in self.iter() {
            if value <= 0.0 {
                continue;
            }
            match best {
                Some((_, best_value)) if best_value >= value => {}
                _ => best = Some((name, value)),
            }
        }
        best
    }

    /// True when every intensity is zero.
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}

fn is_intensity(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

impl fmt::Debug for EmotionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Compact for snapshots: {fear: 0.40, hope: 0.00}
        f.write_str("{")?;
        for (idx, (name, value)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {:.2}", name, value)?;
        }
        f.write_str("}")
    }
}

impl Serialize for EmotionVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> EmotionSet {
        EmotionSet::new(["fear", "hope", "anger"]).unwrap()
    }

    #[test]
    fn test_set_rejects_bad_names() {
        assert!(EmotionSet::new(Vec::<String>::new()).is_err());
        assert!(EmotionSet::new(["fear", " "]).is_err());
        let err = EmotionSet::new(["fear", "fear"]).unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }

    #[test]
    fn test_set_lookup() {
        let set = set();
        assert_eq!(set.len(), 3);
        assert_eq!(set.index_of("hope"), Some(1));
        assert!(!set.contains("joy"));
    }

    #[test]
    fn test_from_values_checks_range() {
        let set = set();
        assert!(EmotionVector::from_values(&set, vec![0.0, 1.0, 0.5]).is_ok());
        assert!(EmotionVector::from_values(&set, vec![0.0, 1.1, 0.5]).is_err());
        assert!(EmotionVector::from_values(&set, vec![0.0, f64::NAN, 0.5]).is_err());
        assert!(EmotionVector::from_values(&set, vec![0.0, 0.5]).is_err());
    }

    #[test]
    fn test_mean_is_per_category() {
        let set = set();
        let a = EmotionVector::from_values(&set, vec![0.2, 1.0, 0.0]).unwrap();
        let b = EmotionVector::from_values(&set, vec![0.8, 0.0, 0.0]).unwrap();
        let mean = EmotionVector::mean([&a, &b]).unwrap().unwrap();
        assert!((mean.get("fear").unwrap() - 0.5).abs() < 1e-12);
        assert!((mean.get("hope").unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(mean.get("anger"), Some(0.0));
    }

    #[test]
    fn test_mean_of_one_is_identity() {
        let set = set();
        let a = EmotionVector::from_values(&set, vec![0.1, 0.7, 0.3]).unwrap();
        let mean = EmotionVector::mean([&a]).unwrap().unwrap();
        assert_eq!(mean, a);
        assert_eq!(EmotionVector::mean(Vec::<&EmotionVector>::new()).unwrap(), None);
    }

    #[test]
    fn test_mean_rejects_mixed_sets() {
        let a = EmotionVector::zeros(&set());
        let b = EmotionVector::zeros(&EmotionSet::new(["joy"]).unwrap());
        assert!(EmotionVector::mean([&a, &b]).is_err());
    }

    #[test]
    fn test_dominant() {
        let set = set();
        let v = EmotionVector::from_values(&set, vec![0.3, 0.6, 0.6]).unwrap();
        assert_eq!(v.dominant(), Some(("hope", 0.6)));
        assert_eq!(EmotionVector::zeros(&set).dominant(), None);
    }

    #[test]
    fn test_debug_format() {
        let set = set();
        let v = EmotionVector::from_values(&set, vec![0.4, 0.0, 0.3]).unwrap();
        assert_eq!(format!("{:?}", v), "{fear: 0.40, hope: 0.00, anger: 0.30}");
    }
}
