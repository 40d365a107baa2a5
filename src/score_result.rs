//! Ordered id → [`EmotionVector`] mappings.

use crate::{AffectError, AffectResult, EmotionVector};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Scores keyed by window id or unit id, in insertion order.
///
/// Every vector in one result is over the same [`EmotionSet`](crate::EmotionSet).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreResult {
    entries: Vec<(usize, EmotionVector)>,
    /// id → index into `entries`.
    positions: HashMap<usize, usize>,
}

impl ScoreResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Collect `(id, vector)` pairs, inserting them in order.
    pub fn from_entries<I>(entries: I) -> AffectResult<Self>
    where
        I: IntoIterator<Item = (usize, EmotionVector)>,
    {
        let entries = entries.into_iter();
        let mut result = Self::with_capacity(entries.size_hint().0);
        for (id, vector) in entries {
            result.insert(id, vector)?;
        }
        Ok(result)
    }

    /// Insert a vector; a rescored id replaces its stale vector in place.
    ///
    /// Returns the replaced vector, if any. A vector over a different
    /// category set than the stored ones is a `Validation` error.
    pub fn insert(&mut self, id: usize, vector: EmotionVector) -> AffectResult<Option<EmotionVector>> {
        if let Some((_, first)) = self.entries.first() {
            if first.categories() != vector.categories() {
                return Err(AffectError::validation(format!(
                    "score for id {} is over {:?}, result holds {:?}",
                    id,
                    vector.categories(),
                    first.categories()
                )));
            }
        }

        match self.positions.get(&id) {
            Some(&index) => Ok(Some(std::mem::replace(&mut self.entries[index].1, vector))),
            None => {
                self.positions.insert(id, self.entries.len());
                self.entries.push((id, vector));
                Ok(None)
            }
        }
    }

    pub fn get(&self, id: usize) -> Option<&EmotionVector> {
        self.positions
            .get(&id)
            .map(|&index| &self.entries[index].1)
    }

    pub fn contains(&self, id: usize) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &EmotionVector)> {
        self.entries.iter().map(|(id, vector)| (*id, vector))
    }

    /// Intensities of one category across all entries, in order.
    pub fn series(&self, category: &str) -> Vec<f64> {
        self.entries
            .iter()
            .map(|(_, vector)| vector.get(category).unwrap_or(0.0))
            .collect()
    }
}

impl Serialize for ScoreResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, vector) in &self.entries {
            map.serialize_entry(id, vector)?;
        }
        map.end()
    }
}
