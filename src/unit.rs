//! Segmentation of an ordered line sequence into narrative units.
//!
//! A unit is a fixed-size contiguous group of lines (a tercet when the group
//! size is 3). Units are the minimal scoring granularity.

use crate::{AffectError, AffectResult};

/// A contiguous group of input lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    id: usize,
    lines: Vec<String>,
    normalized_text: String,
    partial: bool,
}

impl Unit {
    /// 0-based position in the unit sequence.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Raw lines, verbatim.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Normalized lines joined by single spaces.
    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    /// True for a trailing unit holding fewer lines than the group size.
    pub fn is_partial(&self) -> bool {
        self.partial
    }
}

/// Normalizes one raw line before it is scored.
///
/// Orthographic normalization (archaic spellings, elisions) belongs to the
/// caller; implement this trait to plug it in.
pub trait TextNormalizer: Send + Sync {
    fn normalize(&self, line: &str) -> String;
}

impl<F> TextNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, line: &str) -> String {
        self(line)
    }
}

/// Trims a line and collapses internal whitespace runs to one space.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceNormalizer;

impl TextNormalizer for WhitespaceNormalizer {
    fn normalize(&self, line: &str) -> String {
        line.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Splits lines into [`Unit`]s.
#[derive(Debug, Clone, Default)]
pub struct Segmenter<N = WhitespaceNormalizer> {
    normalizer: N,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: TextNormalizer> Segmenter<N> {
    /// Use a custom line normalizer.
    pub fn with_normalizer(normalizer: N) -> Self {
        Self { normalizer }
    }

    /// Partition `lines` into consecutive groups of `group_size`.
    ///
    /// The last unit may be shorter; it is flagged as partial rather than
    /// rejected.
    pub fn segment<S: AsRef<str>>(&self, lines: &[S], group_size: usize) -> AffectResult<Vec<Unit>> {
        if lines.is_empty() {
            return Err(AffectError::validation("input has no lines"));
        }
        if group_size == 0 {
            return Err(AffectError::validation("group_size must be at least 1"));
        }

        let units: Vec<Unit> = lines
            .chunks(group_size)
            .enumerate()
            .map(|(id, chunk)| {
                let lines: Vec<String> = chunk.iter().map(|l| l.as_ref().to_string()).collect();
                let normalized_text = lines
                    .iter()
                    .map(|line| self.normalizer.normalize(line))
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                Unit {
                    id,
                    partial: chunk.len() < group_size,
                    lines,
                    normalized_text,
                }
            })
            .collect();

        if let Some(last) = units.last().filter(|u| u.partial) {
            log::debug!(
                "final unit {} holds {} of {} lines",
                last.id,
                last.lines.len(),
                group_size
            );
        }
        log::debug!("segmented {} lines into {} units", lines.len(), units.len());

        Ok(units)
    }
}

/// Segment with the default whitespace normalizer.
pub fn segment<S: AsRef<str>>(lines: &[S], group_size: usize) -> AffectResult<Vec<Unit>> {
    Segmenter::new().segment(lines, group_size)
}
