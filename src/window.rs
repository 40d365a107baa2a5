//! Overlapping analysis windows over the unit sequence.
//!
//! Window `k` spans unit indices `[k * stride, k * stride + window_size - 1]`
//! clipped to the available units. Windows give a scorer more context than a
//! single unit; [`crate::Aggregator`] maps their scores back onto units.

use crate::{AffectError, AffectResult, Unit};
use std::iter::FusedIterator;

/// A group of consecutive units scored together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    id: usize,
    member_unit_ids: Vec<usize>,
    text: String,
}

impl Window {
    pub fn id(&self) -> usize {
        self.id
    }

    /// Ids of the member units, in unit order.
    pub fn member_unit_ids(&self) -> &[usize] {
        &self.member_unit_ids
    }

    /// Member units' normalized text joined by single spaces.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// First member unit id.
    pub fn start_unit(&self) -> usize {
        self.member_unit_ids[0]
    }

    /// Last member unit id.
    pub fn end_unit(&self) -> usize {
        self.member_unit_ids[self.member_unit_ids.len() - 1]
    }
}

/// Builds [`Windows`] with a fixed size and stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBuilder {
    window_size: usize,
    stride: usize,
}

impl WindowBuilder {
    /// Both values must be at least 1, and `stride` may not exceed
    /// `window_size` (a larger stride would skip units).
    pub fn new(window_size: usize, stride: usize) -> AffectResult<Self> {
        if window_size == 0 {
            return Err(AffectError::validation("window_size must be at least 1"));
        }
        if stride == 0 {
            return Err(AffectError::validation("stride must be at least 1"));
        }
        if stride > window_size {
            return Err(AffectError::validation(format!(
                "stride {} exceeds window_size {}; some units would belong to no window",
                stride, window_size
            )));
        }
        Ok(Self {
            window_size,
            stride,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Lazily produce the windows over `units`.
    pub fn build<'u>(&self, units: &'u [Unit]) -> AffectResult<Windows<'u>> {
        if units.is_empty() {
            return Err(AffectError::validation("cannot build windows over zero units"));
        }
        let count = window_count(units.len(), self.window_size, self.stride);
        log::debug!(
            "building {} windows over {} units (size {}, stride {})",
            count,
            units.len(),
            self.window_size,
            self.stride
        );
        Ok(Windows {
            units,
            window_size: self.window_size,
            stride: self.stride,
            next: 0,
            count,
        })
    }
}

/// Number of windows produced over `unit_count` units.
///
/// `ceil((unit_count - window_size) / stride) + 1`, or 1 when there are
/// fewer units than one window holds.
pub fn window_count(unit_count: usize, window_size: usize, stride: usize) -> usize {
    if unit_count <= window_size {
        return 1;
    }
    let remaining = unit_count - window_size;
    (remaining + stride - 1) / stride + 1
}

/// Lazy, finite, restartable window sequence.
#[derive(Debug, Clone)]
pub struct Windows<'u> {
    units: &'u [Unit],
    window_size: usize,
    stride: usize,
    next: usize,
    count: usize,
}

impl<'u> Windows<'u> {
    /// A fresh iterator starting again from window 0.
    pub fn restart(&self) -> Windows<'u> {
        Windows {
            next: 0,
            ..self.clone()
        }
    }

    /// Total number of windows, independent of iteration progress.
    pub fn total(&self) -> usize {
        self.count
    }

    /// Build window `k` directly.
    pub fn window(&self, k: usize) -> Option<Window> {
        if k >= self.count {
            return None;
        }
        let start = k * self.stride;
        let end = (start + self.window_size).min(self.units.len());
        let members = &self.units[start..end];
        let text = members
            .iter()
            .map(Unit::normalized_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Some(Window {
            id: k,
            member_unit_ids: members.iter().map(Unit::id).collect(),
            text,
        })
    }
}

impl<'u> Iterator for Windows<'u> {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        let window = self.window(self.next)?;
        self.next += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl<'u> ExactSizeIterator for Windows<'u> {}

impl<'u> FusedIterator for Windows<'u> {}
