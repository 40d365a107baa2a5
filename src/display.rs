//! Plain-text rendering of scores for diagnostics and snapshot tests.

use crate::{EmotionVector, ScoreResult};
use std::fmt::{self, Write};
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";
const BAR_WIDTH: f64 = 20.0;

fn pad(f: &mut fmt::Formatter<'_>, text: &str, width: usize) -> fmt::Result {
    f.write_str(text)?;
    for _ in UnicodeWidthStr::width(text)..width {
        f.write_char(' ')?;
    }
    Ok(())
}

/// A [`ScoreResult`] as an aligned table, one row per id.
///
/// ```text
/// unit  fear  speranza
/// 0     0.40  0.00
/// 1     0.25  0.10
/// ```
pub struct ScoreTable<'a> {
    result: &'a ScoreResult,
    label: &'a str,
}

impl<'a> ScoreTable<'a> {
    pub fn new(result: &'a ScoreResult) -> Self {
        Self { result, label: "id" }
    }

    /// Header of the id column.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }
}

impl<'a> fmt::Display for ScoreTable<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let categories: Vec<&str> = match self.result.iter().next() {
            Some((_, vector)) => vector.categories().iter().collect(),
            None => return f.write_str(self.label),
        };

        let rows: Vec<(String, Vec<String>)> = self
            .result
            .iter()
            .map(|(id, vector)| {
                let cells = vector.values().iter().map(|v| format!("{:.2}", v)).collect();
                (id.to_string(), cells)
            })
            .collect();

        let id_width = rows
            .iter()
            .map(|(id, _)| UnicodeWidthStr::width(id.as_str()))
            .chain(std::iter::once(UnicodeWidthStr::width(self.label)))
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = categories
            .iter()
            .enumerate()
            .map(|(col, name)| {
                rows.iter()
                    .filter_map(|(_, cells)| cells.get(col))
                    .map(|cell| UnicodeWidthStr::width(cell.as_str()))
                    .chain(std::iter::once(UnicodeWidthStr::width(*name)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let write_row = |f: &mut fmt::Formatter<'_>, first: &str, cells: &[&str]| -> fmt::Result {
            pad(f, first, id_width)?;
            for (col, cell) in cells.iter().enumerate() {
                f.write_str(COLUMN_GAP)?;
                if col + 1 == cells.len() {
                    f.write_str(cell)?;
                } else {
                    pad(f, cell, widths.get(col).copied().unwrap_or(0))?;
                }
            }
            Ok(())
        };

        write_row(f, self.label, &categories)?;
        for (id, cells) in &rows {
            f.write_char('\n')?;
            let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
            write_row(f, id, &cells)?;
        }
        Ok(())
    }
}

/// One vector as proportional bars, strongest category first.
///
/// ```text
/// fear      ████████ (40.0%)
/// speranza  ██ (10.0%)
/// rabbia     (0.0%)
/// ```
pub struct EmotionBars<'a> {
    vector: &'a EmotionVector,
}

impl<'a> EmotionBars<'a> {
    pub fn new(vector: &'a EmotionVector) -> Self {
        Self { vector }
    }
}

impl<'a> fmt::Display for EmotionBars<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(&str, f64)> = self.vector.iter().collect();
        // stable: ties keep category order
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let name_width = entries
            .iter()
            .map(|(name, _)| UnicodeWidthStr::width(*name))
            .max()
            .unwrap_or(0);

        for (idx, (name, value)) in entries.iter().enumerate() {
            if idx > 0 {
                f.write_char('\n')?;
            }
            pad(f, name, name_width)?;
            f.write_str(COLUMN_GAP)?;
            let bar_len = (value * BAR_WIDTH).round() as usize;
            for _ in 0..bar_len {
                f.write_char('█')?;
            }
            write!(f, " ({:.1}%)", value * 100.0)?;
        }
        Ok(())
    }
}
