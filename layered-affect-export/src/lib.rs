#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Flat, serializable views of a [`PipelineRun`](layered_affect::PipelineRun).
//!
//! - [`RunExport`] - one run as window and unit records, written as JSON
//! - [`compare_dominant`] - per-unit dominant emotion of two runs side by side

mod compare;
mod records;

pub use compare::{agreement, compare_dominant, DominantComparison};
pub use records::{RunExport, UnitRecord, WindowRecord};

#[cfg(test)]
mod tests {
    mod export;
}
