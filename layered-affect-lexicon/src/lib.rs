#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Keyword-lexicon emotion scoring for layered-affect.
//!
//! - [`Lexicon`] - validated category → trigger stem data, loaded from JSON
//! - [`LexiconScorer`] - share of words matching each category's stems
//! - [`words`] / [`fold_word`] - the word segmentation and folding both
//!   sides of a match go through
//!
//! The method is transparent: [`LexiconScorer::explain`] reports exactly
//! which words produced each intensity.

mod lexicon;
mod scorer;
mod words;

pub use lexicon::Lexicon;
pub use scorer::{LexiconReport, LexiconScorer, WordMatch};
pub use words::{fold_word, words};
