//! Word segmentation and case/diacritic folding.
//!
//! Stems and text words go through the same [`fold_word`] so that
//! `Pièta`, `pieta` and `PIETÀ` all compare equal.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

const ELISION_MARKS: &[char] = &['\'', '\u{2019}', '\u{02BC}'];

static DIACRITICS: Lazy<HashMap<char, char>> = Lazy::new(|| {
    [
        ("àáâäãå", 'a'),
        ("èéêë", 'e'),
        ("ìíîï", 'i'),
        ("òóôöõ", 'o'),
        ("ùúûü", 'u'),
        ("ç", 'c'),
        ("ñ", 'n'),
        ("ýÿ", 'y'),
    ]
    .iter()
    .flat_map(|(accented, plain)| accented.chars().map(move |c| (c, *plain)))
    .collect()
});

/// Lowercase a word and strip diacritics from its letters.
pub fn fold_word(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .map(|c| DIACRITICS.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Split text into folded words.
///
/// Word boundaries follow Unicode word segmentation, so whitespace and
/// punctuation never form words. Elided forms are split at the apostrophe:
/// `ch'ella` yields `ch` and `ella`.
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words()
        .flat_map(|word| word.split(ELISION_MARKS))
        .filter(|piece| !piece.is_empty())
        .map(fold_word)
        .collect()
}
