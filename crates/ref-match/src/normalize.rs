//! Text normalization for comparison.
//!
//! Folds text so that strings differing only in case, accents, punctuation or
//! spacing compare equal:
//! - Unicode compatibility decomposition, combining marks dropped
//! - Lowercase conversion (locale-independent)
//! - Dashes, slashes and underscores become word breaks
//! - Other punctuation and symbols are removed
//! - Whitespace runs collapse to a single space

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Characters that separate words rather than belong to them.
const fn is_word_break(ch: char) -> bool {
    matches!(
        ch,
        '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '/' | '\\' | '_'
    )
}

/// Normalize text for comparison. Empty input yields an empty string.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());

    for ch in text.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            folded.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || is_word_break(ch) {
            folded.push(' ');
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize and split into a set of distinct tokens.
#[must_use]
pub fn tokenize(text: &str) -> HashSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
