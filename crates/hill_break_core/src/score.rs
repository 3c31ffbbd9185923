//! English plausibility heuristic
//!
//! A cheap integer score: higher means more English-like. All counts are
//! non-overlapping, left-to-right substring counts.

use std::borrow::Cow;

/// Common words, 10 points per occurrence
pub const COMMON_WORDS: [&str; 10] = [
    "THE", "AND", "TO", "OF", "IS", "IN", "IT", "YOU", "FOR", "THAT",
];

/// Common digrams, 2 points per occurrence
pub const COMMON_DIGRAMS: [&str; 10] = [
    "TH", "HE", "IN", "ER", "AN", "RE", "ON", "AT", "EN", "ED",
];

/// Vowels, 1 point per occurrence
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

const WORD_POINTS: u32 = 10;
const DIGRAM_POINTS: u32 = 2;

/// Non-overlapping occurrences of `needle` in `haystack`
#[inline]
fn count(haystack: &str, needle: &str) -> u32 {
    haystack.matches(needle).count() as u32
}

/// Score a letter stream, case-insensitively
pub fn score(text: &str) -> u32 {
    let text: Cow<'_, str> = if text.bytes().any(|b| b.is_ascii_lowercase()) {
        Cow::Owned(text.to_ascii_uppercase())
    } else {
        Cow::Borrowed(text)
    };
    let text = text.as_ref();

    let words: u32 = COMMON_WORDS.iter().map(|w| count(text, w)).sum();
    let vowels = text.chars().filter(|ch| VOWELS.contains(ch)).count() as u32;
    let digrams: u32 = COMMON_DIGRAMS.iter().map(|d| count(text, d)).sum();

    WORD_POINTS * words + vowels + DIGRAM_POINTS * digrams
}
