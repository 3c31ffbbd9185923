//! Hill Break Core Library
//!
//! A 2×2 Hill cipher over the 26-letter alphabet, and a brute-force key
//! recovery tool built on top of it.
//!
//! # Overview
//!
//! Every letter is a residue mod 26 and a key is a 2×2 matrix over Z/26.
//! Encryption multiplies consecutive letter pairs by the key; decryption
//! multiplies by its inverse, which exists iff `gcd(det, 26) = 1`. The key
//! space is small enough (26⁴ matrices, 157,248 of them invertible) to search
//! exhaustively, scoring each decryption with an English heuristic.
//!
//! # Key Components
//!
//! - [`alphabet`] - Letter/residue codec, cleaning and padding
//! - [`modular`] - Extended Euclid and modular inverses
//! - [`key`] - Key matrices: determinant, inversion, parsing
//! - [`cipher`] - Block-wise encrypt/decrypt
//! - [`score`] - English plausibility heuristic
//! - [`backend`] - Sequential and thread-pool execution backends
//! - [`search`] - Exhaustive key-space search

pub mod error;
pub mod alphabet;
pub mod modular;
pub mod key;
pub mod cipher;
pub mod score;
pub mod backend;
pub mod search;

pub use error::{HillError, Result};
pub use key::{HillKey, INVERTIBLE_KEY_COUNT, KEY_SPACE};
pub use cipher::{decrypt, encrypt};
pub use score::score;
pub use backend::{Backend, CpuBackend, ParallelBackend};
pub use search::{search, Candidate, KeySearch, SearchConfig};

/// Timing and counting breakdown for one search
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub total_time: f64,
    pub scan_time: f64,
    pub merge_time: f64,
    /// Keys visited before the scan finished or was cut short
    pub keys_examined: u64,
    /// Visited keys that passed the invertibility filter
    pub invertible_keys: u64,
    /// Decryptions with a positive score (ranking mode only)
    pub candidates_retained: u64,
    pub workers: usize,
    pub backend: &'static str,
}

/// Result of a key-space search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Known plaintext found; the lowest-index matching key
    Matched(Candidate),
    /// Best candidates by score, highest first
    Ranked(Vec<Candidate>),
    /// Known plaintext was given but no invertible key produced it
    NoMatch,
}

impl SearchOutcome {
    /// All candidates carried by this outcome, best first
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            SearchOutcome::Matched(candidate) => std::slice::from_ref(candidate),
            SearchOutcome::Ranked(list) => list,
            SearchOutcome::NoMatch => &[],
        }
    }

    /// Highest-ranked candidate, if any
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates().first()
    }

    pub fn is_match(&self) -> bool {
        matches!(self, SearchOutcome::Matched(_))
    }
}

/// Whether `key` can be used for decryption
pub fn is_invertible(key: &HillKey) -> bool {
    key.is_invertible()
}
