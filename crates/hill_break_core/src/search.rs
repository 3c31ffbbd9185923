//! Exhaustive key-space search
//!
//! Tries every 2×2 key over Z/26 (26⁴ = 456,976 matrices), skips the singular
//! ones, decrypts the ciphertext under the rest and either
//! - stops at the first key whose plaintext contains a known fragment, or
//! - ranks all keys with a positive plausibility score.
//!
//! # Partitioning
//!
//! The enumeration is row-major over `(a, b, c, d)`. It is cut into 676
//! slices on the `(a, b)` prefix, each covering 676 consecutive keys. Slices
//! are independent and the backend may run them in any order; results are
//! merged by `(score desc, enumeration index asc)`, so the ranked output does
//! not depend on the backend or worker count.
//!
//! In known-plaintext mode the workers share one atomic holding the lowest
//! matching enumeration index found so far. A worker stops as soon as its
//! current index passes it, so the reported match is always the first one in
//! enumeration order.

use crate::alphabet::{prepare, to_letters_into, to_residues};
use crate::backend::{Backend, ParallelBackend};
use crate::cipher::apply_into;
use crate::error::Result;
use crate::key::HillKey;
use crate::score::score;
use crate::{SearchOutcome, SearchStats};
use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicUsize};
use std::time::Instant;

/// Number of slices the key space is cut into
pub const SLICE_COUNT: u32 = 26 * 26;

/// Keys per slice
const SLICE_LEN: usize = 26 * 26;

/// Sentinel for "no match yet"
const NO_MATCH: usize = usize::MAX;

/// A key together with the plaintext it produces and that plaintext's score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: HillKey,
    pub plaintext: String,
    pub score: u32,
}

impl Candidate {
    /// Ranking order: score descending, then enumeration index ascending
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Search parameters
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of ranked candidates to return
    pub top_n: usize,
    /// Uppercased known-plaintext fragment; `None` selects ranking mode
    pub known_plaintext: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            known_plaintext: None,
        }
    }
}

impl SearchConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the known-plaintext fragment
    ///
    /// The fragment is trimmed and uppercased but otherwise kept as given, so
    /// one containing non-letters can never match. A blank fragment disables
    /// known-plaintext mode.
    pub fn with_known_plaintext(mut self, fragment: Option<&str>) -> Self {
        self.known_plaintext = fragment
            .map(|f| f.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty());
        self
    }
}

/// Per-slice partial result
#[derive(Debug, Default)]
struct SliceScan {
    matched: Option<Candidate>,
    retained: Vec<Candidate>,
    scored: u64,
    examined: u64,
    invertible: u64,
}

/// Key-space search driver
pub struct KeySearch<B: Backend> {
    backend: B,
    config: SearchConfig,
}

impl<B: Backend> KeySearch<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, SearchConfig::default())
    }

    pub fn with_config(backend: B, config: SearchConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Search the full key space for `ciphertext`
    ///
    /// The ciphertext is cleaned and padded first.
    ///
    /// # Returns
    /// * The match, ranked list or `NoMatch`
    /// * Timing and counting statistics
    pub fn run(&self, ciphertext: &str) -> (SearchOutcome, SearchStats) {
        let mut stats = SearchStats {
            backend: self.backend.name(),
            workers: self.backend.workers(),
            ..SearchStats::default()
        };
        let start = Instant::now();

        let residues = to_residues(&prepare(ciphertext));
        let known = self.config.known_plaintext.as_deref();
        let best_match = AtomicUsize::new(NO_MATCH);

        let scan_start = Instant::now();
        let slices = self.backend.map_slices(SLICE_COUNT, |slice| {
            self.scan_slice(slice, &residues, known, &best_match)
        });
        stats.scan_time = scan_start.elapsed().as_secs_f64();

        let merge_start = Instant::now();
        for slice in &slices {
            stats.keys_examined += slice.examined;
            stats.invertible_keys += slice.invertible;
            stats.candidates_retained += slice.scored;
        }

        let outcome = if known.is_some() {
            // Slices come back in enumeration order, so the first hit is the lowest index.
            match slices.into_iter().find_map(|s| s.matched) {
                Some(candidate) => SearchOutcome::Matched(candidate),
                None => SearchOutcome::NoMatch,
            }
        } else {
            let mut ranked: Vec<Candidate> = slices.into_iter().flat_map(|s| s.retained).collect();
            ranked.sort_by(Candidate::rank_cmp);
            ranked.truncate(self.config.top_n);
            SearchOutcome::Ranked(ranked)
        };
        stats.merge_time = merge_start.elapsed().as_secs_f64();
        stats.total_time = start.elapsed().as_secs_f64();

        (outcome, stats)
    }

    /// Scan the 676 keys sharing the `(a, b)` prefix encoded by `slice`
    fn scan_slice(
        &self,
        slice: u32,
        residues: &[u32],
        known: Option<&str>,
        best_match: &AtomicUsize,
    ) -> SliceScan {
        let mut scan = SliceScan::default();
        let mut decoded = Vec::with_capacity(residues.len());
        let mut plaintext = String::with_capacity(residues.len());

        let first = slice as usize * SLICE_LEN;
        for index in first..first + SLICE_LEN {
            if index > best_match.load(atomic::Ordering::Relaxed) {
                break;
            }
            scan.examined += 1;

            let key = HillKey::from_index(index);
            if !key.is_invertible() {
                continue;
            }
            scan.invertible += 1;

            let inverse = match key.invert() {
                Ok(inverse) => inverse,
                Err(_) => continue,
            };
            apply_into(&inverse, residues, &mut decoded);
            to_letters_into(&decoded, &mut plaintext);

            match known {
                Some(fragment) => {
                    if plaintext.contains(fragment) {
                        best_match.fetch_min(index, atomic::Ordering::AcqRel);
                        scan.matched = Some(Candidate {
                            key,
                            score: score(&plaintext),
                            plaintext,
                        });
                        break;
                    }
                }
                None => {
                    let value = score(&plaintext);
                    if value > 0 {
                        scan.scored += 1;
                        scan.retained.push(Candidate {
                            key,
                            plaintext: plaintext.clone(),
                            score: value,
                        });
                    }
                }
            }
        }

        // Only the local top-N can reach the global top-N.
        scan.retained.sort_by(Candidate::rank_cmp);
        scan.retained.truncate(self.config.top_n);
        scan
    }
}

/// Search with the parallel backend and rayon's default worker count
pub fn search(ciphertext: &str, top_n: usize, known_plaintext: Option<&str>) -> Result<SearchOutcome> {
    let config = SearchConfig::default()
        .with_top_n(top_n)
        .with_known_plaintext(known_plaintext);
    let searcher = KeySearch::with_config(ParallelBackend::new(0)?, config);
    let (outcome, _stats) = searcher.run(ciphertext);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;
    use crate::cipher::{decrypt, encrypt};
    use crate::key::INVERTIBLE_KEY_COUNT;

    const PANGRAM: &str = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOGANDTHENTHATDOGISINTHEHOUSEWITHYOU";

    fn ranked(outcome: SearchOutcome) -> Vec<Candidate> {
        match outcome {
            SearchOutcome::Ranked(list) => list,
            other => panic!("expected ranked list, got {:?}", other),
        }
    }

    #[test]
    fn test_known_plaintext_early_exit() {
        let key = HillKey::new(3, 3, 2, 5);
        let ciphertext = encrypt(&key, "HELLOWORLD");

        let config = SearchConfig::default().with_known_plaintext(Some("hello"));
        let (outcome, stats) = KeySearch::with_config(CpuBackend::new(), config).run(&ciphertext);

        let found = match outcome {
            SearchOutcome::Matched(candidate) => candidate,
            other => panic!("expected a match, got {:?}", other),
        };
        assert!(found.plaintext.contains("HELLO"));
        assert_eq!(decrypt(&found.key, &ciphertext).unwrap(), found.plaintext);
        assert_eq!(found.score, score(&found.plaintext));
        assert!(stats.keys_examined < crate::key::KEY_SPACE as u64);
    }

    #[test]
    fn test_full_known_plaintext_recovers_key() {
        let key = HillKey::new(3, 3, 2, 5);
        let ciphertext = encrypt(&key, "HELLOWORLD");

        let outcome = search(&ciphertext, 1, Some("HELLOWORLD")).unwrap();
        match outcome {
            SearchOutcome::Matched(candidate) => {
                assert_eq!(candidate.key, key);
                assert_eq!(candidate.plaintext, "HELLOWORLD");
                assert_eq!(candidate.score, 5);
                assert_eq!(decrypt(&candidate.key, &ciphertext).unwrap(), "HELLOWORLD");
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_early_exit_identical_across_backends() {
        let ciphertext = encrypt(&HillKey::new(7, 8, 11, 11), PANGRAM);
        let config = SearchConfig::default().with_known_plaintext(Some("THE"));

        let (sequential, _) = KeySearch::with_config(CpuBackend::new(), config.clone()).run(&ciphertext);
        for threads in [2, 4, 8] {
            let backend = ParallelBackend::new(threads).unwrap();
            let (parallel, _) = KeySearch::with_config(backend, config.clone()).run(&ciphertext);
            assert_eq!(parallel, sequential, "threads = {}", threads);
        }
    }

    #[test]
    fn test_known_plaintext_no_match() {
        let ciphertext = encrypt(&HillKey::new(3, 3, 2, 5), "HELLOWORLD");
        let outcome = search(&ciphertext, 5, Some("QQQQQQQQQQQQ")).unwrap();
        assert_eq!(outcome, SearchOutcome::NoMatch);
    }

    #[test]
    fn test_fragment_normalisation() {
        let config = SearchConfig::default().with_known_plaintext(Some("  hello "));
        assert_eq!(config.known_plaintext.as_deref(), Some("HELLO"));

        let config = SearchConfig::default().with_known_plaintext(Some("   "));
        assert_eq!(config.known_plaintext, None);
        let config = SearchConfig::default().with_known_plaintext(None);
        assert_eq!(config.known_plaintext, None);
    }

    #[test]
    fn test_non_letter_fragment_never_matches() {
        let ciphertext = encrypt(&HillKey::new(3, 3, 2, 5), "HELLOWORLD");

        let config = SearchConfig::default().with_top_n(2).with_known_plaintext(Some("12"));
        let (outcome, stats) = KeySearch::with_config(CpuBackend::new(), config).run(&ciphertext);
        assert_eq!(outcome, SearchOutcome::NoMatch);
        assert_eq!(stats.keys_examined, crate::key::KEY_SPACE as u64);

        let outcome = search(&ciphertext, 2, Some("HELLO WORLD")).unwrap();
        assert_eq!(outcome, SearchOutcome::NoMatch);
    }

    #[test]
    fn test_parallel_early_exit_stops_scanning() {
        // index 19,011, slice 28 of 676
        let key = HillKey::new(1, 2, 3, 5);
        let ciphertext = encrypt(&key, "HELLOWORLD");
        let config = SearchConfig::default().with_known_plaintext(Some("helloworld"));

        let backend = ParallelBackend::new(4).unwrap();
        let (outcome, stats) = KeySearch::with_config(backend, config).run(&ciphertext);

        match outcome {
            SearchOutcome::Matched(candidate) => assert_eq!(candidate.key, key),
            other => panic!("expected a match, got {:?}", other),
        }
        assert_eq!(stats.workers, 4);
        assert!(stats.keys_examined >= key.index() as u64 + 1);
        assert!(stats.keys_examined < crate::key::KEY_SPACE as u64);
    }

    #[test]
    fn test_default_searcher_ranks() {
        let ciphertext = encrypt(&HillKey::new(7, 8, 11, 11), PANGRAM);
        let searcher = KeySearch::new(CpuBackend::new());
        assert_eq!(searcher.backend().workers(), 1);

        let top = ranked(searcher.run(&ciphertext).0);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].key, HillKey::new(7, 8, 11, 11));
        assert_eq!(top[0].score, 154);
    }

    #[test]
    fn test_ranked_top_candidates() {
        let ciphertext = encrypt(&HillKey::new(7, 8, 11, 11), PANGRAM);
        assert_eq!(
            ciphertext,
            "HAAMWWQCNQOGBQWRPHWLEOXPLGDRZRDTDFQOLUHACFHAWBDFCYIAJODRFXYCWAALHDYK"
        );

        let config = SearchConfig::default().with_top_n(5);
        let (outcome, stats) = KeySearch::with_config(CpuBackend::new(), config).run(&ciphertext);
        let top = ranked(outcome);

        let expected = [
            (HillKey::new(7, 8, 11, 11), PANGRAM, 154),
            (HillKey::new(15, 21, 20, 23), "TOUIGYWQFCWGREPZONFVCACRZAINMFUXOFQYFSTOPDTOXXOFMUSQXKINQVOGESBDYDKU", 96),
            (HillKey::new(25, 9, 5, 2), "ITUIQKIUSPAQIBZLJUPHSODAETHEVITONWCCKLITXXITHJNWUOYSUJHEXGGMOEBDNICA", 94),
            (HillKey::new(25, 22, 17, 7), "RHOQYIWKXRCWFFQXJUWPSONERTHEBAFYTOKADDRHYNRHGTTOSIMITTHEROISUWCTBYAU", 92),
            (HillKey::new(18, 1, 15, 6), "ITUEQUICSBAOINZOJJPMSSDVERHHVLTZNDCGKNITXEITHANDUGYSUNHHXHGUOEBINHCO", 91),
        ];
        assert_eq!(top.len(), expected.len());
        for (candidate, (key, plaintext, value)) in top.iter().zip(expected) {
            assert_eq!(candidate.key, key);
            assert_eq!(candidate.plaintext, plaintext);
            assert_eq!(candidate.score, value);
        }

        assert_eq!(stats.keys_examined, crate::key::KEY_SPACE as u64);
        assert_eq!(stats.invertible_keys, INVERTIBLE_KEY_COUNT as u64);
        assert_eq!(stats.workers, 1);
    }

    #[test]
    fn test_ranked_identical_across_backends() {
        let ciphertext = encrypt(&HillKey::new(5, 17, 4, 15), "MEETMEINTHEPARKATNOON");
        let config = SearchConfig::default().with_top_n(25);

        let (sequential, _) = KeySearch::with_config(CpuBackend::new(), config.clone()).run(&ciphertext);
        let backend = ParallelBackend::new(4).unwrap();
        let (parallel, stats) = KeySearch::with_config(backend, config).run(&ciphertext);

        assert_eq!(ranked(parallel), ranked(sequential));
        assert_eq!(stats.workers, 4);
        assert_eq!(stats.invertible_keys, INVERTIBLE_KEY_COUNT as u64);
    }

    #[test]
    fn test_ranked_ordering_contract() {
        let ciphertext = encrypt(&HillKey::new(3, 3, 2, 5), "ATTACKATDAWN");
        let list = ranked(search(&ciphertext, 200, None).unwrap());

        assert_eq!(list.len(), 200);
        for pair in list.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].key.index() < pair[1].key.index());
            }
        }
        assert!(list.iter().all(|c| c.score > 0));
    }

    #[test]
    fn test_empty_ciphertext_and_zero_top_n() {
        assert_eq!(ranked(search("", 10, None).unwrap()), Vec::new());

        let ciphertext = encrypt(&HillKey::new(3, 3, 2, 5), "HELLOWORLD");
        assert_eq!(ranked(search(&ciphertext, 0, None).unwrap()), Vec::new());
    }
}
