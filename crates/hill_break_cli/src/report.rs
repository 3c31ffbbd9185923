//! Rendering of search results
//!
//! Plain-text listings, the stats box, SHA-256 result fingerprints and CSV
//! export.

use hill_break_core::{Candidate, SearchOutcome, SearchStats};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Write a match, a ranked list or the no-result message
pub fn write_outcome<W: Write>(out: &mut W, outcome: &SearchOutcome) -> io::Result<()> {
    match outcome {
        SearchOutcome::Matched(c) => writeln!(
            out,
            "Match found: key {} -> plaintext: {} (score {})",
            c.key, c.plaintext, c.score
        ),
        SearchOutcome::Ranked(list) if !list.is_empty() => {
            writeln!(out, "Top {} candidates:", list.len())?;
            for (idx, c) in list.iter().enumerate() {
                writeln!(
                    out,
                    "{:2}. key {} -> {} (score {})",
                    idx + 1,
                    c.key,
                    c.plaintext,
                    c.score
                )?;
            }
            Ok(())
        }
        _ => writeln!(
            out,
            "No high-scoring candidates found (or none matched the known substring)."
        ),
    }
}

pub fn print_stats(stats: &SearchStats) {
    println!("┌──────────────────────┬──────────────────┐");
    println!("│ Backend              │ {:>16} │", stats.backend);
    println!("│ Workers              │ {:>16} │", stats.workers);
    println!("│ Keys examined        │ {:>16} │", stats.keys_examined);
    println!("│ Invertible keys      │ {:>16} │", stats.invertible_keys);
    println!("│ Candidates retained  │ {:>16} │", stats.candidates_retained);
    println!("│ Scan (ms)            │ {:>16.3} │", stats.scan_time * 1000.0);
    println!("│ Merge (ms)           │ {:>16.3} │", stats.merge_time * 1000.0);
    println!("│ Total (ms)           │ {:>16.3} │", stats.total_time * 1000.0);
    println!("└──────────────────────┴──────────────────┘");
}

/// SHA-256 over the ranked candidates, for comparing runs
pub fn compute_result_hash(candidates: &[Candidate]) -> String {
    let mut hasher = Sha256::new();

    for c in candidates {
        for entry in c.key.entries() {
            hasher.update(entry.to_le_bytes());
        }
        hasher.update(c.score.to_le_bytes());
        hasher.update(c.plaintext.as_bytes());
        hasher.update([0u8]);
    }

    format!("{:x}", hasher.finalize())
}

/// CSV with one row per candidate
pub fn export_candidates(path: &Path, candidates: &[Candidate]) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "rank,a,b,c,d,score,plaintext")?;
    for (idx, c) in candidates.iter().enumerate() {
        let [a, b, cc, d] = c.key.entries();
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            idx + 1,
            a,
            b,
            cc,
            d,
            c.score,
            c.plaintext
        )?;
    }
    Ok(())
}
