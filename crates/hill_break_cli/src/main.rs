//! Hill Break CLI
//!
//! 2×2 Hill cipher encryption and brute-force key recovery.
//!
//! # Usage
//! ```bash
//! # Encrypt / decrypt with a row-major key
//! hill-break encrypt --key "3 3 2 5" --text "hello world"
//! hill-break decrypt --key "3 3 2 5" --text HIOZEIPJQL
//!
//! # Rank every invertible key, or stop at a known plaintext fragment
//! hill-break search --ciphertext HIOZEIPJQL --top-n 20
//! hill-break search --ciphertext HIOZEIPJQL --known hello
//!
//! # Sequential vs thread-pool consistency and scaling
//! hill-break verify
//! hill-break bench --threads 1,2,4,8 --export results.csv
//!
//! # The original menu
//! hill-break interactive
//! ```

mod benchmark;
mod error;
mod menu;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use error::{CliError, Result};
use hill_break_core::{
    decrypt, encrypt, Backend, CpuBackend, HillKey, KeySearch, ParallelBackend, SearchConfig,
    SearchOutcome,
};
use std::path::PathBuf;

/// Sample ciphertext for `verify` and `bench` (a pangram under `[[7, 8], [11, 11]]`)
const SAMPLE_CIPHERTEXT: &str = "HAAMWWQCNQOGBQWRPHWLEOXPLGDRZRDTDFQOLUHACFHAWBDFCYIAJODRFXYCWAALHDYK";

#[derive(Parser)]
#[command(name = "hill-break")]
#[command(about = "2x2 Hill cipher engine and brute-force key recovery")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text with a key
    Encrypt {
        /// Four integers, row-major, separated by spaces or commas
        #[arg(long, allow_hyphen_values = true)]
        key: HillKey,

        /// Plaintext (non-letters are dropped)
        #[arg(long)]
        text: String,
    },

    /// Decrypt text with a key
    Decrypt {
        /// Four integers, row-major, separated by spaces or commas
        #[arg(long, allow_hyphen_values = true)]
        key: HillKey,

        /// Ciphertext (non-letters are dropped)
        #[arg(long)]
        text: String,
    },

    /// Try every invertible key against a ciphertext
    Search {
        /// Ciphertext, letters only
        #[arg(long)]
        ciphertext: String,

        /// Number of ranked candidates to print
        #[arg(long, default_value = "20")]
        top_n: usize,

        /// Known plaintext fragment; stops at the first key producing it
        #[arg(long)]
        known: Option<String>,

        /// Backend to use
        #[arg(long, value_enum, default_value = "parallel")]
        backend: BackendChoice,

        /// Worker threads for the parallel backend (0 = one per core)
        #[arg(long, default_value = "0")]
        threads: usize,

        /// Export ranked candidates to CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Generate random invertible keys
    Keygen {
        /// Number of keys
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Check round-trips and sequential/parallel agreement
    Verify {
        /// Ciphertext to search (defaults to a built-in sample)
        #[arg(long)]
        ciphertext: Option<String>,

        /// Number of ranked candidates compared
        #[arg(long, default_value = "20")]
        top_n: usize,

        /// Worker threads for the parallel run (0 = one per core)
        #[arg(long, default_value = "0")]
        threads: usize,
    },

    /// Time a full search across worker counts
    Bench {
        /// Worker counts (comma-separated)
        #[arg(long, default_value = "1,2,4,8")]
        threads: String,

        /// Ciphertext to search (defaults to a built-in sample)
        #[arg(long)]
        ciphertext: Option<String>,

        /// Number of ranked candidates kept
        #[arg(long, default_value = "20")]
        top_n: usize,

        /// Export results to CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Line-oriented menu
    Interactive,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BackendChoice {
    /// Single-threaded
    Cpu,
    /// rayon thread pool
    Parallel,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encrypt { key, text } => run_encrypt(&key, &text),
        Commands::Decrypt { key, text } => run_decrypt(&key, &text),
        Commands::Search {
            ciphertext,
            top_n,
            known,
            backend,
            threads,
            export,
        } => run_search(&ciphertext, top_n, known.as_deref(), backend, threads, export),
        Commands::Keygen { count } => run_keygen(count),
        Commands::Verify {
            ciphertext,
            top_n,
            threads,
        } => run_verify(ciphertext.as_deref().unwrap_or(SAMPLE_CIPHERTEXT), top_n, threads),
        Commands::Bench {
            threads,
            ciphertext,
            top_n,
            export,
        } => benchmark::parse_thread_list(&threads).and_then(|threads| {
            benchmark::run_scaling_benchmark(
                ciphertext.as_deref().unwrap_or(SAMPLE_CIPHERTEXT),
                top_n,
                &threads,
                export,
            )
        }),
        Commands::Interactive => {
            let stdin = std::io::stdin();
            menu::run_menu(stdin.lock(), std::io::stdout()).map_err(CliError::from)
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run_encrypt(key: &HillKey, text: &str) -> Result<()> {
    if !key.is_invertible() {
        println!("Warning: key {} is NOT invertible modulo 26 and cannot be used for decryption.", key);
    }
    println!("Ciphertext: {}", encrypt(key, text));
    Ok(())
}

fn run_decrypt(key: &HillKey, text: &str) -> Result<()> {
    println!("Plaintext: {}", decrypt(key, text)?);
    Ok(())
}

fn run_search(
    ciphertext: &str,
    top_n: usize,
    known: Option<&str>,
    backend: BackendChoice,
    threads: usize,
    export: Option<PathBuf>,
) -> Result<()> {
    if ciphertext.is_empty() || !ciphertext.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(CliError::InvalidInput(
            "Ciphertext must be alphabetic only.".to_string(),
        ));
    }

    let config = SearchConfig::default()
        .with_top_n(top_n)
        .with_known_plaintext(known);

    println!("Brute-forcing... (this may take a little while)");
    let (outcome, stats) = match backend {
        BackendChoice::Cpu => KeySearch::with_config(CpuBackend::new(), config).run(ciphertext),
        BackendChoice::Parallel => {
            KeySearch::with_config(ParallelBackend::new(threads)?, config).run(ciphertext)
        }
    };

    report::write_outcome(&mut std::io::stdout().lock(), &outcome)?;
    println!();
    report::print_stats(&stats);

    if let Some(path) = export {
        report::export_candidates(&path, outcome.candidates())?;
        println!("\nResults exported to: {}", path.display());
    }
    Ok(())
}

fn run_keygen(count: usize) -> Result<()> {
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let key = HillKey::random_invertible(&mut rng);
        let inverse = key.invert()?;
        let [a, b, c, d] = key.entries();
        println!("{} {} {} {}\tkey {}  inverse {}", a, b, c, d, key, inverse);
    }
    Ok(())
}

fn run_verify(ciphertext: &str, top_n: usize, threads: usize) -> Result<()> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Hill Break - Verification                   ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    // 1. Round-trip under a fresh random key
    let key = HillKey::random_invertible(&mut rand::thread_rng());
    let plaintext = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG";
    let padded = hill_break_core::alphabet::prepare(plaintext);
    let roundtrip = decrypt(&key, &encrypt(&key, plaintext))?;
    let roundtrip_ok = roundtrip == padded;
    println!("Round-trip under {}: {}", key, mark(roundtrip_ok));

    // 2. Ranked output, sequential vs parallel
    let config = SearchConfig::default().with_top_n(top_n);
    let sequential = hash_outcome(CpuBackend::new(), &config, ciphertext);
    let parallel = hash_outcome(ParallelBackend::new(threads)?, &config, ciphertext);
    let ranked_ok = sequential.0 == parallel.0;
    println!("Ranked top-{} (CPU):      {}", top_n, sequential.0);
    println!("Ranked top-{} (Parallel): {}  [{} workers]", top_n, parallel.0, parallel.1);
    println!("Ranked output identical:  {}", mark(ranked_ok));

    // 3. Known-plaintext early exit, sequential vs parallel
    let best = KeySearch::with_config(CpuBackend::new(), config.clone())
        .run(ciphertext)
        .0
        .best()
        .cloned();
    let early_ok = match best {
        Some(best) => {
            let fragment: String = best.plaintext.chars().take(6).collect();
            let known = config.clone().with_known_plaintext(Some(&fragment));
            let (seq, _) = KeySearch::with_config(CpuBackend::new(), known.clone()).run(ciphertext);
            let (par, _) = KeySearch::with_config(ParallelBackend::new(threads)?, known).run(ciphertext);
            println!("Early exit on '{}': {}", fragment, describe(&seq));
            seq == par && seq.is_match()
        }
        None => {
            println!("Early exit: skipped (no ranked candidates)");
            true
        }
    };
    println!("Early exit identical:     {}", mark(early_ok));

    if roundtrip_ok && ranked_ok && early_ok {
        println!("\nAll checks passed.");
        Ok(())
    } else {
        Err(CliError::VerificationFailed(
            "see the report above".to_string(),
        ))
    }
}

fn hash_outcome<B: Backend>(backend: B, config: &SearchConfig, ciphertext: &str) -> (String, usize) {
    let searcher = KeySearch::with_config(backend, config.clone());
    let (outcome, _stats) = searcher.run(ciphertext);
    (report::compute_result_hash(outcome.candidates()), searcher.backend().workers())
}

fn describe(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Matched(c) => format!("key {} -> {}", c.key, c.plaintext),
        SearchOutcome::Ranked(list) => format!("{} ranked candidates", list.len()),
        SearchOutcome::NoMatch => "no match".to_string(),
    }
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}
