//! Worker scaling benchmark
//!
//! Runs the full ranking search once on the sequential backend and once per
//! requested worker count on the thread-pool backend.

use crate::error::{CliError, Result};
use crate::report::compute_result_hash;
use hill_break_core::{Backend, CpuBackend, KeySearch, ParallelBackend, SearchConfig};
use std::path::PathBuf;

#[derive(Debug, Clone)]
struct BenchResult {
    backend: &'static str,
    workers: usize,
    total_ms: f64,
    scan_ms: f64,
    merge_ms: f64,
    result_hash: String,
}

/// Parse a comma-separated list of worker counts
pub fn parse_thread_list(list: &str) -> Result<Vec<usize>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| CliError::InvalidInput(format!("'{}' is not a worker count", s)))
        })
        .collect()
}

pub fn run_scaling_benchmark(
    ciphertext: &str,
    top_n: usize,
    threads: &[usize],
    export: Option<PathBuf>,
) -> Result<()> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Hill Break - Worker Scaling Benchmark          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Ciphertext: {}", ciphertext);
    println!("Top N:      {}", top_n);
    println!();

    let config = SearchConfig::default().with_top_n(top_n);
    let mut results = vec![run_single(CpuBackend::new(), &config, ciphertext)];
    for &n in threads {
        results.push(run_single(ParallelBackend::new(n)?, &config, ciphertext));
    }

    let baseline = results[0].total_ms;

    println!("┌──────────┬─────────┬────────────┬────────────┬────────────┬─────────┐");
    println!("│ Backend  │ Workers │  Total(ms) │   Scan(ms) │  Merge(ms) │ Speedup │");
    println!("├──────────┼─────────┼────────────┼────────────┼────────────┼─────────┤");
    for r in &results {
        println!(
            "│ {:<8} │ {:>7} │ {:>10.3} │ {:>10.3} │ {:>10.3} │ {:>6.2}x │",
            r.backend,
            r.workers,
            r.total_ms,
            r.scan_ms,
            r.merge_ms,
            baseline / r.total_ms.max(f64::EPSILON)
        );
    }
    println!("└──────────┴─────────┴────────────┴────────────┴────────────┴─────────┘");

    let consistent = results.iter().all(|r| r.result_hash == results[0].result_hash);
    println!();
    println!("Result hash: {}", results[0].result_hash);
    println!(
        "Ranked output identical across backends: {}",
        if consistent { "yes" } else { "NO" }
    );

    if let Some(path) = export {
        export_benchmark_results(&path, &results)?;
        println!("\nResults exported to: {}", path.display());
    }

    if consistent {
        Ok(())
    } else {
        Err(CliError::VerificationFailed(
            "ranked output differs between worker counts".to_string(),
        ))
    }
}

fn run_single<B: Backend>(backend: B, config: &SearchConfig, ciphertext: &str) -> BenchResult {
    let searcher = KeySearch::with_config(backend, config.clone());
    let (outcome, stats) = searcher.run(ciphertext);

    BenchResult {
        backend: stats.backend,
        workers: stats.workers,
        total_ms: stats.total_time * 1000.0,
        scan_ms: stats.scan_time * 1000.0,
        merge_ms: stats.merge_time * 1000.0,
        result_hash: compute_result_hash(outcome.candidates()),
    }
}

fn export_benchmark_results(path: &PathBuf, results: &[BenchResult]) -> Result<()> {
    use std::fs::File;
    use std::io::Write;

    let mut file = File::create(path)?;
    writeln!(file, "backend,workers,total_ms,scan_ms,merge_ms,result_hash")?;
    for r in results {
        writeln!(
            file,
            "{},{},{:.6},{:.6},{:.6},{}",
            r.backend, r.workers, r.total_ms, r.scan_ms, r.merge_ms, r.result_hash
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_thread_list() {
        assert_eq!(parse_thread_list("1,2, 4 ,8").unwrap(), vec![1, 2, 4, 8]);
        assert_eq!(parse_thread_list("").unwrap(), Vec::<usize>::new());
        assert!(matches!(
            parse_thread_list("1,two"),
            Err(CliError::InvalidInput(_))
        ));
    }
}
