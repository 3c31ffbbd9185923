//! Backend trait for sequential/parallel dispatch
//!
//! The key-space search is split into independent slices; a backend decides
//! how those slices are executed.

use crate::error::{HillError, Result};
use rayon::prelude::*;

/// Execution backend for slice-parallel work
///
/// Implementations must return results in slice order regardless of the order
/// in which slices actually ran.
pub trait Backend: Send + Sync {
    /// Name of this backend (for reporting)
    fn name(&self) -> &'static str;

    /// Number of worker threads slices are spread across
    fn workers(&self) -> usize;

    /// Evaluate `f` for every slice in `0..slices`
    ///
    /// # Returns
    /// `vec![f(0), f(1), …, f(slices - 1)]`
    fn map_slices<T, F>(&self, slices: u32, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(u32) -> T + Send + Sync;
}

/// Single-threaded reference backend
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for CpuBackend {
    fn name(&self) -> &'static str {
        "CPU"
    }

    fn workers(&self) -> usize {
        1
    }

    fn map_slices<T, F>(&self, slices: u32, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(u32) -> T + Send + Sync,
    {
        (0..slices).map(f).collect()
    }
}

/// Fixed-size worker pool backed by rayon
pub struct ParallelBackend {
    pool: rayon::ThreadPool,
}

impl ParallelBackend {
    /// Create a pool with `threads` workers; 0 lets rayon pick one per core
    pub fn new(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("hill-search-{}", i))
            .build()
            .map_err(|e| HillError::WorkerPool(e.to_string()))?;
        Ok(Self { pool })
    }
}

impl Backend for ParallelBackend {
    fn name(&self) -> &'static str {
        "Parallel"
    }

    fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn map_slices<T, F>(&self, slices: u32, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(u32) -> T + Send + Sync,
    {
        self.pool
            .install(|| (0..slices).into_par_iter().map(f).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_backend_order() {
        let backend = CpuBackend::new();
        assert_eq!(backend.workers(), 1);
        assert_eq!(backend.map_slices(5, |i| i * i), vec![0, 1, 4, 9, 16]);
    }

    #[test]
    fn test_parallel_backend_preserves_order() {
        let backend = ParallelBackend::new(4).unwrap();
        assert_eq!(backend.workers(), 4);

        let expected: Vec<u32> = (0..1000).map(|i| i * 3).collect();
        assert_eq!(backend.map_slices(1000, |i| i * 3), expected);
    }

    #[test]
    fn test_parallel_backend_default_threads() {
        let backend = ParallelBackend::new(0).unwrap();
        assert!(backend.workers() >= 1);
        assert!(backend.map_slices(0, |i| i).is_empty());
    }
}
