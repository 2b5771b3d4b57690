//! Parallelism configuration for the sweep.
//!
//! The coordinator builds one bounded `rayon` pool per sweep and passes a
//! `Parallelism` flag down. Components never manage pools themselves: they only
//! choose between parallel and sequential iteration.

use rayon::prelude::*;

use crate::error::AppError;

/// Whether parallel execution is allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel unless the machine has a single core)
    /// - 1 = sequential
    /// - >1 = parallel
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Map every item, preserving input order.
    ///
    /// Returns only after all items are processed, in either mode.
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

/// Run a closure with the appropriate thread pool.
///
/// Thread count semantics:
/// - `0` = auto (one worker per available core)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = a pool of exactly `n` workers
pub fn run_with_threads<T: Send>(
    n_threads: usize,
    f: impl FnOnce(Parallelism) -> T + Send,
) -> Result<T, AppError> {
    match Parallelism::from_threads(n_threads) {
        Parallelism::Sequential => Ok(f(Parallelism::Sequential)),
        Parallelism::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .thread_name(|i| format!("bss-worker-{i}"))
                .build()
                .map_err(|e| AppError::new(4, format!("Failed to create thread pool: {e}")))?;
            Ok(pool.install(|| f(Parallelism::Parallel)))
        }
    }
}
