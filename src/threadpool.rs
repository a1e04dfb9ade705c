//! Worker pool for block-parallel compression and decompression.
//!
//! A thin owner of a `rayon::ThreadPool` sized from the requested worker
//! count. Jobs are submitted as indexed parallel iterators inside
//! [`WorkerPool::install`], so results come back in block order without any
//! extra reassembly queue.

use log::debug;
use rayon::ThreadPool as RayonPool;

use crate::config::NB_WORKERS_MAX;

/// Number of threads to actually run for a requested worker count.
///
/// `0` means one per logical CPU (capped at [`NB_WORKERS_MAX`]); any other
/// value is taken as is.
pub fn resolve_workers(requested: usize) -> usize {
    match requested {
        0 => num_cpus::get().clamp(1, NB_WORKERS_MAX),
        n => n,
    }
}

/// Fixed-size rayon pool.
pub struct WorkerPool {
    pool: RayonPool,
    nb_workers: usize,
}

impl WorkerPool {
    /// Build a pool of `nb_workers` threads. Returns `None` if `nb_workers`
    /// is 0 or the threads cannot be spawned.
    pub fn new(nb_workers: usize) -> Option<Self> {
        if nb_workers < 1 {
            return None;
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nb_workers)
            .thread_name(|i| format!("zyphrax-worker-{i}"))
            .build()
            .map_err(|e| debug!("worker pool with {nb_workers} threads unavailable: {e}"))
            .ok()?;
        Some(WorkerPool { pool, nb_workers })
    }

    /// Pool for a job of `nb_jobs` independent blocks, or `None` when the job
    /// should simply run on the calling thread.
    pub fn for_jobs(requested_workers: usize, nb_jobs: usize) -> Option<Self> {
        let workers = resolve_workers(requested_workers).min(nb_jobs);
        if workers <= 1 {
            return None;
        }
        WorkerPool::new(workers)
    }

    pub fn nb_workers(&self) -> usize {
        self.nb_workers
    }

    /// Run `op` inside the pool; parallel iterators used by `op` execute on
    /// the pool's threads.
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}
