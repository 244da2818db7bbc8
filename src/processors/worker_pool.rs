use crate::error::{ProcessingError, Result};
use rayon::prelude::*;

/// Fixed-size pool that runs one job per task and joins on all of them.
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `job` over every task on at most `workers` threads.
    ///
    /// Returns only once every job has finished. Results come back in task
    /// order. The first failing job fails the whole run and no partial
    /// results are returned.
    pub fn run<T, R, F>(&self, tasks: Vec<T>, job: F) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R> + Sync + Send,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|index| format!("chunk-worker-{}", index))
            .build()
            .map_err(|e| ProcessingError::WorkerPool(e.to_string()))?;

        pool.install(|| tasks.into_par_iter().map(job).collect())
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
