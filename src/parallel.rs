//! File-level parallel execution of check and fix runs.
//!
//! Every file is processed independently, so results only need to be put
//! back in input order. Without the `parallel` feature everything runs
//! sequentially.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Configuration for parallel execution
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Enable/disable parallel execution
    pub enabled: bool,
    /// Number of threads to use (None = auto-detect)
    pub thread_count: Option<usize>,
    /// Minimum number of files to enable parallel execution
    pub min_file_count: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "parallel"),
            thread_count: None,
            min_file_count: 2,
        }
    }
}

/// Runs a per-file job over many files
pub struct FileParallelProcessor {
    config: ParallelConfig,
}

impl FileParallelProcessor {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(ParallelConfig::default())
    }

    /// Apply `job` to each file. Results come back in the order of `files`.
    pub fn process_files<T, F>(&self, files: &[PathBuf], job: F) -> Vec<(PathBuf, T)>
    where
        T: Send,
        F: Fn(&Path) -> T + Sync,
    {
        let timed = |path: &PathBuf| {
            let start = Instant::now();
            let result = job(path);
            let duration = start.elapsed();
            if duration.as_millis() > 1000 {
                log::debug!("File {} took {:?}", path.display(), duration);
            }
            (path.clone(), result)
        };

        if !self.should_use_parallel(files) {
            return files.iter().map(timed).collect();
        }

        self.run_parallel(files, timed)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel<T, F>(&self, files: &[PathBuf], timed: F) -> Vec<(PathBuf, T)>
    where
        T: Send,
        F: Fn(&PathBuf) -> (PathBuf, T) + Sync,
    {
        if let Some(thread_count) = self.config.thread_count {
            match rayon::ThreadPoolBuilder::new().num_threads(thread_count).build() {
                Ok(pool) => return pool.install(|| files.par_iter().map(&timed).collect()),
                Err(e) => log::warn!("Failed to set thread pool size to {thread_count}: {e}"),
            }
        }
        files.par_iter().map(&timed).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel<T, F>(&self, files: &[PathBuf], timed: F) -> Vec<(PathBuf, T)>
    where
        T: Send,
        F: Fn(&PathBuf) -> (PathBuf, T) + Sync,
    {
        files.iter().map(timed).collect()
    }

    /// Determine if file-level parallel processing should be used
    pub fn should_use_parallel(&self, files: &[PathBuf]) -> bool {
        if !self.config.enabled || files.len() < self.config.min_file_count {
            return false;
        }

        let cpu_cores = std::thread::available_parallelism().map_or(1, |n| n.get());
        cpu_cores >= 2 || self.config.thread_count.is_some_and(|n| n >= 2)
    }
}
