//! Iteration configuration.
//!
//! [`IterationConfig`] decides how [`ImgBase::for_each_with`](crate::ImgBase::for_each_with)
//! and the closure helpers split an image into partitions and whether the
//! partitions run on the rayon pool.
//!
//! # Environment Variables
//!
//! Read by [`IterationConfig::from_env`]:
//!
//! - `PIXKIT_SEQUENTIAL` - run on the calling thread ("1" or "true")
//! - `PIXKIT_PARTITION_LEN` - fixed partition length in pixels
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::IterationConfig;
//!
//! let cfg = IterationConfig::default().with_partition_len(4096);
//! assert!(cfg.parallel);
//! assert_eq!(cfg.partition_len_for(10_000), 4096);
//!
//! let seq = IterationConfig::sequential();
//! assert_eq!(seq.partition_len_for(10_000), 10_000);
//! ```

use std::env;
use std::fmt;
use std::sync::Arc;

use rayon::ThreadPool;

use crate::{Error, Result};

/// Smallest partition chosen automatically.
///
/// Explicit [`IterationConfig::partition_len`] values are not limited by this.
pub const MIN_PARTITION_LEN: usize = 1024;

/// Partitions per worker thread when the length is chosen automatically.
pub const PARTITIONS_PER_THREAD: usize = 4;

/// Controls how an image is partitioned and executed.
#[derive(Clone)]
pub struct IterationConfig {
    /// Run partitions on the rayon pool. When `false`, a single partition
    /// covers the whole image and runs on the calling thread.
    pub parallel: bool,
    /// Pixels per partition (`None` = auto).
    pub partition_len: Option<usize>,
    /// Pool to run on (`None` = rayon's global pool).
    pub pool: Option<Arc<ThreadPool>>,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            partition_len: None,
            pool: None,
        }
    }
}

impl fmt::Debug for IterationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterationConfig")
            .field("parallel", &self.parallel)
            .field("partition_len", &self.partition_len)
            .field("pool_threads", &self.pool.as_ref().map(|p| p.current_num_threads()))
            .finish()
    }
}

impl IterationConfig {
    /// Parallel execution on the global pool with automatic partitioning.
    pub fn parallel() -> Self {
        Self::default()
    }

    /// Single partition, ascending index order, calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Default config with environment overrides applied.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if sequential_override() {
            cfg.parallel = false;
        }
        if let Some(len) = partition_len_override() {
            cfg.partition_len = Some(len);
        }
        cfg
    }

    /// Sets a fixed partition length (values below 1 are treated as 1).
    pub fn with_partition_len(mut self, len: usize) -> Self {
        self.partition_len = Some(len.max(1));
        self
    }

    /// Runs partitions on `pool` instead of the global pool.
    pub fn with_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Builds a dedicated pool with `threads` workers.
    pub fn with_threads(self, threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| Error::other(format!("failed to build thread pool: {e}")))?;
        Ok(self.with_pool(Arc::new(pool)))
    }

    /// Number of worker threads partitions are spread over.
    pub fn num_threads(&self) -> usize {
        if !self.parallel {
            return 1;
        }
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Partition length for an image of `num_values` pixels.
    ///
    /// Sequential configs always use one partition. Otherwise the explicit
    /// length wins, and the automatic length aims at
    /// [`PARTITIONS_PER_THREAD`] partitions per worker but never drops below
    /// [`MIN_PARTITION_LEN`].
    pub fn partition_len_for(&self, num_values: usize) -> usize {
        if !self.parallel {
            return num_values.max(1);
        }
        if let Some(len) = self.partition_len {
            return len.max(1);
        }
        let target = self.num_threads() * PARTITIONS_PER_THREAD;
        num_values.div_ceil(target.max(1)).max(MIN_PARTITION_LEN)
    }
}

/// Check `PIXKIT_SEQUENTIAL`.
pub fn sequential_override() -> bool {
    env::var("PIXKIT_SEQUENTIAL")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Parse `PIXKIT_PARTITION_LEN`.
pub fn partition_len_override() -> Option<usize> {
    env::var("PIXKIT_PARTITION_LEN")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|&len| len > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_single_partition() {
        let cfg = IterationConfig::sequential().with_partition_len(16);
        assert_eq!(cfg.partition_len_for(1000), 1000);
        assert_eq!(cfg.num_threads(), 1);
    }

    #[test]
    fn test_auto_partition_len() {
        let cfg = IterationConfig::default().with_threads(2).unwrap();
        assert_eq!(cfg.num_threads(), 2);
        // 2 threads * 4 partitions
        assert_eq!(cfg.partition_len_for(80_000), 10_000);
        assert_eq!(cfg.partition_len_for(100), MIN_PARTITION_LEN);
    }

    // Both variables in one test, so nothing else races on them.
    #[test]
    fn test_env_overrides() {
        const SEQ: &str = "PIXKIT_SEQUENTIAL";
        const LEN: &str = "PIXKIT_PARTITION_LEN";

        // SAFETY: no other test in this crate reads or writes these variables.
        let set = |key: &str, value: &str| unsafe { env::set_var(key, value) };
        let unset = |key: &str| unsafe { env::remove_var(key) };

        unset(SEQ);
        unset(LEN);
        assert!(!sequential_override());
        assert_eq!(partition_len_override(), None);
        let cfg = IterationConfig::from_env();
        assert!(cfg.parallel);
        assert_eq!(cfg.partition_len, None);

        for (value, expected) in [("1", true), ("true", true), ("TRUE", true), ("yes", false), ("0", false)] {
            set(SEQ, value);
            assert_eq!(sequential_override(), expected, "{SEQ}={value:?}");
            assert_eq!(IterationConfig::from_env().parallel, !expected, "{SEQ}={value:?}");
        }
        unset(SEQ);

        for (value, expected) in [("0", None), ("abc", None), ("-5", None), (" 64 ", Some(64)), ("4096", Some(4096))] {
            set(LEN, value);
            assert_eq!(partition_len_override(), expected, "{LEN}={value:?}");
            assert_eq!(IterationConfig::from_env().partition_len, expected, "{LEN}={value:?}");
        }

        set(SEQ, "1");
        set(LEN, "64");
        let cfg = IterationConfig::from_env();
        assert!(!cfg.parallel);
        // sequential still wins over the partition length
        assert_eq!(cfg.partition_len_for(1000), 1000);

        unset(SEQ);
        unset(LEN);
    }

    #[test]
    fn test_explicit_partition_len() {
        let cfg = IterationConfig::default().with_partition_len(0);
        assert_eq!(cfg.partition_len, Some(1));
        assert_eq!(cfg.partition_len_for(5), 1);
    }
}
