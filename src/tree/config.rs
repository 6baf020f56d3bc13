//! Configuration for tree building

use crate::reverse::DEFAULT_CHUNK_SIZE;

/// Default fraction of the root size below which entries are dropped.
pub const DEFAULT_RELATIVE_THRESHOLD: f64 = 0.0002;

/// Default number of lines between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 50_000;

/// Configuration for tree building behavior.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Entries smaller than this (in scan units) are dropped.
    pub absolute_threshold: u64,
    /// Entries smaller than this fraction of the root size are dropped.
    pub relative_threshold: f64,
    /// Bytes read per step when reading the input backward.
    pub chunk_size: usize,
    /// Report progress every N lines; 0 disables reporting.
    pub progress_interval: usize,
}

impl BuildConfig {
    /// The larger of the absolute cutoff and the relative one applied to `root_size`.
    pub fn effective_threshold(&self, root_size: u64) -> u64 {
        // f64 -> u64 casts saturate and map NaN to 0
        let relative = (self.relative_threshold * root_size as f64) as u64;
        relative.max(self.absolute_threshold)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            absolute_threshold: 0,
            relative_threshold: DEFAULT_RELATIVE_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_threshold() {
        let config = BuildConfig::default();
        assert_eq!(config.effective_threshold(10_000_000), 2_000);
        assert_eq!(config.effective_threshold(100), 0);

        let config = BuildConfig {
            absolute_threshold: 500,
            ..Default::default()
        };
        assert_eq!(config.effective_threshold(10_000_000), 2_000);
        assert_eq!(config.effective_threshold(1_000), 500);
    }

    #[test]
    fn test_effective_threshold_ignores_nonsense_fractions() {
        let config = BuildConfig {
            absolute_threshold: 3,
            relative_threshold: f64::NAN,
            ..Default::default()
        };
        assert_eq!(config.effective_threshold(1_000), 3);
    }
}
