//! Error types.

use thiserror::Error;

/// Rejected simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidWorld { width: f32, height: f32 },
    #[error("spatial cell size must be positive, got {0}")]
    InvalidCellSize(f32),
    #[error("pool `{category}` has initial {initial} above max {max}")]
    PoolInitialExceedsMax {
        category: &'static str,
        initial: usize,
        max: usize,
    },
    #[error("pool `{0}` must allow at least one object")]
    EmptyPool(&'static str),
    #[error("wave quota must be at least 1")]
    ZeroQuota,
    #[error("quota multiplier must be greater than 1.0, got {0}")]
    InvalidQuotaMultiplier(f64),
}
