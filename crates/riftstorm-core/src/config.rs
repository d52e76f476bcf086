//! Run configuration.
//!
//! Everything here can be overridden from JSON; omitted fields keep their
//! defaults. Gameplay tuning that is not meant to vary between runs lives in
//! [`crate::constants`].

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Pre-allocated and maximum object counts for one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolLimits {
    pub initial: usize,
    pub max: usize,
}

impl From<(usize, usize)> for PoolLimits {
    fn from((initial, max): (usize, usize)) -> Self {
        Self { initial, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub projectiles: PoolLimits,
    pub particles: PoolLimits,
    pub foes: PoolLimits,
    pub gems: PoolLimits,
    pub pickups: PoolLimits,
    pub debris: PoolLimits,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            projectiles: POOL_PROJECTILES.into(),
            particles: POOL_PARTICLES.into(),
            foes: POOL_FOES.into(),
            gems: POOL_GEMS.into(),
            pickups: POOL_PICKUPS.into(),
            debris: POOL_DEBRIS.into(),
        }
    }
}

impl PoolConfig {
    fn entries(&self) -> [(&'static str, PoolLimits); 6] {
        [
            ("projectiles", self.projectiles),
            ("particles", self.particles),
            ("foes", self.foes),
            ("gems", self.gems),
            ("pickups", self.pickups),
            ("debris", self.debris),
        ]
    }
}

/// Configuration for building a simulation aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Same seed and inputs give the same run on one machine.
    pub seed: u64,
    pub world_width: f32,
    pub world_height: f32,
    pub cell_size: f32,
    pub pools: PoolConfig,
    /// Regular spawning stops at this many live foes.
    pub max_foes: usize,
    pub initial_wave_quota: u32,
    pub quota_multiplier: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            cell_size: SPATIAL_CELL_SIZE,
            pools: PoolConfig::default(),
            max_foes: MAX_FOES,
            initial_wave_quota: INITIAL_WAVE_QUOTA,
            quota_multiplier: QUOTA_MULTIPLIER,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::InvalidWorld {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        for (category, limits) in self.pools.entries() {
            if limits.max == 0 {
                return Err(ConfigError::EmptyPool(category));
            }
            if limits.initial > limits.max {
                return Err(ConfigError::PoolInitialExceedsMax {
                    category,
                    initial: limits.initial,
                    max: limits.max,
                });
            }
        }
        if self.initial_wave_quota == 0 {
            return Err(ConfigError::ZeroQuota);
        }
        if !(self.quota_multiplier > 1.0) {
            return Err(ConfigError::InvalidQuotaMultiplier(self.quota_multiplier));
        }
        Ok(())
    }
}
