//! Configuration Module
//!
//! Holds the parameters a cache is built from. Durations are (de)serialized
//! as whole milliseconds so the struct can sit inside a host service's own
//! configuration file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::MemoryAccounting;
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Ceiling on accounted bytes, base overhead included
    pub memory_budget: usize,
    /// Maximum age of an entry before it expires
    #[serde(rename = "ttl_ms", with = "duration_ms")]
    pub ttl: Duration,
    /// Interval between background expiration sweeps
    #[serde(rename = "cleanup_interval_ms", with = "duration_ms")]
    pub cleanup_interval: Duration,
    /// How each entry is charged against the budget
    pub memory_accounting: MemoryAccounting,
}

impl CacheConfig {
    /// Creates a config with the three required parameters and default
    /// cleanup interval and accounting mode.
    pub fn new(capacity: usize, memory_budget: usize, ttl: Duration) -> Self {
        Self {
            capacity,
            memory_budget,
            ttl,
            ..Self::default()
        }
    }

    /// Sets the interval between background sweeps.
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Sets the memory accounting mode.
    pub fn with_memory_accounting(mut self, accounting: MemoryAccounting) -> Self {
        self.memory_accounting = accounting;
        self
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if self.cleanup_interval.is_zero() {
            return Err(CacheError::InvalidConfiguration(
                "cleanup interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            memory_budget: 1024 * 1024,
            ttl: Duration::from_secs(300),
            cleanup_interval: Duration::from_secs(1),
            memory_accounting: MemoryAccounting::Fixed,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
