//! Thread-safe configuration caching with arc-swap for lock-free reads.

use crate::loader::ConfigResult;
use crate::validator::ConfigValidator;
use crate::Config;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::debug;

/// Thread-safe configuration cache using arc-swap for lock-free reads.
#[derive(Debug)]
pub struct ConfigCache {
    config: ArcSwap<Config>,
}

impl ConfigCache {
    /// Creates a new configuration cache with the given initial configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Validates and then atomically replaces the configuration.
    ///
    /// On validation failure the current configuration stays in place.
    pub fn update(&self, config: Config) -> ConfigResult<()> {
        ConfigValidator::validate(&config)?;
        self.config.store(Arc::new(config));
        debug!("Configuration cache updated");
        Ok(())
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
