//! # Block Cache
//!
//! In-memory cache of decoded blocks, keyed by (series key, block number,
//! normalization type). Eviction is out of scope here; the container is a
//! plain map that callers clear between scans. The cache can be bypassed
//! entirely for very large traversals where retaining blocks would only
//! churn memory.

use std::collections::HashMap;
use std::sync::Arc;

use crate::reader::block::Block;
use crate::reader::NormalizationType;

/// Cache key for one normalized block of one series.
///
/// Injective over the three components: the block number and normalization
/// tag occupy fixed trailing positions, so distinct logical blocks never
/// collide.
pub fn block_key(series_key: &str, block_number: u32, norm: NormalizationType) -> String {
    format!("{series_key}_{block_number}_{norm}")
}

/// Configuration for block caching
#[derive(Clone, Copy, Debug)]
pub struct CacheConfig {
    /// When false, every lookup misses and inserts are dropped
    pub use_cache: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { use_cache: true }
    }
}

/// Map from block key to decoded block
#[derive(Clone, Debug, Default)]
pub struct BlockCache {
    blocks: HashMap<String, Arc<Block>>,
    config: CacheConfig,
}

impl BlockCache {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            blocks: HashMap::new(),
            config,
        }
    }

    /// True if the key is cached (always false when bypassed)
    pub fn contains(&self, key: &str) -> bool {
        self.config.use_cache && self.blocks.contains_key(key)
    }

    /// Cached block for the key, if present
    pub fn get(&self, key: &str) -> Option<Arc<Block>> {
        if !self.config.use_cache {
            return None;
        }
        self.blocks.get(key).cloned()
    }

    /// Cache a decoded block (no-op when bypassed)
    pub fn insert(&mut self, key: String, block: Arc<Block>) {
        if self.config.use_cache {
            self.blocks.insert(key, block);
        }
    }

    /// Drop every cached block
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Number of cached blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
