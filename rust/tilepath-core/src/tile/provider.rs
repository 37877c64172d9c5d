//! Per-floor searcher cache with LRU eviction.
//!
//! Single-threaded by construction (`RefCell` + `Rc`): the provider is neither
//! `Send` nor `Sync`, so sharing it across threads needs an outer lock.
//!
//! Searchers are created on first access and reused afterward. Nothing here
//! notices tile data changing; whoever mutates a floor calls
//! [`MultiFloorPathSearcherProvider::invalidate_floor`] (or re-registers it)
//! so the next access rebuilds.

use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::rc::Rc;

use lru::LruCache;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::map::TileMap;
use super::searcher::TileGraphSearcher;
use crate::options::{ProviderConfig, SearchOptions};

pub struct MultiFloorPathSearcherProvider {
    config: ProviderConfig,
    options: SearchOptions,
    floors: FxHashMap<i32, (i32, i32)>,
    cache: RefCell<LruCache<i32, Rc<TileGraphSearcher>>>,
}

impl MultiFloorPathSearcherProvider {
    pub fn new(options: SearchOptions, config: ProviderConfig) -> Self {
        let cap = NonZeroUsize::new(config.searcher_capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            options,
            floors: FxHashMap::default(),
            cache: RefCell::new(LruCache::new(cap)),
        }
    }

    /// Provider knowing every floor of `map`.
    pub fn from_map(map: &TileMap, options: SearchOptions, config: ProviderConfig) -> Self {
        let mut provider = Self::new(options, config);
        for floor in map.floors() {
            provider.register_floor(floor.number(), floor.width(), floor.height());
        }
        provider
    }

    /// Make `floor` routable. Re-registering drops any cached searcher for it.
    pub fn register_floor(&mut self, floor: i32, width: i32, height: i32) {
        self.floors.insert(floor, (width, height));
        self.invalidate_floor(floor);
    }

    pub fn unregister_floor(&mut self, floor: i32) -> bool {
        self.invalidate_floor(floor);
        self.floors.remove(&floor).is_some()
    }

    pub fn is_registered(&self, floor: i32) -> bool {
        self.floors.contains_key(&floor)
    }

    /// Searcher for `floor`, built on first access. `None` for an unknown floor.
    pub fn get_tile_path_searcher(&self, floor: i32) -> Option<Rc<TileGraphSearcher>> {
        let &(width, height) = self.floors.get(&floor)?;
        let mut cache = self.cache.borrow_mut();
        if let Some(hit) = cache.get(&floor) {
            return Some(Rc::clone(hit));
        }
        info!(floor, width, height, "creating floor searcher");
        let searcher = Rc::new(TileGraphSearcher::new(floor, width, height, self.options.clone()));
        if let Some((evicted, _)) = cache.push(floor, Rc::clone(&searcher)) {
            if evicted != floor {
                debug!(evicted, "evicted floor searcher");
            }
        }
        Some(searcher)
    }

    /// Drop the cached searcher of `floor`; returns whether one was cached.
    pub fn invalidate_floor(&self, floor: i32) -> bool {
        let removed = self.cache.borrow_mut().pop(&floor).is_some();
        if removed {
            debug!(floor, "invalidated floor searcher");
        }
        removed
    }

    pub fn invalidate_all(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Current number of floors with a live searcher.
    pub fn cached_floors(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn capacity(&self) -> usize {
        self.config.searcher_capacity
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}
