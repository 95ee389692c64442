use crate::composite::tile::{Tile, TileSpec};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};

/// Value key identifying a tile by everything it is derived from
///
/// Floats are keyed on their bit patterns, so two keys are equal exactly
/// when the builder would receive identical inputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TileKey {
    image_id: Option<u64>,
    tile_size: u32,
    rotation_bits: u64,
    motif_bits: u64,
    background: [u8; 4],
}

impl TileKey {
    /// Key for building `spec` from the image with `image_id`
    pub const fn new(image_id: Option<u64>, spec: &TileSpec) -> Self {
        Self {
            image_id,
            tile_size: spec.tile_size,
            rotation_bits: spec.rotation_degrees.to_bits(),
            motif_bits: spec.motif_pixel_size.to_bits(),
            background: spec.background.0,
        }
    }

    /// Identity of the source image, if any
    pub const fn image_id(&self) -> Option<u64> {
        self.image_id
    }
}

impl Hash for TileKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.image_id.hash(state);
        self.tile_size.hash(state);
        self.rotation_bits.hash(state);
        self.motif_bits.hash(state);
        self.background.hash(state);
    }
}

/// Memoization cache for built tiles
///
/// Bounded to a fixed number of entries; the oldest insertion is evicted
/// first.
pub struct TileCache {
    tiles: HashMap<TileKey, Tile>,
    insertion_order: VecDeque<TileKey>,
    capacity: usize,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TileCache {
    /// Create an empty cache with the configured capacity
    pub fn new() -> Self {
        Self::with_capacity(crate::io::configuration::MAX_CACHED_TILES)
    }

    /// Create an empty cache holding at most `capacity` tiles (minimum one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            tiles: HashMap::with_capacity(capacity),
            insertion_order: VecDeque::with_capacity(capacity),
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Retrieve a cached tile or build and store a new one
    ///
    /// Uses the provided closure to build the tile only when the key is not
    /// already cached.
    pub fn get_or_build<F>(&mut self, key: TileKey, build_fn: F) -> &Tile
    where
        F: FnOnce() -> Tile,
    {
        if !self.tiles.contains_key(&key) && self.tiles.len() >= self.capacity {
            if let Some(oldest) = self.insertion_order.pop_front() {
                self.tiles.remove(&oldest);
            }
        }

        match self.tiles.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                log::debug!("tile cache hit for {key:?}");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                log::debug!("tile cache miss for {key:?}");
                self.insertion_order.push_back(key);
                entry.insert(build_fn())
            }
        }
    }

    /// Drop every tile derived from the image with `image_id`
    pub fn invalidate_image(&mut self, image_id: u64) {
        self.tiles.retain(|key, _| key.image_id != Some(image_id));
        self.insertion_order
            .retain(|key| key.image_id != Some(image_id));
    }

    /// Drop every cached tile
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.insertion_order.clear();
    }

    /// Number of tiles currently cached
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the cache holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether a tile for `key` is cached
    pub fn contains(&self, key: &TileKey) -> bool {
        self.tiles.contains_key(key)
    }
}
