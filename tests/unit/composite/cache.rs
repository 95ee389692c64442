//! Tests for tile caching behavior including hit/miss tracking and invalidation

#[cfg(test)]
mod tests {
    use image::Rgba;
    use motiftile::composite::cache::{TileCache, TileKey};
    use motiftile::composite::tile::{Tile, TileSpec, build_tile_with_fill};

    fn spec(tile_size: u32, rotation_degrees: f64) -> TileSpec {
        TileSpec {
            tile_size,
            rotation_degrees,
            motif_pixel_size: 40.0,
            background: Rgba([1, 2, 3, 255]),
        }
    }

    fn blank(spec: &TileSpec) -> Tile {
        build_tile_with_fill(None, spec)
    }

    // Verifies new cache starts with 0 hits and 0 misses
    // Verified by initializing cache with non-zero hit and miss counts
    #[test]
    fn test_cache_new() {
        let cache = TileCache::new();
        assert_eq!(cache.stats.hits, 0);
        assert_eq!(cache.stats.misses, 0);
        assert!(cache.is_empty());
    }

    // Tests keys compare by value across separately built specs
    // Verified by making key equality always return false
    #[test]
    fn test_tile_key_equality() {
        let key = TileKey::new(Some(7), &spec(64, 15.0));
        let same = TileKey::new(Some(7), &spec(64, 15.0));
        let rotated = TileKey::new(Some(7), &spec(64, 15.5));
        let other_image = TileKey::new(Some(8), &spec(64, 15.0));
        let no_image = TileKey::new(None, &spec(64, 15.0));

        assert_eq!(key, same);
        assert_ne!(key, rotated);
        assert_ne!(key, other_image);
        assert_ne!(key, no_image);
        assert_eq!(key.image_id(), Some(7));
    }

    // Tests cache miss on first access and hit on second
    // Verified by removing hit counter increment logic
    #[test]
    fn test_cache_miss_and_hit() {
        let mut cache = TileCache::new();
        let first_spec = spec(16, 0.0);
        let key = TileKey::new(Some(1), &first_spec);

        let mut build_count = 0;
        let first = cache
            .get_or_build(key, || {
                build_count += 1;
                blank(&first_spec)
            })
            .clone();

        assert_eq!(cache.stats.misses, 1);
        assert_eq!(cache.stats.hits, 0);

        let second = cache
            .get_or_build(key, || {
                build_count += 1;
                blank(&spec(32, 0.0))
            })
            .clone();

        assert_eq!(cache.stats.hits, 1);
        assert_eq!(cache.stats.misses, 1);
        assert_eq!(build_count, 1);
        assert_eq!(first, second);
        assert_eq!(second.size(), 16);
    }

    // Tests oldest entries are evicted once capacity is reached
    // Verified by evicting the newest entry instead
    #[test]
    fn test_cache_evicts_oldest() {
        let mut cache = TileCache::with_capacity(2);
        let keys: Vec<TileKey> = (0..3)
            .map(|i| TileKey::new(Some(i), &spec(8, 0.0)))
            .collect();

        for key in &keys {
            cache.get_or_build(*key, || blank(&spec(8, 0.0)));
        }

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&keys[0]));
        assert!(cache.contains(&keys[1]));
        assert!(cache.contains(&keys[2]));
    }

    // Tests hits do not count against capacity
    // Verified by evicting before checking for an existing entry
    #[test]
    fn test_cache_hit_at_capacity_keeps_entries() {
        let mut cache = TileCache::with_capacity(1);
        let key = TileKey::new(Some(1), &spec(8, 0.0));

        cache.get_or_build(key, || blank(&spec(8, 0.0)));
        cache.get_or_build(key, || blank(&spec(8, 0.0)));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats.hits, 1);
    }

    // Tests invalidation drops only tiles of the given image
    // Verified by clearing the whole cache on invalidation
    #[test]
    fn test_invalidate_image() {
        let mut cache = TileCache::new();
        let ours = TileKey::new(Some(5), &spec(8, 0.0));
        let ours_rotated = TileKey::new(Some(5), &spec(8, 90.0));
        let theirs = TileKey::new(Some(6), &spec(8, 0.0));
        let background_only = TileKey::new(None, &spec(8, 0.0));

        for key in [ours, ours_rotated, theirs, background_only] {
            cache.get_or_build(key, || blank(&spec(8, 0.0)));
        }

        cache.invalidate_image(5);

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&ours));
        assert!(!cache.contains(&ours_rotated));
        assert!(cache.contains(&theirs));
        assert!(cache.contains(&background_only));

        cache.clear();
        assert!(cache.is_empty());
    }
}
