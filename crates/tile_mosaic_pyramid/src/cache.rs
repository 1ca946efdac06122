use crate::assemble::LazyPlane;
use crate::error::Result;
use crate::grid::PixelGrid;
use crate::synth::TileSource;
use crate::SmallKeyHashMap;

use tile_mosaic_core::PlaneId;

use std::collections::hash_map::Entry;

/// A memo table of realized planes, keyed by plane id.
///
/// Tile generation is pure, so a realized plane stays valid for as long as the cache lives.
/// A viewer scrubbing back and forth along `t` or `z` hits the map instead of regenerating
/// tiles. The caller owns the cache and decides when the pixels get dropped.
#[derive(Clone, Debug, Default)]
pub struct PlaneCache {
    planes: SmallKeyHashMap<PlaneId, PixelGrid>,
}

impl PlaneCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// The cached pixels of `id`, if that plane has been realized.
    #[inline]
    pub fn get(&self, id: &PlaneId) -> Option<&PixelGrid> {
        self.planes.get(id)
    }

    /// The pixels of `plane`, realizing and caching them on the first request.
    pub fn get_or_realize<S>(&mut self, plane: &LazyPlane, source: &S) -> Result<&PixelGrid>
    where
        S: TileSource + Sync,
    {
        match self.planes.entry(plane.id()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(plane.realize(source)?)),
        }
    }

    /// Drops every cached plane.
    pub fn clear(&mut self) {
        self.planes.clear();
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::SyntheticTiles;

    use tile_mosaic_core::{Point2i, TileId};

    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps a source and counts how many tiles it was asked for.
    struct CountingSource {
        inner: SyntheticTiles,
        tiles_requested: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                inner: SyntheticTiles,
                tiles_requested: AtomicUsize::new(0),
            }
        }
    }

    impl TileSource for CountingSource {
        fn tile(&self, id: &TileId) -> Result<PixelGrid> {
            self.tiles_requested.fetch_add(1, Ordering::SeqCst);

            self.inner.tile(id)
        }
    }

    fn test_plane(t: i32) -> LazyPlane {
        let id = PlaneId {
            level: 0,
            t,
            c: 0,
            z: 0,
        };

        LazyPlane::new(id, Point2i([20, 10]), Point2i([8, 8]))
    }

    #[test]
    fn second_request_hits_the_cache() {
        let mut cache = PlaneCache::new();
        let source = CountingSource::new();
        let plane = test_plane(0);

        let first = cache.get_or_realize(&plane, &source).unwrap().clone();
        assert_eq!(source.tiles_requested.load(Ordering::SeqCst), plane.num_tiles());

        let second = cache.get_or_realize(&plane, &source).unwrap().clone();
        assert_eq!(source.tiles_requested.load(Ordering::SeqCst), plane.num_tiles());
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_planes_cache_separately() {
        let mut cache = PlaneCache::new();

        cache.get_or_realize(&test_plane(0), &SyntheticTiles).unwrap();
        cache.get_or_realize(&test_plane(1), &SyntheticTiles).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&test_plane(0).id()).is_some());
        assert!(cache.get(&test_plane(2).id()).is_none());
    }

    #[test]
    fn cached_plane_equals_direct_realization() {
        let mut cache = PlaneCache::new();
        let plane = test_plane(3);

        let cached = cache.get_or_realize(&plane, &SyntheticTiles).unwrap();

        assert_eq!(cached, &plane.realize(&SyntheticTiles).unwrap());
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = PlaneCache::new();
        cache.get_or_realize(&test_plane(0), &SyntheticTiles).unwrap();

        cache.clear();

        assert!(cache.is_empty());
    }
}
