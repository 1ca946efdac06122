//! Partitioning planes into tiles and lazily assembling them back.
//!
//! A [`TileGrid`] covers a plane with nominally fixed-shape tiles, clipping the last row and
//! column to the plane bounds. A [`LazyPlane`] records the tile ids of one plane without
//! generating any pixels; [`LazyPlane::realize`] generates every tile in parallel and copies
//! them into a single dense grid.
//!
//! ```
//! use tile_mosaic_core::prelude::*;
//! use tile_mosaic_pyramid::prelude::*;
//!
//! let id = PlaneId { level: 0, t: 0, c: 0, z: 0 };
//! let plane = LazyPlane::new(id, Point2i([5000, 3000]), Point2i([256, 256]));
//!
//! // 20 columns of tiles, the last 144 wide; 12 rows, the last 184 tall.
//! assert_eq!(plane.num_tiles(), 20 * 12);
//!
//! let pixels = plane.realize(&SyntheticTiles).unwrap();
//! assert_eq!(
//!     pixels.extent(),
//!     &Extent2i::from_min_and_shape(Point2i::ZERO, Point2i([5000, 3000]))
//! );
//! ```

use crate::access::copy_extent;
use crate::error::{Error, Result};
use crate::grid::PixelGrid;
use crate::synth::TileSource;

use tile_mosaic_core::{Extent2i, PlaneId, Point2i, TileId};

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// The grid of tile cells covering one plane.
///
/// Cell `(0, 0)` has its minimum at the plane origin, and cells are `tile_shape`-sized except
/// along the plane's far edges, where they are clipped to whatever remains.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TileGrid {
    plane_extent: Extent2i,
    tile_shape: Point2i,
}

impl TileGrid {
    /// # Panics
    /// If `tile_shape` is not positive or `plane_shape` is negative.
    pub fn new(plane_shape: Point2i, tile_shape: Point2i) -> Self {
        assert!(
            tile_shape > Point2i::ZERO,
            "tile shape {:?} must be positive",
            tile_shape
        );
        assert!(
            plane_shape >= Point2i::ZERO,
            "plane shape {:?} must be non-negative",
            plane_shape
        );

        Self {
            plane_extent: Extent2i::from_min_and_shape(Point2i::ZERO, plane_shape),
            tile_shape,
        }
    }

    #[inline]
    pub fn plane_extent(&self) -> &Extent2i {
        &self.plane_extent
    }

    #[inline]
    pub fn tile_shape(&self) -> Point2i {
        self.tile_shape
    }

    /// The number of tile columns and rows, as an `(x, y)` point. Partial tiles count, so this
    /// is the ceiling of the per-component quotient.
    #[inline]
    pub fn grid_shape(&self) -> Point2i {
        self.plane_extent.shape.vector_div_ceil(&self.tile_shape)
    }

    #[inline]
    pub fn num_tiles(&self) -> usize {
        self.grid_shape().volume() as usize
    }

    /// The bounds of the tile in cell `cell`, clipped to the plane.
    #[inline]
    pub fn tile_bounds(&self, cell: Point2i) -> Extent2i {
        let nominal = Extent2i::from_min_and_shape(cell * self.tile_shape, self.tile_shape);

        nominal.intersection(&self.plane_extent)
    }

    /// The cell of the tile that owns the plane point `p`.
    #[inline]
    pub fn cell_containing_point(&self, p: Point2i) -> Point2i {
        p.vector_div_floor(&self.tile_shape)
    }

    /// The bounds of every tile, in row-major cell order: left to right, then top to bottom.
    pub fn iter_tile_bounds(&self) -> impl Iterator<Item = Extent2i> + '_ {
        Extent2i::from_min_and_shape(Point2i::ZERO, self.grid_shape())
            .iter_points()
            .map(move |cell| self.tile_bounds(cell))
    }
}

/// One plane of a volume whose pixels have not been generated yet.
///
/// Construction is cheap: it only records the covering tile ids, in row-major order. The pixel
/// work is deferred to [`LazyPlane::realize`], so a whole pyramid of these can be laid out
/// up front and forced selectively.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LazyPlane {
    id: PlaneId,
    extent: Extent2i,
    tiles: Vec<TileId>,
}

impl LazyPlane {
    /// Covers a `plane_shape` plane with tiles of nominal shape `tile_shape`.
    ///
    /// # Panics
    /// If `tile_shape` is not positive or `plane_shape` is negative.
    pub fn new(id: PlaneId, plane_shape: Point2i, tile_shape: Point2i) -> Self {
        let grid = TileGrid::new(plane_shape, tile_shape);
        let tiles: Vec<TileId> = grid
            .iter_tile_bounds()
            .map(|bounds| TileId::new(id, bounds))
            .collect();

        debug!(
            "plane {:?}: {:?} grid, {} tile(s)",
            id,
            grid.grid_shape(),
            tiles.len()
        );

        Self {
            id,
            extent: *grid.plane_extent(),
            tiles,
        }
    }

    #[inline]
    pub fn id(&self) -> PlaneId {
        self.id
    }

    /// The bounds of the full plane, with minimum `(0, 0)`.
    #[inline]
    pub fn extent(&self) -> &Extent2i {
        &self.extent
    }

    /// The covering tile ids, in row-major order.
    #[inline]
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    #[inline]
    pub fn num_tiles(&self) -> usize {
        self.tiles.len()
    }

    /// Generates every tile and assembles the full plane.
    ///
    /// Tiles are pure functions of their ids and land in disjoint regions, so they are
    /// generated in parallel. The result always covers exactly [`LazyPlane::extent`]; a
    /// zero-area plane realizes to an empty grid without consulting the source. Realizing the
    /// same plane twice returns equal grids.
    pub fn realize<S>(&self, source: &S) -> Result<PixelGrid>
    where
        S: TileSource + Sync,
    {
        let tiles: Vec<PixelGrid> = self
            .tiles
            .par_iter()
            .map(|id| {
                let tile = source.tile(id)?;
                if tile.extent() != &id.bounds {
                    return Err(Error::TileExtentMismatch {
                        id: *id,
                        expected: id.bounds,
                        actual: *tile.extent(),
                    });
                }

                Ok(tile)
            })
            .collect::<Result<_>>()?;

        let mut plane = PixelGrid::fill(self.extent, 0);
        for tile in tiles.iter() {
            copy_extent(tile.extent(), tile, &mut plane);
        }

        Ok(plane)
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
    use crate::access::{ForEach, ForEachMut};
    use crate::grid::{Grid2, Pixel};
    use crate::synth::SyntheticTiles;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const PLANE_0: PlaneId = PlaneId {
        level: 0,
        t: 0,
        c: 0,
        z: 0,
    };

    #[test]
    fn grid_shape_counts_partial_tiles() {
        let grid = TileGrid::new(Point2i([5000, 3000]), Point2i([256, 256]));

        assert_eq!(grid.grid_shape(), Point2i([20, 12]));
        assert_eq!(grid.num_tiles(), 240);
    }

    #[test]
    fn edge_tiles_are_clipped() {
        let grid = TileGrid::new(Point2i([5000, 3000]), Point2i([256, 256]));

        // Interior tile.
        assert_eq!(
            grid.tile_bounds(Point2i([1, 1])),
            Extent2i::from_min_and_shape(Point2i([256, 256]), Point2i([256, 256]))
        );
        // Last column: 5000 - 19 * 256 = 136 pixels remain.
        assert_eq!(
            grid.tile_bounds(Point2i([19, 0])),
            Extent2i::from_min_and_shape(Point2i([4864, 0]), Point2i([136, 256]))
        );
        // Last row: 3000 - 11 * 256 = 184 pixels remain.
        assert_eq!(
            grid.tile_bounds(Point2i([0, 11])),
            Extent2i::from_min_and_shape(Point2i([0, 2816]), Point2i([256, 184]))
        );
        // Corner tile is clipped both ways.
        assert_eq!(
            grid.tile_bounds(Point2i([19, 11])),
            Extent2i::from_min_and_shape(Point2i([4864, 2816]), Point2i([136, 184]))
        );
    }

    #[test]
    fn tiles_partition_the_plane() {
        let mut rng = StdRng::seed_from_u64(717);

        for _ in 0..50 {
            let plane_shape = Point2i([rng.gen_range(0..40), rng.gen_range(0..40)]);
            let tile_shape = Point2i([rng.gen_range(1..12), rng.gen_range(1..12)]);
            let grid = TileGrid::new(plane_shape, tile_shape);

            // Every point of the plane is covered by exactly one tile.
            let mut coverage = Grid2::fill(*grid.plane_extent(), 0i32);
            for bounds in grid.iter_tile_bounds() {
                assert!(bounds.is_subset_of(grid.plane_extent()));
                assert!(!bounds.is_empty() || grid.plane_extent().is_empty());
                coverage.for_each_mut(&bounds, |_: (), count| *count += 1);
            }

            assert!(coverage.values_slice().iter().all(|&count| count == 1));
        }
    }

    #[test]
    fn plane_tiles_are_row_major() {
        let plane = LazyPlane::new(PLANE_0, Point2i([10, 5]), Point2i([4, 4]));

        let minima: Vec<Point2i> = plane.tiles().iter().map(|id| id.bounds.minimum).collect();

        assert_eq!(
            minima,
            vec![
                Point2i([0, 0]),
                Point2i([4, 0]),
                Point2i([8, 0]),
                Point2i([0, 4]),
                Point2i([4, 4]),
                Point2i([8, 4]),
            ]
        );
    }

    #[test]
    fn realized_plane_has_exact_bounds() {
        let plane = LazyPlane::new(PLANE_0, Point2i([21, 13]), Point2i([8, 8]));

        let pixels = plane.realize(&SyntheticTiles).unwrap();

        assert_eq!(pixels.extent(), plane.extent());
        assert_eq!(pixels.values_slice().len(), 21 * 13);
    }

    #[test]
    fn plane_pixels_match_owning_tile_samples() {
        let id = PlaneId {
            level: 1,
            t: 2,
            c: 1,
            z: 3,
        };
        let tile_shape = Point2i([7, 5]);
        let plane = LazyPlane::new(id, Point2i([23, 11]), tile_shape);
        let grid = TileGrid::new(Point2i([23, 11]), tile_shape);

        let pixels = plane.realize(&SyntheticTiles).unwrap();

        pixels.for_each(pixels.extent(), |p: Point2i, value: Pixel| {
            let cell = grid.cell_containing_point(p);
            let local = p - cell * tile_shape;
            assert_eq!(value, SyntheticTiles::sample(&id, local));
        });
    }

    #[test]
    fn plane_smaller_than_one_tile_is_a_single_tile() {
        let plane = LazyPlane::new(PLANE_0, Point2i([3, 2]), Point2i([256, 256]));
        assert_eq!(plane.num_tiles(), 1);

        let pixels = plane.realize(&SyntheticTiles).unwrap();
        let tile = SyntheticTiles.tile(&plane.tiles()[0]).unwrap();

        assert_eq!(pixels, tile);
    }

    #[test]
    fn zero_area_plane_realizes_empty() {
        let plane = LazyPlane::new(PLANE_0, Point2i([0, 100]), Point2i([16, 16]));

        assert_eq!(plane.num_tiles(), 0);

        let pixels = plane.realize(&SyntheticTiles).unwrap();
        assert!(pixels.values_slice().is_empty());
        assert_eq!(pixels.extent().shape, Point2i([0, 100]));
    }

    #[test]
    fn realizing_twice_is_deterministic() {
        let plane = LazyPlane::new(PLANE_0, Point2i([50, 30]), Point2i([16, 16]));

        assert_eq!(
            plane.realize(&SyntheticTiles).unwrap(),
            plane.realize(&SyntheticTiles).unwrap()
        );
    }

    #[test]
    fn source_returning_wrong_bounds_is_an_error() {
        struct WrongBounds;

        impl TileSource for WrongBounds {
            fn tile(&self, id: &TileId) -> Result<PixelGrid> {
                // Right shape, wrong position.
                Ok(PixelGrid::fill(id.bounds.with_minimum(Point2i([999, 999])), 7))
            }
        }

        let plane = LazyPlane::new(PLANE_0, Point2i([8, 8]), Point2i([8, 8]));

        let result = plane.realize(&WrongBounds);

        assert!(matches!(result, Err(Error::TileExtentMismatch { .. })));
    }
}
