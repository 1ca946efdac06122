//! Deterministic, on-demand generation of tile content.
//!
//! A [`TileSource`] produces the pixels for one tile id at a time. The built-in
//! [`SyntheticTiles`] source computes every pixel from a closed-form function of the id and the
//! pixel's offset within the tile, so any tile of any plane can be produced at any time, in any
//! order, with no I/O and no shared state. That purity is what lets plane assembly run tiles in
//! parallel and caches reuse planes indefinitely.

use crate::error::Result;
use crate::grid::{Pixel, PixelGrid};

use tile_mosaic_core::{PlaneId, Point2i, TileId};

use auto_impl::auto_impl;
use log::trace;
use serde::{Deserialize, Serialize};

/// A source of tile pixel data.
///
/// Implementations must be pure: the same id always produces the same grid, and the returned
/// grid's extent must equal `id.bounds`. Tiles of one plane are requested in parallel, so
/// sources are usually `Sync`.
#[auto_impl(&, Arc)]
pub trait TileSource {
    fn tile(&self, id: &TileId) -> Result<PixelGrid>;
}

/// The built-in synthetic source.
///
/// Pixels depend only on the tile's plane id and the pixel's local offset `(px, py)` within the
/// tile, never on where the tile sits in its plane:
///
/// - odd channels: `py + 2t + 2z`, a ramp down the rows, offset by time and depth
/// - even channels: `(px + (level % 2) * py) / 2`, a ramp along the rows, sheared by the row
///   index on odd levels
///
/// ```
/// use tile_mosaic_core::prelude::*;
/// use tile_mosaic_pyramid::prelude::*;
///
/// // Odd channels are constant along each row.
/// let id: TileId = "0,0,1,0,0,0,3,2".parse().unwrap();
/// let tile = SyntheticTiles.tile(&id).unwrap();
///
/// assert_eq!(tile.values_slice(), &[0, 0, 0, 1, 1, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SyntheticTiles;

impl SyntheticTiles {
    /// The sample at offset `local` within any tile of plane `id`.
    ///
    /// All arithmetic wraps like 16-bit integers, including the sum inside the even-channel
    /// case before the halving, so oversized coordinates alias instead of panicking.
    #[inline]
    pub fn sample(id: &PlaneId, local: Point2i) -> Pixel {
        let px = local.x() as Pixel;
        let py = local.y() as Pixel;

        if id.c % 2 == 1 {
            py.wrapping_add((id.t as Pixel).wrapping_mul(2))
                .wrapping_add((id.z as Pixel).wrapping_mul(2))
        } else {
            let shear = (id.level % 2) as Pixel;

            // Floor division, so wrapped negative sums halve the same way they would in
            // two's complement 16-bit math.
            px.wrapping_add(shear.wrapping_mul(py)).div_euclid(2)
        }
    }
}

impl TileSource for SyntheticTiles {
    fn tile(&self, id: &TileId) -> Result<PixelGrid> {
        id.validate()?;

        trace!("generating tile {}", id);

        let plane = id.plane;
        let tile_min = id.bounds.minimum;

        Ok(PixelGrid::fill_with(id.bounds, |p| {
            Self::sample(&plane, p - tile_min)
        }))
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
    use crate::error::Error;

    use tile_mosaic_core::Extent2i;

    fn tile_id(level: u8, t: i32, c: i32, z: i32, min: Point2i, shape: Point2i) -> TileId {
        TileId::new(
            PlaneId { level, t, c, z },
            Extent2i::from_min_and_shape(min, shape),
        )
    }

    #[test]
    fn same_id_generates_same_tile() {
        let id = tile_id(2, 3, 1, 4, Point2i([512, 256]), Point2i([256, 256]));

        assert_eq!(
            SyntheticTiles.tile(&id).unwrap(),
            SyntheticTiles.tile(&id).unwrap()
        );
    }

    #[test]
    fn content_ignores_tile_position() {
        let at_origin = tile_id(0, 1, 0, 2, Point2i::ZERO, Point2i([16, 8]));
        let offset = tile_id(0, 1, 0, 2, Point2i([4800, 2816]), Point2i([16, 8]));

        let a = SyntheticTiles.tile(&at_origin).unwrap();
        let b = SyntheticTiles.tile(&offset).unwrap();

        assert_eq!(a.values_slice(), b.values_slice());
        assert_ne!(a.extent(), b.extent());
    }

    #[test]
    fn odd_channel_is_constant_along_rows() {
        let id = tile_id(0, 2, 3, 5, Point2i::ZERO, Point2i([4, 3]));
        let tile = SyntheticTiles.tile(&id).unwrap();

        for py in 0..3 {
            let expected = (py + 2 * 2 + 2 * 5) as Pixel;
            for px in 0..4 {
                assert_eq!(tile.values_slice()[(py * 4 + px) as usize], expected);
            }
        }
    }

    #[test]
    fn even_channel_ramps_along_rows() {
        // Level 0: no shear, value = px / 2.
        let id = tile_id(0, 7, 2, 9, Point2i::ZERO, Point2i([5, 2]));
        let tile = SyntheticTiles.tile(&id).unwrap();
        assert_eq!(tile.values_slice(), &[0, 0, 1, 1, 2, 0, 0, 1, 1, 2]);

        // Level 1: sheared by the row index, value = (px + py) / 2.
        let id = tile_id(1, 7, 2, 9, Point2i::ZERO, Point2i([5, 2]));
        let tile = SyntheticTiles.tile(&id).unwrap();
        assert_eq!(tile.values_slice(), &[0, 0, 1, 1, 2, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn samples_wrap_like_16_bit_integers() {
        // 2t = 40000 wraps to 40000 - 65536.
        let plane = PlaneId {
            level: 0,
            t: 20000,
            c: 1,
            z: 0,
        };
        assert_eq!(SyntheticTiles::sample(&plane, Point2i::ZERO), -25536);

        // The even-channel sum wraps before the halving: 1 + 32767 wraps to -32768, and floor
        // division keeps the sign.
        let plane = PlaneId {
            level: 1,
            t: 0,
            c: 0,
            z: 0,
        };
        assert_eq!(
            SyntheticTiles::sample(&plane, Point2i([1, 32767])),
            -16384
        );
    }

    #[test]
    fn invalid_id_is_rejected() {
        let no_width = tile_id(0, 0, 0, 0, Point2i::ZERO, Point2i([0, 4]));

        let result = SyntheticTiles.tile(&no_width);

        assert!(matches!(result, Err(Error::InvalidTileCoord(_))));
    }
}
