//! Deterministic tile synthesis and lazy multiscale pyramid assembly for 5D images.
//!
//! This library is organized into two crates:
//! - **core**: the lattice coordinate types: points, extents, tile and plane ids, and 5D
//!   volume shapes
//! - **pyramid**: pixel grids, deterministic tile synthesis, lazy plane assembly, pyramid
//!   construction, and viewer handoff
//!
//! A pyramid is laid out without generating any pixels, then realized level by level:
//!
//! ```
//! use tile_mosaic::prelude::*;
//!
//! let spec = PyramidSpec {
//!     shape: VolumeShape::new(1, 2, 1, 64, 96),
//!     tile_shape: Point2i([32, 32]),
//!     levels: 3,
//! };
//!
//! let pyramid = spec.build().unwrap();
//! assert_eq!(pyramid.num_levels(), 3);
//!
//! let full_res = pyramid.level(0).realize(&SyntheticTiles).unwrap();
//! assert_eq!(full_res.shape(), &VolumeShape::new(1, 2, 1, 64, 96));
//! ```

pub use tile_mosaic_core as core;
pub use tile_mosaic_pyramid as pyramid;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::pyramid::prelude::*;
}
