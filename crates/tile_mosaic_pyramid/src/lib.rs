//! Lazy assembly of deterministic synthetic tiles into multiscale 5D volumes.
//!
//! The pipeline, from the bottom up:
//!
//! - [`grid`]: `Grid2`, the dense 2D lattice map used for both tiles and assembled planes
//! - [`access`]: the traits for indexing, iterating, and copying between lattice maps
//! - [`synth`]: `TileSource` and the built-in `SyntheticTiles`, which computes any tile's
//!   pixels from a closed-form function of its id
//! - [`assemble`]: `LazyPlane`, which records the tile ids covering one plane and generates
//!   them in parallel when realized
//! - [`pyramid`]: `PyramidSpec` and `Pyramid`, laying out every level, plane, and tile of a
//!   multiscale volume without touching a pixel
//! - [`volume`]: `Volume5`, the dense 5D result of realizing one level
//! - [`cache`]: `PlaneCache`, a memo table of realized planes
//! - [`view`]: `MultiscaleImage` and the `ViewerSink` boundary to rendering backends
//!
//! Everything is deterministic: a tile id alone decides its pixels, so planes, levels, and
//! whole pyramids can be realized in any order, in parallel, with equal results.

pub mod access;
pub mod assemble;
pub mod cache;
pub mod error;
pub mod grid;
pub mod pyramid;
pub mod raw_bytes;
pub mod synth;
pub mod view;
pub mod volume;

pub use access::*;
pub use assemble::*;
pub use cache::*;
pub use error::*;
pub use grid::*;
pub use pyramid::*;
pub use raw_bytes::*;
pub use synth::*;
pub use view::*;
pub use volume::*;

/// Hash map type to use for small keys like `PlaneId`.
pub type SmallKeyHashMap<K, V> = ahash::AHashMap<K, V>;

pub mod prelude {
    pub use super::{
        copy_extent, Error, ForEach, ForEachMut, Func, Get, GetMut, GetRef, Grid2, IntoRawBytes,
        LazyPlane, LazyVolume, Local, LogViewer, MultiscaleImage, Pixel, PixelGrid, PlaneCache,
        Pyramid, PyramidSpec, ReadExtent, Result, SmallKeyHashMap, Stride, SyntheticTiles,
        TileGrid, TileSource, ViewerSink, Volume, Volume5, WriteExtent,
    };
}
