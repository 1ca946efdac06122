//! The core data types for addressing synthetic tiles on 2D integer lattices:
//! - `Point2i`: a 2-dimensional integer point
//! - `Extent2i`: a 2-dimensional integer extent, the bounds of a tile or plane
//! - `PlaneId` and `TileId`: coordinates of 2D planes within a 5D volume and of the
//!   tiles that cover them
//! - `VolumeShape`: the dimensions of a 5D volume, one 2D plane per `(t, c, z)` index

pub mod axis;
pub mod extent;
pub mod point;
pub mod shape;
pub mod tile_id;

pub use axis::Axis5;
pub use extent::{Extent2i, ExtentPointIter};
pub use point::Point2i;
pub use shape::VolumeShape;
pub use tile_id::{InvalidTileCoord, PlaneId, TileId};

pub mod prelude {
    pub use super::{Axis5, Extent2i, InvalidTileCoord, PlaneId, Point2i, TileId, VolumeShape};
}
