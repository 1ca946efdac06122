use tile_mosaic_core::{Extent2i, InvalidTileCoord, TileId, VolumeShape};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The failure modes of pyramid construction and realization.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    InvalidTileCoord(#[from] InvalidTileCoord),

    #[error("invalid pyramid spec: {0}")]
    InvalidSpec(String),

    #[error("tile source returned bounds {actual:?} for tile `{id}` spanning {expected:?}")]
    TileExtentMismatch {
        id: TileId,
        expected: Extent2i,
        actual: Extent2i,
    },

    #[error(
        "level {level} shape {actual:?} does not share t/c/z dimensions with level 0 shape \
         {expected:?}"
    )]
    LevelShapeMismatch {
        level: usize,
        expected: VolumeShape,
        actual: VolumeShape,
    },
}
