use crate::{Extent2i, Point2i};

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies one 2D plane of a multiscale 5D volume.
///
/// `level` is the pyramid level, where level 0 has the highest resolution. The remaining indices
/// locate the plane within a volume of that level: time point `t`, channel `c`, and focal depth
/// `z`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PlaneId {
    pub level: u8,
    pub t: i32,
    pub c: i32,
    pub z: i32,
}

/// Identifies one rectangular tile of a plane.
///
/// `bounds.minimum` is the tile's `(x, y)` offset within the plane and `bounds.shape` is its
/// `(width, height)`. Tiles in the last row and column of a plane are clipped, so the shape may
/// be smaller than the plane's nominal tile shape.
///
/// A tile id is all that is needed to generate the tile's pixels, and identical ids always denote
/// identical pixels. Ids round-trip through the string encoding `"level,t,c,z,y,x,w,h"`, the name
/// format used to address tiles:
///
/// ```
/// use tile_mosaic_core::prelude::*;
///
/// let id: TileId = "0,0,1,0,0,0,3,2".parse().unwrap();
/// assert_eq!(id.plane, PlaneId { level: 0, t: 0, c: 1, z: 0 });
/// assert_eq!(
///     id.bounds,
///     Extent2i::from_min_and_shape(Point2i([0, 0]), Point2i([3, 2]))
/// );
/// assert_eq!(id.to_string(), "0,0,1,0,0,0,3,2");
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TileId {
    pub plane: PlaneId,
    pub bounds: Extent2i,
}

impl TileId {
    #[inline]
    pub fn new(plane: PlaneId, bounds: Extent2i) -> Self {
        Self { plane, bounds }
    }

    /// Checks that all indices are non-negative and the shape is positive.
    ///
    /// Parsing already rejects malformed strings, so this only matters for ids constructed
    /// directly from their fields.
    pub fn validate(&self) -> Result<(), InvalidTileCoord> {
        let indices = [
            ("t", self.plane.t),
            ("c", self.plane.c),
            ("z", self.plane.z),
            ("y", self.bounds.minimum.y()),
            ("x", self.bounds.minimum.x()),
        ];
        for &(name, value) in indices.iter() {
            if value < 0 {
                return Err(InvalidTileCoord::NegativeIndex { name, value });
            }
        }

        let shape = [("w", self.bounds.shape.x()), ("h", self.bounds.shape.y())];
        for &(name, value) in shape.iter() {
            if value <= 0 {
                return Err(InvalidTileCoord::EmptyShape { name, value });
            }
        }

        Ok(())
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{}",
            self.plane.level,
            self.plane.t,
            self.plane.c,
            self.plane.z,
            self.bounds.minimum.y(),
            self.bounds.minimum.x(),
            self.bounds.shape.x(),
            self.bounds.shape.y(),
        )
    }
}

impl FromStr for TileId {
    type Err = InvalidTileCoord;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').collect();
        if fields.len() != 8 {
            return Err(InvalidTileCoord::FieldCount(fields.len()));
        }

        let level: u8 = parse_field("level", fields[0])?;

        let names = ["t", "c", "z", "y", "x", "w", "h"];
        let mut indices = [0i32; 7];
        for (i, name) in names.iter().copied().enumerate() {
            indices[i] = parse_field(name, fields[i + 1])?;
        }
        let [t, c, z, y, x, w, h] = indices;

        let id = TileId {
            plane: PlaneId { level, t, c, z },
            bounds: Extent2i::from_min_and_shape(Point2i([x, y]), Point2i([w, h])),
        };
        id.validate()?;

        Ok(id)
    }
}

fn parse_field<T: FromStr<Err = core::num::ParseIntError>>(
    name: &'static str,
    field: &str,
) -> Result<T, InvalidTileCoord> {
    field
        .trim()
        .parse()
        .map_err(|source| InvalidTileCoord::ParseInt { field: name, source })
}

/// The reason a tile coordinate was rejected.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvalidTileCoord {
    #[error("tile id must have 8 comma-separated fields, got {0}")]
    FieldCount(usize),

    #[error("tile id field `{field}` is not an integer")]
    ParseInt {
        field: &'static str,
        source: core::num::ParseIntError,
    },

    #[error("tile index {name} = {value} must be non-negative")]
    NegativeIndex { name: &'static str, value: i32 },

    #[error("tile shape {name} = {value} must be positive")]
    EmptyShape { name: &'static str, value: i32 },
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
