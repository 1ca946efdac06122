use crate::{PlaneId, Point2i};

use itertools::iproduct;
use serde::{Deserialize, Serialize};

/// The dimensions of a 5D volume, ordered `[t][c][z][y][x]` from outermost to innermost.
///
/// Each `(t, c, z)` index addresses one 2D plane of `y` rows and `x` columns. A shape with a zero
/// dimension is legal and simply contains no points; deep pyramid levels can halve planes all the
/// way down to nothing.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct VolumeShape {
    pub t: i32,
    pub c: i32,
    pub z: i32,
    pub y: i32,
    pub x: i32,
}

impl VolumeShape {
    #[inline]
    pub fn new(t: i32, c: i32, z: i32, y: i32, x: i32) -> Self {
        Self { t, c, z, y, x }
    }

    /// The number of samples in a volume of this shape.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_planes() * self.plane_shape().volume() as usize
    }

    /// The number of `(t, c, z)` planes in a volume of this shape.
    #[inline]
    pub fn num_planes(&self) -> usize {
        (self.t * self.c * self.z) as usize
    }

    /// The in-plane dimensions as an `(x, y)` point.
    #[inline]
    pub fn plane_shape(&self) -> Point2i {
        Point2i([self.x, self.y])
    }

    /// Returns `true` iff a volume of this shape has a plane at `id`'s `(t, c, z)` index.
    /// The pyramid level is not consulted; shapes know nothing about levels.
    #[inline]
    pub fn contains_plane(&self, id: &PlaneId) -> bool {
        (0..self.t).contains(&id.t) && (0..self.c).contains(&id.c) && (0..self.z).contains(&id.z)
    }

    /// Returns `true` iff any dimension is negative.
    #[inline]
    pub fn has_negative_dim(&self) -> bool {
        self.t < 0 || self.c < 0 || self.z < 0 || self.y < 0 || self.x < 0
    }

    /// Returns `true` iff a volume of this shape contains no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// The shape one pyramid level up: plane dimensions are halved while t, c, and z stay fixed.
    ///
    /// Level `k` of a pyramid has the shape produced by applying this step `k` times to the
    /// level 0 shape. Halving an odd dimension rounds down, and a dimension of 1 halves to 0, so
    /// deep enough levels contain empty planes.
    #[inline]
    pub fn halved_plane(&self) -> Self {
        Self {
            t: self.t,
            c: self.c,
            z: self.z,
            y: self.y / 2,
            x: self.x / 2,
        }
    }

    /// All plane ids of a volume with this shape at pyramid `level`, ordered with `z` varying
    /// fastest, then `c`, then `t`. This is the order in which planes stack into a volume.
    pub fn plane_ids(&self, level: u8) -> impl Iterator<Item = PlaneId> {
        iproduct!(0..self.t, 0..self.c, 0..self.z).map(move |(t, c, z)| PlaneId { level, t, c, z })
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
