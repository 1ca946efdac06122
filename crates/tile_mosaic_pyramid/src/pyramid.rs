//! Multiscale pyramids of lazy volumes.
//!
//! A [`PyramidSpec`] describes a pyramid: the level 0 volume shape, the nominal tile shape, and
//! how many levels to lay out. [`PyramidSpec::build`] produces the whole lattice of tile ids
//! without generating a single pixel, and each [`LazyVolume`] level can then be realized
//! independently.
//!
//! ```
//! use tile_mosaic_core::prelude::*;
//! use tile_mosaic_pyramid::prelude::*;
//!
//! let spec = PyramidSpec {
//!     shape: VolumeShape::new(1, 1, 1, 4, 4),
//!     tile_shape: Point2i([2, 2]),
//!     levels: 2,
//! };
//! let pyramid = spec.build().unwrap();
//!
//! assert_eq!(pyramid.level(0).shape(), &VolumeShape::new(1, 1, 1, 4, 4));
//! assert_eq!(pyramid.level(1).shape(), &VolumeShape::new(1, 1, 1, 2, 2));
//! ```

use crate::assemble::LazyPlane;
use crate::error::{Error, Result};
use crate::synth::TileSource;
use crate::volume::{Volume, Volume5};

use tile_mosaic_core::{Point2i, VolumeShape};

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything needed to lay out a pyramid. Plain serializable data; [`PyramidSpec::build`] does
/// the validation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PyramidSpec {
    /// The shape of the full-resolution volume at level 0.
    pub shape: VolumeShape,
    /// The nominal tile shape; edge tiles may be clipped smaller.
    pub tile_shape: Point2i,
    /// The number of levels to lay out, including level 0.
    pub levels: u8,
}

impl PyramidSpec {
    /// Lays out the lazy pyramid.
    ///
    /// Level 0 takes `self.shape` unchanged, and each further level halves the plane
    /// dimensions of the level before it, rounding down one halving at a time. Every level is
    /// covered by tiles of the same nominal shape. No pixels are generated.
    pub fn build(&self) -> Result<Pyramid> {
        if self.shape.has_negative_dim() {
            return Err(Error::InvalidSpec(format!(
                "volume shape {:?} has a negative dimension",
                self.shape
            )));
        }
        if !(self.tile_shape > Point2i::ZERO) {
            return Err(Error::InvalidSpec(format!(
                "tile shape {:?} must be positive",
                self.tile_shape
            )));
        }

        let mut levels = Vec::with_capacity(self.levels as usize);
        let mut level_shape = self.shape;
        for level in 0..self.levels {
            levels.push(LazyVolume::new(level, level_shape, self.tile_shape));
            level_shape = level_shape.halved_plane();
        }

        Ok(Pyramid { levels })
    }
}

/// One pyramid level: a 5D volume whose planes are laid out but not yet realized.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LazyVolume {
    level: u8,
    shape: VolumeShape,
    planes: Vec<LazyPlane>,
}

impl LazyVolume {
    fn new(level: u8, shape: VolumeShape, tile_shape: Point2i) -> Self {
        let planes: Vec<LazyPlane> = shape
            .plane_ids(level)
            .map(|id| LazyPlane::new(id, shape.plane_shape(), tile_shape))
            .collect();

        debug!(
            "level {}: shape {:?}, {} plane(s)",
            level,
            shape,
            planes.len()
        );

        Self {
            level,
            shape,
            planes,
        }
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub fn shape(&self) -> &VolumeShape {
        &self.shape
    }

    /// The planes of this volume, ordered with `z` varying fastest, then `c`, then `t`.
    #[inline]
    pub fn planes(&self) -> &[LazyPlane] {
        &self.planes[..]
    }

    #[inline]
    pub fn num_tiles(&self) -> usize {
        self.planes.iter().map(LazyPlane::num_tiles).sum()
    }

    /// Forces this level: realizes every plane in parallel, then stacks them into a dense
    /// volume in plane order.
    pub fn realize<S>(&self, source: &S) -> Result<Volume>
    where
        S: TileSource + Sync,
    {
        let planes: Vec<_> = self
            .planes
            .par_iter()
            .map(|plane| plane.realize(source))
            .collect::<Result<_>>()?;

        Ok(Volume5::from_planes(self.shape, planes))
    }
}

/// An ordered sequence of lazy volumes, where level 0 has the highest resolution and each
/// further level halves the plane dimensions.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pyramid {
    levels: Vec<LazyVolume>,
}

impl Pyramid {
    #[inline]
    pub fn num_levels(&self) -> u8 {
        self.levels.len() as u8
    }

    #[inline]
    pub fn levels_slice(&self) -> &[LazyVolume] {
        &self.levels[..]
    }

    /// Borrows the level, where level 0 has the highest resolution.
    ///
    /// # Panics
    /// If `level` does not exist.
    #[inline]
    pub fn level(&self, level: u8) -> &LazyVolume {
        &self.levels[level as usize]
    }

    #[inline]
    pub fn num_planes(&self) -> usize {
        self.levels.iter().map(|level| level.planes().len()).sum()
    }

    #[inline]
    pub fn num_tiles(&self) -> usize {
        self.levels.iter().map(LazyVolume::num_tiles).sum()
    }

    /// Forces every level, highest resolution first.
    pub fn realize_all<S>(&self, source: &S) -> Result<Vec<Volume>>
    where
        S: TileSource + Sync,
    {
        self.levels.iter().map(|level| level.realize(source)).collect()
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
