//! Dense 5D volumes, stacked out of realized planes.

use crate::grid::{Grid2, Pixel};
use crate::raw_bytes::IntoRawBytes;

use tile_mosaic_core::VolumeShape;

use serde::{Deserialize, Serialize};

/// A dense 5D array with row-major `[t][c][z][y][x]` encoding.
///
/// Volumes are built once, by stacking realized planes, and read-only afterwards. Plane lookups
/// assume in-bounds indices and panic otherwise.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Volume5<T> {
    shape: VolumeShape,
    values: Vec<T>,
}

/// A `Volume5` of `Pixel` values, the result of realizing one pyramid level.
pub type Volume = Volume5<Pixel>;

impl<T> Volume5<T> {
    /// Stacks planes into a volume, with `z` varying fastest and `t` slowest. This is the order
    /// produced by `VolumeShape::plane_ids`, so realized planes can be fed through unchanged.
    ///
    /// # Panics
    /// If the number of planes or any plane's shape disagrees with `shape`.
    pub fn from_planes(shape: VolumeShape, planes: impl IntoIterator<Item = Grid2<T>>) -> Self {
        let plane_shape = shape.plane_shape();

        let mut values = Vec::with_capacity(shape.num_points());
        let mut num_planes = 0;
        for plane in planes {
            assert_eq!(
                plane.extent().shape,
                plane_shape,
                "plane {} has the wrong shape for volume {:?}",
                num_planes,
                shape
            );
            let (_, plane_values) = plane.into_parts();
            values.extend(plane_values);
            num_planes += 1;
        }
        assert_eq!(
            num_planes,
            shape.num_planes(),
            "{} plane(s) cannot fill volume {:?}",
            num_planes,
            shape
        );

        Self { shape, values }
    }

    #[inline]
    pub fn shape(&self) -> &VolumeShape {
        &self.shape
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn values_slice(&self) -> &[T] {
        &self.values[..]
    }

    /// Moves the raw storage out of `self`.
    #[inline]
    pub fn into_parts(self) -> (VolumeShape, Vec<T>) {
        (self.shape, self.values)
    }

    /// The row-major pixels of the plane at `(t, c, z)`.
    ///
    /// # Panics
    /// If `(t, c, z)` is out of bounds.
    pub fn plane_values(&self, t: i32, c: i32, z: i32) -> &[T] {
        assert!(
            (0..self.shape.t).contains(&t)
                && (0..self.shape.c).contains(&c)
                && (0..self.shape.z).contains(&z),
            "plane ({}, {}, {}) is out of bounds for volume {:?}",
            t,
            c,
            z,
            self.shape
        );

        let plane_len = self.shape.plane_shape().volume() as usize;
        let plane_index = ((t * self.shape.c + c) * self.shape.z + z) as usize;

        &self.values[plane_index * plane_len..(plane_index + 1) * plane_len]
    }
}

impl<T> Volume5<T>
where
    T: Clone,
{
    /// Creates a volume that fills `shape` with `value`.
    pub fn fill(shape: VolumeShape, value: T) -> Self {
        Self {
            values: vec![value; shape.num_points()],
            shape,
        }
    }
}

impl<'a, T> IntoRawBytes<'a> for Volume5<T>
where
    T: 'static + bytemuck::Pod,
{
    type Output = &'a [u8];

    fn into_raw_bytes(&'a self) -> Self::Output {
        self.values[..].into_raw_bytes()
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

    use tile_mosaic_core::{Extent2i, Point2i};

    /// A plane whose every pixel encodes its `(t, z)` plane index.
    fn keyed_plane(shape: &VolumeShape, t: i32, z: i32) -> Grid2<Pixel> {
        let extent = Extent2i::from_min_and_shape(Point2i::ZERO, shape.plane_shape());

        Grid2::fill_with(extent, |p| (1000 * t + 100 * z + p.x()) as Pixel)
    }

    #[test]
    fn planes_stack_with_z_innermost() {
        let shape = VolumeShape::new(2, 1, 2, 1, 3);
        let planes: Vec<Grid2<Pixel>> = shape
            .plane_ids(0)
            .map(|id| keyed_plane(&shape, id.t, id.z))
            .collect();

        let volume = Volume5::from_planes(shape, planes);

        assert_eq!(volume.num_points(), shape.num_points());
        assert_eq!(
            volume.values_slice(),
            &[
                0, 1, 2, // t=0, z=0
                100, 101, 102, // t=0, z=1
                1000, 1001, 1002, // t=1, z=0
                1100, 1101, 1102, // t=1, z=1
            ]
        );
    }

    #[test]
    fn plane_values_addresses_the_stacking_order() {
        let shape = VolumeShape::new(3, 1, 4, 2, 2);
        let planes: Vec<Grid2<Pixel>> = shape
            .plane_ids(0)
            .map(|id| keyed_plane(&shape, id.t, id.z))
            .collect();

        let volume = Volume5::from_planes(shape, planes);

        for t in 0..3 {
            for z in 0..4 {
                let expected = keyed_plane(&shape, t, z);
                assert_eq!(volume.plane_values(t, 0, z), expected.values_slice());
            }
        }
    }

    #[test]
    #[should_panic]
    fn wrong_plane_count_panics() {
        let shape = VolumeShape::new(2, 1, 1, 2, 2);
        let one_plane = vec![keyed_plane(&shape, 0, 0)];

        Volume5::from_planes(shape, one_plane);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_plane_lookup_panics() {
        let volume = Volume5::fill(VolumeShape::new(1, 1, 1, 2, 2), 0);

        volume.plane_values(0, 1, 0);
    }

    #[test]
    fn empty_shape_stacks_no_values() {
        let shape = VolumeShape::new(2, 2, 2, 0, 5);
        let planes: Vec<Grid2<Pixel>> = shape
            .plane_ids(0)
            .map(|id| keyed_plane(&shape, id.t, id.z))
            .collect();

        let volume = Volume5::from_planes(shape, planes);

        assert_eq!(volume.num_points(), 0);
        assert!(volume.plane_values(1, 1, 1).is_empty());
    }

    #[test]
    fn raw_bytes_cover_every_sample() {
        let volume = Volume5::fill(VolumeShape::new(2, 1, 2, 3, 3), 1i16);

        assert_eq!(volume.into_raw_bytes().len(), 2 * 2 * 3 * 3 * 2);
    }
}
