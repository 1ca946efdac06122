//! Traits for reading and writing rectangular regions of the plane.
//!
//! All lattice maps in this crate, whether backed by memory or by a pure function, share one
//! small vocabulary:
//!
//! - `Get*` traits for reading or writing single points.
//! - `ForEach*` traits for visiting every point of an `Extent2i`.
//! - `ReadExtent` and `WriteExtent` for bulk copies between maps via [`copy_extent`].
//!
//! Bulk copies are how planes get assembled out of tiles, and they work between any combination
//! of sources and destinations that implement the right sides of the contract. A pure function
//! wrapped in [`Func`] is a readable source like any grid:
//!
//! ```
//! use tile_mosaic_core::prelude::*;
//! use tile_mosaic_pyramid::prelude::*;
//!
//! let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i([4, 4]));
//! let mut grid = PixelGrid::fill(extent, 0);
//!
//! // Sample a function of position into the grid.
//! copy_extent(&extent, &Func(|p: Point2i| (p.x() + p.y()) as Pixel), &mut grid);
//!
//! assert_eq!(grid.get(Point2i([3, 3])), 6);
//! ```

use tile_mosaic_core::{Extent2i, Point2i};

use core::iter::{once, Once};

// ██████╗ ███████╗████████╗████████╗███████╗██████╗ ███████╗
// ██╔════╝ ██╔════╝╚══██╔══╝╚══██╔══╝██╔════╝██╔══██╗██╔════╝
// ██║  ███╗█████╗     ██║      ██║   █████╗  ██████╔╝███████╗
// ██║   ██║██╔══╝     ██║      ██║   ██╔══╝  ██╔══██╗╚════██║
// ╚██████╔╝███████╗   ██║      ██║   ███████╗██║  ██║███████║
//  ╚═════╝ ╚══════╝   ╚═╝      ╚═╝   ╚══════╝╚═╝  ╚═╝╚══════╝

/// Read a value at `location`, which may be any coordinate representation the map supports.
pub trait Get<L> {
    type Data;

    fn get(&self, location: L) -> Self::Data;
}

/// Borrow the value at `location`.
pub trait GetRef<L> {
    type Data;

    fn get_ref(&self, location: L) -> &Self::Data;
}

/// Mutably borrow the value at `location`.
pub trait GetMut<L> {
    type Data;

    fn get_mut(&mut self, location: L) -> &mut Self::Data;
}

/// Read a value at `location` without bounds checking.
pub trait GetUnchecked<L> {
    type Data;

    /// # Safety
    /// `location` must be within the bounds of the map.
    unsafe fn get_unchecked(&self, location: L) -> Self::Data;
}

/// Reads a value, with bounds checking only in debug builds. Used by the hot iteration and
/// copy paths once the visited extent has already been clamped in bounds.
pub trait GetUncheckedRelease<L, T>: Get<L, Data = T> + GetUnchecked<L, Data = T> {
    #[inline]
    fn get_unchecked_release(&self, location: L) -> T {
        if cfg!(debug_assertions) {
            self.get(location)
        } else {
            unsafe { self.get_unchecked(location) }
        }
    }
}

impl<M, L, T> GetUncheckedRelease<L, T> for M where M: Get<L, Data = T> + GetUnchecked<L, Data = T> {}

// ███████╗ ██████╗ ██████╗     ███████╗ █████╗  ██████╗██╗  ██╗
// ██╔════╝██╔═══██╗██╔══██╗    ██╔════╝██╔══██╗██╔════╝██║  ██║
// █████╗  ██║   ██║██████╔╝    █████╗  ███████║██║     ███████║
// ██╔══╝  ██║   ██║██╔══██╗    ██╔══╝  ██╔══██║██║     ██╔══██║
// ██║     ╚██████╔╝██║  ██║    ███████╗██║  ██║╚██████╗██║  ██║
// ╚═╝      ╚═════╝ ╚═╝  ╚═╝    ╚══════╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝

/// Visit every point of `extent` that the map covers, in row-major order. `Coord` selects the
/// coordinate representation passed to the visitor.
pub trait ForEach<Coord> {
    type Item;

    fn for_each(&self, extent: &Extent2i, f: impl FnMut(Coord, Self::Item));
}

/// Like [`ForEach`], but hands out mutable borrows.
pub trait ForEachMut<'a, Coord> {
    type Item;

    fn for_each_mut(&'a mut self, extent: &Extent2i, f: impl FnMut(Coord, Self::Item));
}

//  ██████╗ ██████╗ ██████╗ ██╗   ██╗
// ██╔════╝██╔═══██╗██╔══██╗╚██╗ ██╔╝
// ██║     ██║   ██║██████╔╝ ╚████╔╝
// ██║     ██║   ██║██╔═══╝   ╚██╔╝
// ╚██████╗╚██████╔╝██║        ██║
//  ╚═════╝ ╚═════╝ ╚═╝        ╚═╝

/// A map that can be copied from. The map is allowed to serve a requested extent in pieces,
/// each clamped to the region the map actually covers.
pub trait ReadExtent<'a> {
    type Src;
    type SrcIter: Iterator<Item = (Extent2i, Self::Src)>;

    /// Returns an iterator over `(subextent, src)` pairs covering the readable parts of
    /// `extent`.
    fn read_extent(&'a self, extent: &Extent2i) -> Self::SrcIter;
}

/// A map that can receive a copy of `Src` over some extent. Writes outside of the map's bounds
/// are ignored.
pub trait WriteExtent<Src> {
    fn write_extent(&mut self, extent: &Extent2i, src: Src);
}

/// Copy all points of `extent` from `src_map` to `dst_map`. Only the intersection of `extent`
/// with both maps' bounds is actually written.
pub fn copy_extent<'a, Src, Ms, Md>(extent: &Extent2i, src_map: &'a Ms, dst_map: &mut Md)
where
    Ms: ReadExtent<'a, Src = Src>,
    Md: WriteExtent<Src>,
{
    for (sub_extent, extent_src) in src_map.read_extent(extent) {
        dst_map.write_extent(&sub_extent, extent_src);
    }
}

// ███████╗██╗   ██╗███╗   ██╗ ██████╗
// ██╔════╝██║   ██║████╗  ██║██╔════╝
// █████╗  ██║   ██║██╔██╗ ██║██║
// ██╔══╝  ██║   ██║██║╚██╗██║██║
// ██║     ╚██████╔╝██║ ╚████║╚██████╗
// ╚═╝      ╚═════╝ ╚═╝  ╚═══╝ ╚═════╝

/// A pure function of `Point2i`, usable as a read-only lattice map over any extent.
pub struct Func<F>(pub F);

impl<F, T, Coord> Get<Coord> for Func<F>
where
    F: Fn(Coord) -> T,
{
    type Data = T;

    fn get(&self, c: Coord) -> T {
        (self.0)(c)
    }
}

impl<F, T> ForEach<Point2i> for Func<F>
where
    F: Fn(Point2i) -> T,
{
    type Item = T;

    fn for_each(&self, extent: &Extent2i, mut f: impl FnMut(Point2i, T)) {
        for p in extent.iter_points() {
            f(p, (self.0)(p))
        }
    }
}

impl<'a, F, T> ReadExtent<'a> for Func<F>
where
    F: 'a + Fn(Point2i) -> T,
{
    type Src = &'a F;
    type SrcIter = Once<(Extent2i, Self::Src)>;

    fn read_extent(&'a self, extent: &Extent2i) -> Self::SrcIter {
        once((*extent, &self.0))
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
    use crate::grid::PixelGrid;

    #[test]
    fn copy_func_into_grid() {
        let extent = Extent2i::from_min_and_shape(Point2i([-1, -1]), Point2i([3, 3]));
        let mut grid = PixelGrid::fill(extent, 0);

        copy_extent(&extent, &Func(|p: Point2i| p.x() as i16), &mut grid);

        grid.for_each(&extent, |p: Point2i, value| assert_eq!(value, p.x() as i16));
    }

    #[test]
    fn copy_clips_to_destination_bounds() {
        let dst_extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i([2, 2]));
        let mut grid = PixelGrid::fill(dst_extent, 0);

        let big_extent = Extent2i::from_min_and_shape(Point2i([-10, -10]), Point2i([20, 20]));
        copy_extent(&big_extent, &Func(|_: Point2i| 1i16), &mut grid);

        assert_eq!(grid.values_slice(), &[1, 1, 1, 1]);
    }

    #[test]
    fn copy_clips_to_source_bounds() {
        let src_extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i([1, 1]));
        let src = PixelGrid::fill(src_extent, 7);

        let dst_extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i([2, 2]));
        let mut dst = PixelGrid::fill(dst_extent, 0);

        copy_extent(&dst_extent, &src, &mut dst);

        assert_eq!(dst.values_slice(), &[7, 0, 0, 0]);
    }

    #[test]
    fn func_get_applies_function() {
        let func = Func(|p: Point2i| p.x() + p.y());

        assert_eq!(func.get(Point2i([2, 3])), 5);
    }
}
