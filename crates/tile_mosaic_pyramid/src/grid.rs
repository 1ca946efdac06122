//! A dense 2D lattice map that stores values with row-major encoding.
//!
//! Tiles and assembled planes are both `Grid2`s. Each grid carries the `Extent2i` it occupies,
//! so a tile generated for some region of a plane can be copied into the plane without any
//! bookkeeping on the caller's part; [`copy_extent`](crate::access::copy_extent) lines the
//! extents up by itself.
//!
//! # Indexing
//!
//! You can index a grid with 3 kinds of coordinates, with [`Get`](crate::access) traits:
//!   - `Get*<Stride>`: flat offset into the underlying slice
//!   - `Get*<Local>`: a point relative to the grid minimum
//!   - `Get*<Point2i>`: a point in global coordinates
//!
//! Indexing assumes that the coordinates are in-bounds of the grid, panicking otherwise.
//!
//! # Iteration
//!
//! The `ForEach*` traits visit a subextent of the grid in row-major order:
//!
//! ```
//! use tile_mosaic_core::prelude::*;
//! use tile_mosaic_pyramid::prelude::*;
//!
//! let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i([8, 8]));
//! let grid = PixelGrid::fill_with(extent, |p| (p.x() * p.y()) as Pixel);
//!
//! let subextent = Extent2i::from_min_and_shape(Point2i([1, 1]), Point2i([2, 2]));
//! let mut sum = 0;
//! grid.for_each(&subextent, |_: (), value| sum += value as i32);
//! assert_eq!(sum, 1 + 2 + 2 + 4);
//! ```
//!
//! # Storage
//!
//! By default, `Grid2` uses a `Vec` to store elements, but any slice will do. Borrowed storage
//! lets callers wrap pixels they already own:
//!
//! ```
//! use tile_mosaic_core::prelude::*;
//! use tile_mosaic_pyramid::prelude::*;
//!
//! let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i([2, 2]));
//! let values = [0i16, 1, 2, 3];
//! let grid = Grid2::new(extent, &values[..]);
//! assert_eq!(grid.get(Point2i([0, 1])), 2);
//! ```

use crate::access::{
    ForEach, ForEachMut, Get, GetMut, GetRef, GetUnchecked, GetUncheckedRelease, ReadExtent,
    WriteExtent,
};
use crate::raw_bytes::IntoRawBytes;

use tile_mosaic_core::{Extent2i, Point2i};

use core::iter::{once, Once};
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use serde::{Deserialize, Serialize};

/// The sample type produced by tile generation: signed 16-bit, like the acquisition data these
/// synthetic tiles stand in for.
pub type Pixel = i16;

/// A `Grid2` of `Pixel` values. The concrete type of every tile and every assembled plane.
pub type PixelGrid = Grid2<Pixel>;

/// Grid-local coordinates.
///
/// A bare `Point2i` is assumed to be in global coordinates. `Local` marks a point that has
/// already been translated to be relative to a grid's minimum, so it converts to a `Stride`
/// with one multiply and one add.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Local(pub Point2i);

impl Deref for Local {
    type Target = Point2i;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The most efficient coordinates for slice-backed grids. A single offset into the row-major
/// storage.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Stride(pub usize);

/// A map from `Point2i` to `T`, implemented as a dense array with row-major encoding.
///
/// Each grid remembers the extent it occupies, and all indexing, iteration, and copying is done
/// in those global coordinates.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Grid2<T, Store = Vec<T>> {
    values: Store,
    extent: Extent2i,
    marker: PhantomData<T>,
}

impl<T, Store> Grid2<T, Store> {
    /// The extent of this grid, in global coordinates.
    #[inline]
    pub fn extent(&self) -> &Extent2i {
        &self.extent
    }

    #[inline]
    pub fn contains(&self, p: Point2i) -> bool {
        self.extent.contains(p)
    }

    /// Moves the raw storage out of `self`.
    #[inline]
    pub fn into_parts(self) -> (Extent2i, Store) {
        (self.extent, self.values)
    }

    /// The flat offset of `p`, a point relative to the grid minimum.
    #[inline]
    pub fn stride_from_local_point(&self, p: Local) -> Stride {
        Stride((p.y() * self.extent.shape.x() + p.x()) as usize)
    }
}

impl<T, Store> Grid2<T, Store>
where
    Store: Deref<Target = [T]>,
{
    /// Creates a grid over `extent`, populated by `values` in row-major order.
    ///
    /// # Panics
    /// If `values` does not have exactly `extent.num_points()` elements.
    pub fn new(extent: Extent2i, values: Store) -> Self {
        assert_eq!(
            extent.num_points(),
            values.len(),
            "grid of extent {:?} needs {} value(s), got {}",
            extent,
            extent.num_points(),
            values.len()
        );

        Self {
            values,
            extent,
            marker: PhantomData,
        }
    }

    #[inline]
    pub fn values_slice(&self) -> &[T] {
        &self.values[..]
    }
}

impl<T, Store> Grid2<T, Store>
where
    Store: DerefMut<Target = [T]>,
{
    #[inline]
    pub fn values_mut_slice(&mut self) -> &mut [T] {
        &mut self.values[..]
    }
}

impl<T> Grid2<T>
where
    T: Clone,
{
    /// Creates a grid that fills `extent` with `value`.
    pub fn fill(extent: Extent2i, value: T) -> Self {
        Self::new(extent, vec![value; extent.num_points()])
    }
}

impl<T> Grid2<T> {
    /// Creates a grid over `extent` where the value at each point is produced by `filler`.
    pub fn fill_with(extent: Extent2i, filler: impl FnMut(Point2i) -> T) -> Self {
        // Point iteration is row-major, the same order as the storage encoding.
        Self::new(extent, extent.iter_points().map(filler).collect())
    }
}

// ██████╗ ███████╗████████╗████████╗███████╗██████╗ ███████╗
// ██╔════╝ ██╔════╝╚══██╔══╝╚══██╔══╝██╔════╝██╔══██╗██╔════╝
// ██║  ███╗█████╗     ██║      ██║   █████╗  ██████╔╝███████╗
// ██║   ██║██╔══╝     ██║      ██║   ██╔══╝  ██╔══██╗╚════██║
// ╚██████╔╝███████╗   ██║      ██║   ███████╗██║  ██║███████║
//  ╚═════╝ ╚══════╝   ╚═╝      ╚═╝   ╚══════╝╚═╝  ╚═╝╚══════╝

impl<L, T, Store> Get<L> for Grid2<T, Store>
where
    Self: GetRef<L, Data = T>,
    T: Clone,
{
    type Data = T;

    #[inline]
    fn get(&self, location: L) -> T {
        self.get_ref(location).clone()
    }
}

impl<T, Store> GetRef<Stride> for Grid2<T, Store>
where
    Store: Deref<Target = [T]>,
{
    type Data = T;

    #[inline]
    fn get_ref(&self, stride: Stride) -> &T {
        &self.values[stride.0]
    }
}

impl<T, Store> GetMut<Stride> for Grid2<T, Store>
where
    Store: DerefMut<Target = [T]>,
{
    type Data = T;

    #[inline]
    fn get_mut(&mut self, stride: Stride) -> &mut T {
        &mut self.values[stride.0]
    }
}

impl<T, Store> GetUnchecked<Stride> for Grid2<T, Store>
where
    T: Clone,
    Store: Deref<Target = [T]>,
{
    type Data = T;

    #[inline]
    unsafe fn get_unchecked(&self, stride: Stride) -> T {
        self.values.get_unchecked(stride.0).clone()
    }
}

impl<T, Store> GetRef<Local> for Grid2<T, Store>
where
    Store: Deref<Target = [T]>,
{
    type Data = T;

    #[inline]
    fn get_ref(&self, local: Local) -> &T {
        self.get_ref(self.stride_from_local_point(local))
    }
}

impl<T, Store> GetMut<Local> for Grid2<T, Store>
where
    Store: DerefMut<Target = [T]>,
{
    type Data = T;

    #[inline]
    fn get_mut(&mut self, local: Local) -> &mut T {
        let stride = self.stride_from_local_point(local);

        self.get_mut(stride)
    }
}

impl<T, Store> GetUnchecked<Local> for Grid2<T, Store>
where
    T: Clone,
    Store: Deref<Target = [T]>,
{
    type Data = T;

    #[inline]
    unsafe fn get_unchecked(&self, local: Local) -> T {
        self.get_unchecked(self.stride_from_local_point(local))
    }
}

impl<T, Store> GetRef<Point2i> for Grid2<T, Store>
where
    Store: Deref<Target = [T]>,
{
    type Data = T;

    #[inline]
    fn get_ref(&self, p: Point2i) -> &T {
        self.get_ref(Local(p - self.extent.minimum))
    }
}

impl<T, Store> GetMut<Point2i> for Grid2<T, Store>
where
    Store: DerefMut<Target = [T]>,
{
    type Data = T;

    #[inline]
    fn get_mut(&mut self, p: Point2i) -> &mut T {
        let local = Local(p - self.extent.minimum);

        self.get_mut(local)
    }
}

impl<T, Store> GetUnchecked<Point2i> for Grid2<T, Store>
where
    T: Clone,
    Store: Deref<Target = [T]>,
{
    type Data = T;

    #[inline]
    unsafe fn get_unchecked(&self, p: Point2i) -> T {
        self.get_unchecked(Local(p - self.extent.minimum))
    }
}

// ███████╗ ██████╗ ██████╗     ███████╗ █████╗  ██████╗██╗  ██╗
// ██╔════╝██╔═══██╗██╔══██╗    ██╔════╝██╔══██╗██╔════╝██║  ██║
// █████╗  ██║   ██║██████╔╝    █████╗  ███████║██║     ███████║
// ██╔══╝  ██║   ██║██╔══██╗    ██╔══╝  ██╔══██║██║     ██╔══██║
// ██║     ╚██████╔╝██║  ██║    ███████╗██║  ██║╚██████╗██║  ██║
// ╚═╝      ╚═════╝ ╚═╝  ╚═╝    ╚══════╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝

/// Visits the points of an extent clamped inside some grid, producing each point together with
/// its stride into the grid's storage.
#[derive(Clone, Copy)]
pub(crate) struct Grid2ForEach {
    iter_extent: Extent2i,
    grid_shape: Point2i,
    index_min: Local,
}

impl Grid2ForEach {
    pub fn new_global(grid_extent: &Extent2i, iter_extent: Extent2i) -> Self {
        // Don't index out of bounds.
        let iter_extent = iter_extent.intersection(grid_extent);

        Self {
            iter_extent,
            grid_shape: grid_extent.shape,
            index_min: Local(iter_extent.minimum - grid_extent.minimum),
        }
    }

    pub fn for_each_point_and_stride(self, mut f: impl FnMut(Point2i, Stride)) {
        let y_stride = self.grid_shape.x() as usize;
        let lub = self.iter_extent.least_upper_bound();

        let mut row_start = self.index_min.y() as usize * y_stride + self.index_min.x() as usize;
        for y in self.iter_extent.minimum.y()..lub.y() {
            let mut i = row_start;
            for x in self.iter_extent.minimum.x()..lub.x() {
                f(Point2i([x, y]), Stride(i));
                i += 1;
            }
            row_start += y_stride;
        }
    }
}

macro_rules! impl_grid_for_each {
    (coords: $coords:ty; forwarder = |$p:ident, $stride:ident| $forward_coords:expr;) => {
        impl<T, Store> ForEach<$coords> for Grid2<T, Store>
        where
            T: Clone,
            Store: Deref<Target = [T]>,
        {
            type Item = T;

            fn for_each(&self, iter_extent: &Extent2i, mut f: impl FnMut($coords, T)) {
                let visitor = Grid2ForEach::new_global(&self.extent, *iter_extent);
                visitor.for_each_point_and_stride(|$p, $stride| {
                    f($forward_coords, self.get_unchecked_release($stride))
                });
            }
        }

        impl<'a, T, Store> ForEachMut<'a, $coords> for Grid2<T, Store>
        where
            T: 'a,
            Store: DerefMut<Target = [T]>,
        {
            type Item = &'a mut T;

            fn for_each_mut(
                &'a mut self,
                iter_extent: &Extent2i,
                mut f: impl FnMut($coords, &'a mut T),
            ) {
                let visitor = Grid2ForEach::new_global(&self.extent, *iter_extent);
                // Strides visited by one pass are unique, so these borrows don't overlap.
                let values = self.values.as_mut_ptr();
                visitor.for_each_point_and_stride(|$p, $stride| {
                    f($forward_coords, unsafe { &mut *values.add($stride.0) })
                });
            }
        }
    };
}

impl_grid_for_each!(coords: (Point2i, Stride); forwarder = |p, stride| (p, stride););
impl_grid_for_each!(coords: Point2i; forwarder = |p, _stride| p;);
impl_grid_for_each!(coords: Stride; forwarder = |_p, stride| stride;);
impl_grid_for_each!(coords: (); forwarder = |_p, _stride| (););

//  ██████╗ ██████╗ ██████╗ ██╗   ██╗
// ██╔════╝██╔═══██╗██╔══██╗╚██╗ ██╔╝
// ██║     ██║   ██║██████╔╝ ╚████╔╝
// ██║     ██║   ██║██╔═══╝   ╚██╔╝
// ╚██████╗╚██████╔╝██║        ██║
//  ╚═════╝ ╚═════╝ ╚═╝        ╚═╝

/// A newtype for some grid being used as the source of a copy, so grid-to-grid copies can take
/// a fast path that plain per-point sources can't.
#[doc(hidden)]
#[derive(Clone, Copy)]
pub struct GridCopySrc<M>(pub M);

impl<'a, T: 'a, Store: 'a> ReadExtent<'a> for Grid2<T, Store> {
    type Src = GridCopySrc<&'a Grid2<T, Store>>;
    type SrcIter = Once<(Extent2i, Self::Src)>;

    fn read_extent(&'a self, extent: &Extent2i) -> Self::SrcIter {
        let in_bounds_extent = extent.intersection(&self.extent);

        once((in_bounds_extent, GridCopySrc(self)))
    }
}

impl<'a, T, Store, SrcStore> WriteExtent<GridCopySrc<&'a Grid2<T, SrcStore>>> for Grid2<T, Store>
where
    T: Clone,
    Store: DerefMut<Target = [T]>,
    SrcStore: Deref<Target = [T]>,
{
    fn write_extent(&mut self, extent: &Extent2i, src: GridCopySrc<&'a Grid2<T, SrcStore>>) {
        let src_grid = src.0;
        let in_bounds_extent = extent.intersection(&self.extent);

        if in_bounds_extent.shape == self.extent.shape
            && in_bounds_extent.shape == src_grid.extent.shape
        {
            // Both grids are fully covered, so this is a copy of the entire storage.
            self.values.clone_from_slice(&src_grid.values);

            return;
        }

        // Rows of an extent are contiguous in row-major storage, so copy a whole row at a time.
        let row_len = in_bounds_extent.shape.x() as usize;
        if row_len == 0 {
            return;
        }
        let lub = in_bounds_extent.least_upper_bound();
        for y in in_bounds_extent.minimum.y()..lub.y() {
            let row_min = Point2i([in_bounds_extent.minimum.x(), y]);
            let dst_start = self
                .stride_from_local_point(Local(row_min - self.extent.minimum))
                .0;
            let src_start = src_grid
                .stride_from_local_point(Local(row_min - src_grid.extent.minimum))
                .0;
            self.values[dst_start..dst_start + row_len]
                .clone_from_slice(&src_grid.values[src_start..src_start + row_len]);
        }
    }
}

// A closure of position is a valid copy source. This is how `Func` sources (and plain closures)
// get written into grids.
impl<T, Store, F> WriteExtent<F> for Grid2<T, Store>
where
    T: Clone,
    Store: DerefMut<Target = [T]>,
    F: Fn(Point2i) -> T,
{
    fn write_extent(&mut self, extent: &Extent2i, src: F) {
        self.for_each_mut(extent, |p: Point2i, value| *value = src(p));
    }
}

impl<'a, T, Store> IntoRawBytes<'a> for Grid2<T, Store>
where
    T: 'static + bytemuck::Pod,
    Store: Deref<Target = [T]>,
{
    type Output = &'a [u8];

    fn into_raw_bytes(&'a self) -> Self::Output {
        self.values.into_raw_bytes()
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
