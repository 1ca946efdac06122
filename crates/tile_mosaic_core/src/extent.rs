use crate::Point2i;

use core::ops::Range;
use itertools::{iproduct, Product};
use serde::{Deserialize, Serialize};

/// A 2-dimensional extent. This is mathematically the Cartesian product of a half-closed interval
/// `[a, b)` in each dimension. You can also just think of it as an axis-aligned box with some
/// shape and a minimum point. Tile bounds and plane bounds are both extents, and when tiles get
/// copied into planes, this is the structure used to determine the bounds of the copy.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Extent2i {
    /// The least point contained in the extent.
    pub minimum: Point2i,
    /// The length of each dimension.
    pub shape: Point2i,
}

impl Extent2i {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: Point2i, shape: Point2i) -> Self {
        Self { minimum, shape }
    }

    /// An alternative representation of an extent as the minimum point and least upper bound.
    #[inline]
    pub fn from_min_and_lub(minimum: Point2i, least_upper_bound: Point2i) -> Self {
        // We want to avoid negative shape components.
        let shape = (least_upper_bound - minimum).join(Point2i::ZERO);

        Self { minimum, shape }
    }

    /// An alternative representation of an extent as the minimum point and maximum point. Integer
    /// extents have a unique maximum.
    #[inline]
    pub fn from_min_and_max(minimum: Point2i, max: Point2i) -> Self {
        Self::from_min_and_lub(minimum, max + Point2i::ONES)
    }

    /// Translate the extent such that it has `new_min` as its new minimum.
    #[inline]
    pub fn with_minimum(&self, new_min: Point2i) -> Self {
        Self::from_min_and_shape(new_min, self.shape)
    }

    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> Point2i {
        self.minimum + self.shape
    }

    /// The unique greatest point in the extent.
    #[inline]
    pub fn max(&self) -> Point2i {
        self.least_upper_bound() - Point2i::ONES
    }

    /// Returns `true` iff the point `p` is contained in this extent.
    #[inline]
    pub fn contains(&self, p: Point2i) -> bool {
        let lub = self.least_upper_bound();

        self.minimum <= p && p < lub
    }

    /// The number of points contained in the extent.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.shape.volume() as usize
    }

    /// Returns `true` iff the number of points in the extent is 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// Returns the extent containing only the points in both `self` and `other`.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        let minimum = self.minimum.join(other.minimum);
        let lub = self.least_upper_bound().meet(other.least_upper_bound());

        Self::from_min_and_lub(minimum, lub)
    }

    /// Returns `true` iff the intersection of `self` and `other` is equal to `self`.
    #[inline]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.intersection(other).eq(self)
    }

    /// Iterate over all points in the extent, in row-major order.
    /// ```
    /// # use tile_mosaic_core::prelude::*;
    /// #
    /// let extent = Extent2i::from_min_and_shape(Point2i([0, 0]), Point2i([2, 2]));
    /// let points = extent.iter_points().collect::<Vec<_>>();
    /// assert_eq!(points, vec![
    ///     Point2i([0, 0]), Point2i([1, 0]), Point2i([0, 1]), Point2i([1, 1])
    /// ]);
    /// ```
    #[inline]
    pub fn iter_points(&self) -> ExtentPointIter {
        let lub = self.least_upper_bound();

        ExtentPointIter {
            // iproduct is opposite of row-major order.
            product_iter: iproduct!(self.minimum.y()..lub.y(), self.minimum.x()..lub.x()),
        }
    }
}

/// An iterator over all points in an `Extent2i`.
pub struct ExtentPointIter {
    product_iter: Product<Range<i32>, Range<i32>>,
}

impl Iterator for ExtentPointIter {
    type Item = Point2i;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.product_iter.next().map(|(y, x)| Point2i([x, y]))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
