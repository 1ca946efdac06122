use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use num::Integer;
use serde::{Deserialize, Serialize};

/// A 2-dimensional integer point, wrapping a primitive array so that it is convenient to
/// construct:
///
/// ```
/// use tile_mosaic_core::Point2i;
///
/// let p = Point2i([1, 2]);
/// ```
///
/// Points support basic linear algebraic operations such as addition, subtraction, scalar
/// multiplication, and scalar division.
///
/// ```
/// use tile_mosaic_core::Point2i;
///
/// let p1 = Point2i([1, 2]);
/// let p2 = Point2i([3, 4]);
///
/// assert_eq!(p1 + p2, Point2i([4, 6]));
/// assert_eq!(p1 - p2, Point2i([-2, -2]));
///
/// assert_eq!(p1 * 2, Point2i([2, 4]));
/// assert_eq!(p1 / 2, Point2i([0, 1]));
/// ```
///
/// There is also a partial order defined on points which says that a point A is greater than a
/// point B if and only if all of the components of point A are greater than point B. This is
/// useful for easily checking if a point is inside of the extent between two other points:
///
/// ```
/// use tile_mosaic_core::Point2i;
///
/// let min = Point2i([0, 0]);
/// let least_upper_bound = Point2i([3, 3]);
///
/// let p = Point2i([0, 1]);
/// assert!(min <= p && p < least_upper_bound);
/// ```
#[derive(Copy, Clone, Debug, Deserialize, Default, Eq, Hash, PartialEq, Serialize)]
pub struct Point2i(pub [i32; 2]);

impl Point2i {
    /// A point of all zeros.
    pub const ZERO: Self = Point2i([0; 2]);
    /// A point of all ones.
    pub const ONES: Self = Point2i([1; 2]);

    /// A point with the same `value` in both components.
    #[inline]
    pub fn fill(value: i32) -> Self {
        Point2i([value; 2])
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.0[1]
    }

    /// Returns the point after applying `f` component-wise.
    #[inline]
    pub fn map_components_unary(&self, f: impl Fn(i32) -> i32) -> Self {
        Point2i([f(self.x()), f(self.y())])
    }

    /// Returns the point after applying `f` component-wise to both `self` and `other` in parallel.
    #[inline]
    pub fn map_components_binary(&self, other: &Self, f: impl Fn(i32, i32) -> i32) -> Self {
        Point2i([f(self.x(), other.x()), f(self.y(), other.y())])
    }

    /// Component-wise minimum.
    #[inline]
    pub fn meet(&self, other: Self) -> Self {
        self.map_components_binary(&other, std::cmp::min)
    }

    /// Component-wise maximum.
    #[inline]
    pub fn join(&self, other: Self) -> Self {
        self.map_components_binary(&other, std::cmp::max)
    }

    /// The product of the components, e.g. the number of points in an extent with this shape.
    #[inline]
    pub fn volume(&self) -> i32 {
        self.x() * self.y()
    }

    #[inline]
    pub fn scalar_div_floor(&self, rhs: i32) -> Self {
        self.map_components_unary(|c| c.div_floor(&rhs))
    }

    #[inline]
    pub fn scalar_div_ceil(&self, rhs: i32) -> Self {
        self.map_components_unary(|c| c.div_ceil(&rhs))
    }

    #[inline]
    pub fn vector_div_floor(&self, rhs: &Self) -> Self {
        self.map_components_binary(rhs, |c1, c2| c1.div_floor(&c2))
    }

    #[inline]
    pub fn vector_div_ceil(&self, rhs: &Self) -> Self {
        self.map_components_binary(rhs, |c1, c2| c1.div_ceil(&c2))
    }
}

impl Add for Point2i {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 + c2)
    }
}

impl Sub for Point2i {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 - c2)
    }
}

impl AddAssign for Point2i {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Point2i {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Point2i {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl Mul<i32> for Point2i {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        self.map_components_unary(|c| rhs * c)
    }
}

impl Mul<Point2i> for Point2i {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 * c2)
    }
}

// Use floor division instead of the primitive Div impl, which rounds towards zero. That would
// give the wrong answer for extents with negative coordinates.
impl Div<i32> for Point2i {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self {
        self.scalar_div_floor(rhs)
    }
}

impl Div<Point2i> for Point2i {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.vector_div_floor(&rhs)
    }
}

// This particular partial order allows us to say that an `Extent2i` e contains a `Point2i` p iff
// p is GEQ the minimum of e and p is LEQ the maximum of e.
impl PartialOrd for Point2i {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else if self.x() == other.x() && self.y() == other.y() {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.x() < other.x() && self.y() < other.y()
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        self.x() > other.x() && self.y() > other.y()
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.x() <= other.x() && self.y() <= other.y()
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        self.x() >= other.x() && self.y() >= other.y()
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

    #[test]
    fn div_rounds_down_for_negative_coordinates() {
        assert_eq!(Point2i([-3, 3]) / 2, Point2i([-2, 1]));
    }

    #[test]
    fn ceil_div_covers_remainders() {
        let plane = Point2i([5000, 3000]);
        let tile = Point2i([256, 256]);

        assert_eq!(plane.vector_div_ceil(&tile), Point2i([20, 12]));
        assert_eq!(Point2i([512, 512]).vector_div_ceil(&tile), Point2i([2, 2]));
        assert_eq!(plane.scalar_div_ceil(256), Point2i([20, 12]));
    }

    #[test]
    fn compound_assignment_and_negation() {
        let mut p = Point2i([1, 2]);
        p += Point2i([10, 20]);
        assert_eq!(p, Point2i([11, 22]));

        p -= Point2i([1, 2]);
        assert_eq!(p, Point2i([10, 20]));

        assert_eq!(-p, Point2i([-10, -20]));
    }

    #[test]
    fn meet_and_join_are_componentwise() {
        let p1 = Point2i([1, 4]);
        let p2 = Point2i([3, 2]);

        assert_eq!(p1.meet(p2), Point2i([1, 2]));
        assert_eq!(p1.join(p2), Point2i([3, 4]));
    }

    #[test]
    fn incomparable_points_have_no_order() {
        let p1 = Point2i([0, 1]);
        let p2 = Point2i([1, 0]);

        assert_eq!(p1.partial_cmp(&p2), None);
        assert!(!(p1 <= p2));
        assert!(!(p1 >= p2));
    }
}
