use cgmath::{BaseNum, EuclideanSpace, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{DivDown, DivUp};

/// Represents a half-open cuboid of points: the origin is inclusive and the limit is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(C)]
pub struct Bounds<T> {
    origin: Point3<T>,
    size: Vector3<T>,
}

impl<T> Bounds<T> {
    pub fn origin(self) -> Point3<T> {
        self.origin
    }

    pub fn size(self) -> Vector3<T> {
        self.size
    }
}

impl<T: BaseNum> Bounds<T> {
    #[inline]
    pub fn new(origin: Point3<T>, size: Vector3<T>) -> Self {
        assert!(size.x >= T::zero());
        assert!(size.y >= T::zero());
        assert!(size.z >= T::zero());
        Bounds { origin, size }
    }

    #[inline]
    pub fn from_limit(origin: Point3<T>, limit: Point3<T>) -> Self {
        assert!(origin.x <= limit.x);
        assert!(origin.y <= limit.y);
        assert!(origin.z <= limit.z);
        Bounds::new(origin, limit - origin)
    }

    /// Bounds extending `radius` in every direction from `center`. The center point is included
    /// and so is every point whose offset on each axis lies in `-radius..radius`.
    #[inline]
    pub fn around(center: Point3<T>, radius: T) -> Self {
        let r = Vector3::new(radius, radius, radius);
        Bounds::from_limit(center - r, center + r)
    }

    #[inline]
    pub fn limit(self) -> Point3<T> {
        self.origin + self.size
    }

    #[inline]
    pub fn contains_point(self, point: Point3<T>) -> bool {
        let limit = self.limit();
        point.x >= self.origin.x
            && point.x < limit.x
            && point.y >= self.origin.y
            && point.y < limit.y
            && point.z >= self.origin.z
            && point.z < limit.z
    }

    #[inline]
    /// If the size is 0 in any dimension, the bounds object is empty.
    pub fn is_empty(self) -> bool {
        self.size.x == T::zero() || self.size.y == T::zero() || self.size.z == T::zero()
    }

    /// Returns the smallest bounding box that holds all the points in `self`, when `self` is
    /// divided into quanta of size `quantum_size`.
    ///
    /// The result is given in units of quanta.
    #[inline]
    pub fn quantize_down(self, quantum_size: Vector3<T>) -> Self
    where
        T: DivUp + DivDown,
    {
        Bounds::from_limit(
            self.origin.div_down(Point3::origin() + quantum_size),
            self.limit().div_up(Point3::origin() + quantum_size),
        )
    }

    /// Visits every point in the bounds, x varying fastest and z slowest.
    #[inline]
    pub fn iter_points(self) -> impl Iterator<Item = Point3<T>>
    where
        std::ops::Range<T>: Iterator<Item = T>,
        T: Copy + 'static,
    {
        let origin = self.origin();
        let limit = self.limit();

        (origin.z..limit.z).flat_map(move |z| {
            (origin.y..limit.y)
                .flat_map(move |y| (origin.x..limit.x).map(move |x| Point3 { x, y, z }))
        })
    }

    #[inline]
    pub fn volume(self) -> T {
        self.size.x * self.size.y * self.size.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_down() {
        let large = Bounds::from_limit(Point3::new(-15, -3, -31), Point3::new(-1, 30, -16));

        let small = large.quantize_down(Vector3::new(16, 16, 16));

        assert_eq!(small.origin(), Point3::new(-1, -1, -2));
        assert_eq!(small.limit(), Point3::new(0, 2, -1));
    }

    #[test]
    fn test_quantize_down_holds_every_quantum() {
        let blocks = Bounds::from_limit(Point3::new(-40i64, 0, 5), Point3::new(3, 64, 33));
        let quantum = Vector3::new(32, 32, 32);
        let chunks = blocks.quantize_down(quantum);

        assert_eq!(chunks.origin(), Point3::new(-2, 0, 0));
        assert_eq!(chunks.limit(), Point3::new(1, 2, 2));
        assert!(blocks
            .iter_points()
            .all(|p| chunks.contains_point(p.div_down(Point3::origin() + quantum))));
    }

    #[test]
    fn test_around() {
        let bounds = Bounds::around(Point3::new(0i64, 0, 0), 2);
        assert_eq!(bounds.origin(), Point3::new(-2, -2, -2));
        assert_eq!(bounds.size(), Vector3::new(4, 4, 4));
        assert!(bounds.contains_point(Point3::new(-2, 1, 0)));
        assert!(!bounds.contains_point(Point3::new(2, 0, 0)));
    }

    #[test]
    fn test_iter_points() {
        let bounds = Bounds::new(Point3::new(1, -1, 0), Vector3::new(2, 2, 1));
        let points: Vec<_> = bounds.iter_points().collect();
        assert_eq!(
            points,
            vec![
                Point3::new(1, -1, 0),
                Point3::new(2, -1, 0),
                Point3::new(1, 0, 0),
                Point3::new(2, 0, 0),
            ]
        );
        assert_eq!(points.len() as i32, bounds.volume());

        let empty = Bounds::new(Point3::new(0, 0, 0), Vector3::new(3, 0, 3));
        assert!(empty.is_empty());
        assert_eq!(empty.iter_points().count(), 0);
    }
}
