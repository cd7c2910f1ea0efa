//! Small numeric and geometric helpers shared by the voxel crates.

pub mod bounds;
pub mod ray;

use cgmath::{Point3, Vector3};

pub use bounds::Bounds;
pub use ray::VoxelRaycast;

pub trait DivDown {
    /// Divides and rounds the result towards negative infinity.
    fn div_down(self, divisor: Self) -> Self;
}

pub trait DivUp {
    /// Divides and rounds the result towards positive infinity.
    fn div_up(self, divisor: Self) -> Self;
}

#[macro_export]
macro_rules! convert_point {
    ($val:expr, $type:ty) => {
        cgmath::Point3 {
            x: $val.x as $type,
            y: $val.y as $type,
            z: $val.z as $type,
        }
    };
}

#[macro_export]
macro_rules! convert_vec {
    ($val:expr, $type:ty) => {
        cgmath::Vector3 {
            x: $val.x as $type,
            y: $val.y as $type,
            z: $val.z as $type,
        }
    };
}

impl DivDown for i64 {
    #[inline]
    fn div_down(self, divisor: i64) -> i64 {
        assert!(divisor != 0);
        let d = self / divisor;
        if self % divisor != 0 && (self < 0) != (divisor < 0) {
            d - 1
        } else {
            d
        }
    }
}

impl DivUp for i64 {
    #[inline]
    fn div_up(self, divisor: i64) -> i64 {
        assert!(divisor != 0);
        let d = self / divisor;
        if self % divisor != 0 && (self < 0) == (divisor < 0) {
            d + 1
        } else {
            d
        }
    }
}

macro_rules! impl_div_trait_pv {
    ($pv:tt, $trait:path, $method:tt) => {
        impl<T> $trait for $pv<T>
        where
            T: $trait,
        {
            #[inline]
            fn $method(self, divisor: $pv<T>) -> Self {
                $pv {
                    x: self.x.$method(divisor.x),
                    y: self.y.$method(divisor.y),
                    z: self.z.$method(divisor.z),
                }
            }
        }
    };
}


impl_div_trait_pv!(Vector3, DivDown, div_down);
impl_div_trait_pv!(Vector3, DivUp, div_up);
impl_div_trait_pv!(Point3, DivDown, div_down);
impl_div_trait_pv!(Point3, DivUp, div_up);
