//! Numeric element types that can live inside a [`Grid`](super::Grid).
//!
//! Convolution and blending accumulate in `f64`, which is at least as wide
//! as every supported element type. [`Element::from_f64`] converts the
//! accumulated value back: integer types round to nearest and saturate at
//! their bounds, float types convert directly.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

use num_traits::AsPrimitive;

/// A numeric value stored in a grid.
pub trait Element:
    Copy
    + Default
    + PartialOrd
    + Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AsPrimitive<f64>
    + 'static
{
    /// Convert an accumulator value back into this element type.
    fn from_f64(value: f64) -> Self;

    /// Widen to the accumulator type.
    #[inline]
    fn to_f64(self) -> f64 {
        self.as_()
    }
}

macro_rules! impl_integer_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                #[inline]
                fn from_f64(value: f64) -> Self {
                    // `as` saturates and maps NaN to zero
                    value.round() as $t
                }
            }
        )*
    };
}

macro_rules! impl_float_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_integer_element!(u8, u16, u32, u64, i8, i16, i32, i64, usize, isize);
impl_float_element!(f32, f64);
