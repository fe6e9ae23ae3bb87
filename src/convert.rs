//! Element-width and numeric-domain conversions.
//!
//! Every conversion keeps the lane count. Which of value or bit pattern is
//! preserved is part of each conversion's contract:
//!
//! | conversion      | preserves                                                     |
//! |-----------------|---------------------------------------------------------------|
//! | `promote`       | value (exact)                                                 |
//! | `degrade`       | integers: low bits (truncation); floats: value, rounded to nearest |
//! | `to_float`      | value, rounded to nearest when not representable              |
//! | `to_int`/`to_uint` | value truncated toward zero, saturating, NaN becomes 0     |
//! | `reinterpret`   | bit pattern                                                   |

use num::traits::AsPrimitive;

use crate::element::{Element, FloatElement, IntElement};
use crate::simd::lanes::{LaneCount, SupportedLaneCount};
use crate::vector::Vector;

/// Elements with a twice-as-wide counterpart of the same domain.
pub trait Promote: Element {
    type Wider: Element;

    fn promote(self) -> Self::Wider;
}

/// Elements with a half-as-wide counterpart of the same domain.
pub trait Degrade: Element {
    type Narrower: Element;

    fn degrade(self) -> Self::Narrower;
}

/// Integers with a float counterpart of the same width.
pub trait ToFloat: IntElement {
    type Float: FloatElement;

    fn to_float(self) -> Self::Float;
}

/// Floats with signed and unsigned integer counterparts of the same width.
pub trait ToInt: FloatElement {
    type Int: IntElement;
    type Uint: IntElement;

    fn to_int(self) -> Self::Int;
    fn to_uint(self) -> Self::Uint;
}

/// Integers with an opposite-signedness counterpart of the same width.
pub trait Reinterpret: IntElement {
    type Flipped: IntElement;

    fn reinterpret(self) -> Self::Flipped;
}

macro_rules! width_pairs {
    ($($narrow:ty => $wide:ty),* $(,)?) => {$(
        impl Promote for $narrow {
            type Wider = $wide;

            #[inline(always)]
            fn promote(self) -> $wide {
                self.as_()
            }
        }

        impl Degrade for $wide {
            type Narrower = $narrow;

            #[inline(always)]
            fn degrade(self) -> $narrow {
                self.as_()
            }
        }
    )*};
}

width_pairs! {
    u8 => u16,
    u16 => u32,
    u32 => u64,
    i8 => i16,
    i16 => i32,
    i32 => i64,
    f32 => f64,
}

macro_rules! domain_pairs {
    ($($float:ty => $int:ty, $uint:ty);* $(;)?) => {$(
        impl ToFloat for $int {
            type Float = $float;

            #[inline(always)]
            fn to_float(self) -> $float {
                self.as_()
            }
        }

        impl ToFloat for $uint {
            type Float = $float;

            #[inline(always)]
            fn to_float(self) -> $float {
                self.as_()
            }
        }

        impl ToInt for $float {
            type Int = $int;
            type Uint = $uint;

            #[inline(always)]
            fn to_int(self) -> $int {
                self.as_()
            }

            #[inline(always)]
            fn to_uint(self) -> $uint {
                self.as_()
            }
        }
    )*};
}

domain_pairs! {
    f32 => i32, u32;
    f64 => i64, u64;
}

macro_rules! sign_pairs {
    ($($signed:ty => $unsigned:ty),* $(,)?) => {$(
        impl Reinterpret for $signed {
            type Flipped = $unsigned;

            #[inline(always)]
            fn reinterpret(self) -> $unsigned {
                self as $unsigned
            }
        }

        impl Reinterpret for $unsigned {
            type Flipped = $signed;

            #[inline(always)]
            fn reinterpret(self) -> $signed {
                self as $signed
            }
        }
    )*};
}

sign_pairs! {
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
}

impl<T, const N: usize> Vector<T, N>
where
    T: Promote,
    LaneCount<N>: SupportedLaneCount,
{
    /// Widens every lane, keeping its value.
    #[inline(always)]
    pub fn promote(self) -> Vector<T::Wider, N> {
        Vector::from_array(self.to_array().map(T::promote))
    }
}

impl<T, const N: usize> Vector<T, N>
where
    T: Degrade,
    LaneCount<N>: SupportedLaneCount,
{
    /// Narrows every lane. Integers keep their low bits, floats round to
    /// nearest.
    #[inline(always)]
    pub fn degrade(self) -> Vector<T::Narrower, N> {
        Vector::from_array(self.to_array().map(T::degrade))
    }
}

impl<T, const N: usize> Vector<T, N>
where
    T: ToFloat,
    LaneCount<N>: SupportedLaneCount,
{
    #[inline(always)]
    pub fn to_float(self) -> Vector<T::Float, N> {
        Vector::from_array(self.to_array().map(T::to_float))
    }
}

impl<T, const N: usize> Vector<T, N>
where
    T: ToInt,
    LaneCount<N>: SupportedLaneCount,
{
    /// Truncates toward zero into signed lanes. Out-of-range values
    /// saturate and NaN becomes 0.
    #[inline(always)]
    pub fn to_int(self) -> Vector<T::Int, N> {
        Vector::from_array(self.to_array().map(T::to_int))
    }

    /// Truncates toward zero into unsigned lanes. Negative values become 0.
    #[inline(always)]
    pub fn to_uint(self) -> Vector<T::Uint, N> {
        Vector::from_array(self.to_array().map(T::to_uint))
    }
}

impl<T, const N: usize> Vector<T, N>
where
    T: Reinterpret,
    LaneCount<N>: SupportedLaneCount,
{
    /// Flips signedness, keeping every bit: `-1i32` becomes `u32::MAX`.
    #[inline(always)]
    pub fn reinterpret(self) -> Vector<T::Flipped, N> {
        Vector::from_array(self.to_array().map(T::reinterpret))
    }
}
