//! Operators with the scalar on the left: `s + v`, `s << v`, `s > v`.
//!
//! Each is defined through the vector's own method for the same operation:
//!
//! - `s - v` is `v.subfrom_scalar(s)` and `s / v` is `v.rcp_scalar(s)`.
//! - `s << v` and `s >> v` broadcast `s` into the *unsigned* counterpart of
//!   its type and shift that by the lanes of `v`, so the result is always an
//!   unsigned vector, whatever the signedness of `s`.
//! - Relational comparisons swap direction: `s > v` is `v.cmplt(s)` and
//!   `s >= v` is `v.cmple(s)`. Rust cannot overload `>` to return a mask, so
//!   these are free functions.

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Shl, Shr, Sub};

use crate::element::Element;
use crate::mask::Mask;
use crate::simd::lanes::{Backing, LaneCount, SupportedLaneCount};
use crate::simd::traits::IntPrimitive;
use crate::vector::Vector;

macro_rules! scalar_left_arithmetic {
    ($($t:ty),* $(,)?) => {$(
        impl<const N: usize> Add<Vector<$t, N>> for $t
        where
            LaneCount<N>: SupportedLaneCount,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn add(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.add_scalar(self)
            }
        }

        impl<const N: usize> Sub<Vector<$t, N>> for $t
        where
            LaneCount<N>: SupportedLaneCount,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn sub(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.subfrom_scalar(self)
            }
        }

        impl<const N: usize> Mul<Vector<$t, N>> for $t
        where
            LaneCount<N>: SupportedLaneCount,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn mul(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.mul_scalar(self)
            }
        }

        impl<const N: usize> Div<Vector<$t, N>> for $t
        where
            LaneCount<N>: SupportedLaneCount,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn div(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.rcp_scalar(self)
            }
        }
    )*};
}

scalar_left_arithmetic!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

macro_rules! scalar_left_bitwise {
    ($($t:ty => $unsigned:ty),* $(,)?) => {$(
        impl<const N: usize> BitAnd<Vector<$t, N>> for $t
        where
            LaneCount<N>: SupportedLaneCount,
            Backing<$t, N>: IntPrimitive,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn bitand(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.band_scalar(self)
            }
        }

        impl<const N: usize> BitOr<Vector<$t, N>> for $t
        where
            LaneCount<N>: SupportedLaneCount,
            Backing<$t, N>: IntPrimitive,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn bitor(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.bor_scalar(self)
            }
        }

        impl<const N: usize> BitXor<Vector<$t, N>> for $t
        where
            LaneCount<N>: SupportedLaneCount,
            Backing<$t, N>: IntPrimitive,
        {
            type Output = Vector<$t, N>;

            #[inline(always)]
            fn bitxor(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.bxor_scalar(self)
            }
        }

        impl<const N: usize> Shl<Vector<$t, N>> for $t
        where
            LaneCount<N>: SupportedLaneCount,
            Backing<$unsigned, N>: IntPrimitive,
        {
            type Output = Vector<$unsigned, N>;

            #[inline(always)]
            fn shl(self, rhs: Vector<$t, N>) -> Vector<$unsigned, N> {
                Vector::<$unsigned, N>::splat(self.to_unsigned_bits()).shl(unsigned_lanes(rhs))
            }
        }

        impl<const N: usize> Shr<Vector<$t, N>> for $t
        where
            LaneCount<N>: SupportedLaneCount,
            Backing<$unsigned, N>: IntPrimitive,
        {
            type Output = Vector<$unsigned, N>;

            #[inline(always)]
            fn shr(self, rhs: Vector<$t, N>) -> Vector<$unsigned, N> {
                Vector::<$unsigned, N>::splat(self.to_unsigned_bits()).shr(unsigned_lanes(rhs))
            }
        }
    )*};
}

scalar_left_bitwise! {
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
}

/// Bit patterns of `v` as unsigned lanes.
#[inline(always)]
fn unsigned_lanes<T, const N: usize>(v: Vector<T, N>) -> Vector<T::Unsigned, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    Vector::from_array(v.to_array().map(T::to_unsigned_bits))
}

/// `s == v`, lane-wise.
#[inline(always)]
pub fn scalar_eq<T, const N: usize>(s: T, v: Vector<T, N>) -> Mask<N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    v.cmpeq_scalar(s)
}

/// `s != v`, lane-wise.
#[inline(always)]
pub fn scalar_ne<T, const N: usize>(s: T, v: Vector<T, N>) -> Mask<N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    v.cmpne_scalar(s)
}

/// `s > v`, computed as `v < s`.
#[inline(always)]
pub fn scalar_gt<T, const N: usize>(s: T, v: Vector<T, N>) -> Mask<N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    v.cmplt_scalar(s)
}

/// `s >= v`, computed as `v <= s`.
#[inline(always)]
pub fn scalar_ge<T, const N: usize>(s: T, v: Vector<T, N>) -> Mask<N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    v.cmple_scalar(s)
}

/// `s < v`, computed as `v > s`.
#[inline(always)]
pub fn scalar_lt<T, const N: usize>(s: T, v: Vector<T, N>) -> Mask<N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    v.cmpgt_scalar(s)
}

/// `s <= v`, computed as `v >= s`.
#[inline(always)]
pub fn scalar_le<T, const N: usize>(s: T, v: Vector<T, N>) -> Mask<N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    v.cmpge_scalar(s)
}
