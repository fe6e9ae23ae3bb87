//! Scalar element types that can populate a vector lane.
//!
//! The set is closed: `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`,
//! `f32` and `f64`. Each element carries the per-lane reference semantics of
//! every operation in the vector taxonomy (`scalar_add`, `scalar_div`, ...).
//! The scalar-emulation backend evaluates exactly these functions, and native
//! backends are required to agree with them.
//!
//! # Edge-case policy
//!
//! - Integer `+`, `-`, `*` and negation wrap on overflow (two's complement).
//! - Integer division by zero panics. It is never turned into a sentinel.
//! - `scalar_sadd`/`scalar_ssub` clamp integers to the representable range.
//!   For floats they are plain IEEE 754 addition/subtraction.
//! - `scalar_min`/`scalar_max` return the second operand when the comparison
//!   is false, which is also what x86 `minps`/`maxps` do with NaN inputs.
//! - Shift amounts are taken modulo the bit width (`wrapping_shl`).

use std::fmt::Debug;
use std::num::FpCategory;

use num::traits::{
    Bounded, Float, NumCast, One, PrimInt, SaturatingAdd, SaturatingSub, WrappingAdd,
    WrappingMul, WrappingNeg, WrappingShl, WrappingShr, WrappingSub, Zero,
};

use crate::simd::lanes::LaneBacking;

/// Compile-time category of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Unsigned,
    Signed,
    Float,
}

mod sealed {
    pub trait Sealed {}
}

/// A scalar type that can occupy one vector lane.
pub trait Element:
    sealed::Sealed
    + Copy
    + Debug
    + Default
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Bounded
    + NumCast
    + LaneBacking
{
    const KIND: ScalarKind;
    const BITS: u32;

    /// Unsigned integer of the same bit width, used for shift amounts and
    /// bit-pattern access.
    type Unsigned: IntElement;

    /// Bit pattern of `self` as its unsigned counterpart.
    fn to_unsigned_bits(self) -> Self::Unsigned;

    /// Inverse of [`Element::to_unsigned_bits`].
    fn from_unsigned_bits(bits: Self::Unsigned) -> Self;

    fn scalar_add(self, rhs: Self) -> Self;
    fn scalar_sub(self, rhs: Self) -> Self;
    fn scalar_mul(self, rhs: Self) -> Self;

    /// # Panics
    ///
    /// Panics on integer division by zero.
    fn scalar_div(self, rhs: Self) -> Self;

    fn scalar_sadd(self, rhs: Self) -> Self;
    fn scalar_ssub(self, rhs: Self) -> Self;
    fn scalar_neg(self) -> Self;
    fn scalar_abs(self) -> Self;

    /// `1 / self`.
    #[inline(always)]
    fn scalar_rcp(self) -> Self {
        Self::one().scalar_div(self)
    }

    #[inline(always)]
    fn scalar_min(self, rhs: Self) -> Self {
        if self < rhs {
            self
        } else {
            rhs
        }
    }

    #[inline(always)]
    fn scalar_max(self, rhs: Self) -> Self {
        if self > rhs {
            self
        } else {
            rhs
        }
    }

    /// `self * b + c`, fused for floats.
    #[inline(always)]
    fn scalar_mul_add(self, b: Self, c: Self) -> Self {
        self.scalar_mul(b).scalar_add(c)
    }

    /// `self * b - c`, fused for floats.
    #[inline(always)]
    fn scalar_mul_sub(self, b: Self, c: Self) -> Self {
        self.scalar_mul(b).scalar_sub(c)
    }

    /// Identity of max-reductions: the minimum value for integers, negative
    /// infinity for floats.
    #[inline(always)]
    fn lowest() -> Self {
        <Self as Bounded>::min_value()
    }

    /// Identity of min-reductions: the maximum value for integers, positive
    /// infinity for floats.
    #[inline(always)]
    fn highest() -> Self {
        <Self as Bounded>::max_value()
    }
}

/// Integer elements: bitwise and shift operations.
pub trait IntElement: Element + PrimInt + WrappingShl + WrappingShr {
    /// Interprets the lane as an unsigned shift amount.
    fn shift_amount(self) -> u32;

    fn from_shift_amount(amount: u32) -> Self;

    /// All bits set; identity of `and`-reductions.
    #[inline(always)]
    fn all_ones() -> Self {
        !Self::zero()
    }

    #[inline(always)]
    fn scalar_shl(self, amount: Self) -> Self {
        WrappingShl::wrapping_shl(&self, amount.shift_amount())
    }

    /// Arithmetic for signed elements, logical for unsigned ones.
    #[inline(always)]
    fn scalar_shr(self, amount: Self) -> Self {
        WrappingShr::wrapping_shr(&self, amount.shift_amount())
    }
}

/// Floating point elements: rounding, transcendental and IEEE 754
/// classification functions.
///
/// The transcendental functions are the platform `libm` routines exposed by
/// `std`. Every backend evaluates them per lane through these functions so
/// results are identical across backends.
pub trait FloatElement: Element + Float {
    /// Round to nearest, ties to even (the default x86/ARM rounding mode).
    fn scalar_round(self) -> Self;

    #[inline(always)]
    fn scalar_sqrt(self) -> Self {
        Float::sqrt(self)
    }

    #[inline(always)]
    fn scalar_floor(self) -> Self {
        Float::floor(self)
    }

    #[inline(always)]
    fn scalar_ceil(self) -> Self {
        Float::ceil(self)
    }

    #[inline(always)]
    fn scalar_trunc(self) -> Self {
        Float::trunc(self)
    }

    #[inline(always)]
    fn scalar_exp(self) -> Self {
        Float::exp(self)
    }

    #[inline(always)]
    fn scalar_log(self) -> Self {
        Float::ln(self)
    }

    #[inline(always)]
    fn scalar_sin(self) -> Self {
        Float::sin(self)
    }

    #[inline(always)]
    fn scalar_cos(self) -> Self {
        Float::cos(self)
    }

    #[inline(always)]
    fn scalar_is_finite(self) -> bool {
        Float::is_finite(self)
    }

    #[inline(always)]
    fn scalar_is_infinite(self) -> bool {
        Float::is_infinite(self)
    }

    #[inline(always)]
    fn scalar_is_nan(self) -> bool {
        Float::is_nan(self)
    }

    #[inline(always)]
    fn scalar_is_normal(self) -> bool {
        Float::is_normal(self)
    }

    #[inline(always)]
    fn scalar_is_subnormal(self) -> bool {
        Float::classify(self) == FpCategory::Subnormal
    }

    /// True for both `+0.0` and `-0.0`.
    #[inline(always)]
    fn scalar_is_zero(self) -> bool {
        self == Self::zero()
    }
}

macro_rules! int_element {
    ($($t:ty => $kind:ident, $unsigned:ty, $abs:path);* $(;)?) => {$(
        impl sealed::Sealed for $t {}

        impl Element for $t {
            const KIND: ScalarKind = ScalarKind::$kind;
            const BITS: u32 = <$t>::BITS;

            type Unsigned = $unsigned;

            #[inline(always)]
            fn to_unsigned_bits(self) -> $unsigned {
                self as $unsigned
            }

            #[inline(always)]
            fn from_unsigned_bits(bits: $unsigned) -> Self {
                bits as $t
            }

            #[inline(always)]
            fn scalar_add(self, rhs: Self) -> Self {
                WrappingAdd::wrapping_add(&self, &rhs)
            }

            #[inline(always)]
            fn scalar_sub(self, rhs: Self) -> Self {
                WrappingSub::wrapping_sub(&self, &rhs)
            }

            #[inline(always)]
            fn scalar_mul(self, rhs: Self) -> Self {
                WrappingMul::wrapping_mul(&self, &rhs)
            }

            #[inline(always)]
            fn scalar_div(self, rhs: Self) -> Self {
                if rhs == 0 {
                    panic!("integer division by zero in vector lane");
                }
                self.wrapping_div(rhs)
            }

            #[inline(always)]
            fn scalar_sadd(self, rhs: Self) -> Self {
                SaturatingAdd::saturating_add(&self, &rhs)
            }

            #[inline(always)]
            fn scalar_ssub(self, rhs: Self) -> Self {
                SaturatingSub::saturating_sub(&self, &rhs)
            }

            #[inline(always)]
            fn scalar_neg(self) -> Self {
                WrappingNeg::wrapping_neg(&self)
            }

            #[inline(always)]
            fn scalar_abs(self) -> Self {
                $abs(self)
            }
        }

        impl IntElement for $t {
            #[inline(always)]
            fn shift_amount(self) -> u32 {
                self as u32
            }

            #[inline(always)]
            fn from_shift_amount(amount: u32) -> Self {
                amount as $t
            }
        }
    )*};
}

int_element! {
    u8 => Unsigned, u8, core::convert::identity;
    u16 => Unsigned, u16, core::convert::identity;
    u32 => Unsigned, u32, core::convert::identity;
    u64 => Unsigned, u64, core::convert::identity;
    i8 => Signed, u8, i8::wrapping_abs;
    i16 => Signed, u16, i16::wrapping_abs;
    i32 => Signed, u32, i32::wrapping_abs;
    i64 => Signed, u64, i64::wrapping_abs;
}

macro_rules! float_element {
    ($($t:ty => $unsigned:ty, $bits:expr);* $(;)?) => {$(
        impl sealed::Sealed for $t {}

        impl Element for $t {
            const KIND: ScalarKind = ScalarKind::Float;
            const BITS: u32 = $bits;

            type Unsigned = $unsigned;

            #[inline(always)]
            fn to_unsigned_bits(self) -> $unsigned {
                self.to_bits()
            }

            #[inline(always)]
            fn from_unsigned_bits(bits: $unsigned) -> Self {
                <$t>::from_bits(bits)
            }

            #[inline(always)]
            fn scalar_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn scalar_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline(always)]
            fn scalar_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline(always)]
            fn scalar_div(self, rhs: Self) -> Self {
                self / rhs
            }

            #[inline(always)]
            fn scalar_sadd(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn scalar_ssub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline(always)]
            fn scalar_neg(self) -> Self {
                -self
            }

            #[inline(always)]
            fn scalar_abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline(always)]
            fn scalar_mul_add(self, b: Self, c: Self) -> Self {
                <$t>::mul_add(self, b, c)
            }

            #[inline(always)]
            fn scalar_mul_sub(self, b: Self, c: Self) -> Self {
                <$t>::mul_add(self, b, -c)
            }

            #[inline(always)]
            fn lowest() -> Self {
                <$t>::NEG_INFINITY
            }

            #[inline(always)]
            fn highest() -> Self {
                <$t>::INFINITY
            }
        }

        impl FloatElement for $t {
            #[inline(always)]
            fn scalar_round(self) -> Self {
                <$t>::round_ties_even(self)
            }
        }
    )*};
}

float_element! {
    f32 => u32, 32;
    f64 => u64, 64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_arithmetic_wraps() {
        assert_eq!(i8::MAX.scalar_add(1), i8::MIN);
        assert_eq!(0u16.scalar_sub(1), u16::MAX);
        assert_eq!(i32::MIN.scalar_neg(), i32::MIN);
        assert_eq!(i32::MIN.scalar_div(-1), i32::MIN);
    }

    #[test]
    fn test_saturating_arithmetic_clamps() {
        assert_eq!(i8::MAX.scalar_sadd(1), i8::MAX);
        assert_eq!(i8::MIN.scalar_ssub(1), i8::MIN);
        assert_eq!(250u8.scalar_sadd(10), u8::MAX);
        assert_eq!(3u8.scalar_ssub(10), 0);
    }

    #[test]
    #[should_panic(expected = "integer division by zero")]
    fn test_integer_division_by_zero_is_fatal() {
        let _ = 5i32.scalar_div(0);
    }

    #[test]
    fn test_float_division_by_zero_follows_ieee() {
        assert_eq!(1.0f32.scalar_div(0.0), f32::INFINITY);
        assert_eq!((-1.0f64).scalar_div(0.0), f64::NEG_INFINITY);
        assert!(0.0f32.scalar_div(0.0).is_nan());
        assert_eq!(0.0f32.scalar_rcp(), f32::INFINITY);
    }

    #[test]
    fn test_reduction_identities() {
        assert_eq!(u8::all_ones(), 0xFF);
        assert_eq!(i16::all_ones(), -1);
        assert_eq!(i32::lowest(), i32::MIN);
        assert_eq!(u64::highest(), u64::MAX);
        assert_eq!(f32::lowest(), f32::NEG_INFINITY);
        assert_eq!(f64::highest(), f64::INFINITY);
    }

    #[test]
    fn test_shift_amount_wraps_modulo_bit_width() {
        assert_eq!(1u8.scalar_shl(9), 2);
        assert_eq!((-16i32).scalar_shr(2), -4);
        assert_eq!(0x80u8.scalar_shr(7), 1);
    }

    #[test]
    fn test_min_max_return_second_operand_on_nan() {
        assert!(1.0f32.scalar_max(f32::NAN).is_nan());
        assert_eq!(f32::NAN.scalar_max(1.0), 1.0);
        assert_eq!(f32::NAN.scalar_min(2.0), 2.0);
    }

    #[test]
    fn test_round_is_ties_to_even() {
        assert_eq!(2.5f32.scalar_round(), 2.0);
        assert_eq!(3.5f32.scalar_round(), 4.0);
        assert_eq!((-2.5f64).scalar_round(), -2.0);
        assert_eq!(7.0f64.scalar_round(), 7.0);
    }

    #[test]
    fn test_classification() {
        assert!(f32::MIN_POSITIVE.scalar_is_normal());
        assert!((f32::MIN_POSITIVE / 2.0).scalar_is_subnormal());
        assert!((-0.0f64).scalar_is_zero());
        assert!(f64::INFINITY.scalar_is_infinite());
        assert!(!f64::NAN.scalar_is_finite());
    }

    #[test]
    fn test_unsigned_bits_round_trip() {
        assert_eq!((-1i16).to_unsigned_bits(), u16::MAX);
        assert_eq!(i16::from_unsigned_bits(u16::MAX), -1);
        assert_eq!(1.0f32.to_unsigned_bits(), 0x3F80_0000);
        assert_eq!(f64::from_unsigned_bits(0), 0.0);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(u32::KIND, ScalarKind::Unsigned);
        assert_eq!(i64::KIND, ScalarKind::Signed);
        assert_eq!(f32::KIND, ScalarKind::Float);
        assert_eq!(i8::BITS, 8);
        assert_eq!(f64::BITS, 64);
    }
}
