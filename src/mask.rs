//! Per-lane predicates.
//!
//! Two layers:
//!
//! - [`LaneBits`] is the packed representation that crosses the backend seam:
//!   lane `i` is bit `i` of a `u128`, which covers the widest supported vector
//!   (128 lanes). It mirrors the packed predicate registers of mask-capable
//!   hardware and the `movemask` result of compare instructions.
//! - [`Mask<N>`] is the typed predicate handed to callers. The lane count is
//!   part of the type, so a `Mask<8>` can only gate `Vector<T, 8>` operations.
//!
//! Invariant: bits at positions `>= N` are always zero.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::simd::lanes::{LaneCount, SupportedLaneCount};

/// Packed per-lane booleans, lane `i` at bit `i`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LaneBits(u128);

impl LaneBits {
    pub const NONE: LaneBits = LaneBits(0);

    /// Every lane of a `lanes`-wide vector selected.
    #[inline(always)]
    pub const fn all(lanes: usize) -> Self {
        if lanes >= 128 {
            LaneBits(u128::MAX)
        } else {
            LaneBits((1u128 << lanes) - 1)
        }
    }

    /// The first `count` lanes selected.
    #[inline(always)]
    pub const fn first(count: usize) -> Self {
        Self::all(count)
    }

    #[inline(always)]
    pub const fn from_raw(bits: u128) -> Self {
        LaneBits(bits)
    }

    #[inline(always)]
    pub const fn raw(self) -> u128 {
        self.0
    }

    #[inline(always)]
    pub fn from_fn(lanes: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut bits = 0u128;
        for lane in 0..lanes {
            if f(lane) {
                bits |= 1 << lane;
            }
        }
        LaneBits(bits)
    }

    #[inline(always)]
    pub const fn test(self, lane: usize) -> bool {
        (self.0 >> lane) & 1 == 1
    }

    #[inline(always)]
    pub fn set(&mut self, lane: usize, value: bool) {
        if value {
            self.0 |= 1 << lane;
        } else {
            self.0 &= !(1 << lane);
        }
    }

    /// Lanes `[0, lanes)`, i.e. the low half when `lanes` is half the width.
    #[inline(always)]
    pub const fn low(self, lanes: usize) -> Self {
        LaneBits(self.0 & Self::all(lanes).0)
    }

    /// Lanes `[lanes, 2 * lanes)` moved down to start at lane 0.
    #[inline(always)]
    pub const fn high(self, lanes: usize) -> Self {
        LaneBits((self.0 >> lanes) & Self::all(lanes).0)
    }

    /// Inverse of [`LaneBits::low`]/[`LaneBits::high`] for halves of `lanes` lanes.
    #[inline(always)]
    pub const fn join(lo: LaneBits, hi: LaneBits, lanes: usize) -> Self {
        LaneBits(lo.0 | (hi.0 << lanes))
    }

    #[inline(always)]
    pub const fn and(self, other: LaneBits) -> Self {
        LaneBits(self.0 & other.0)
    }

    #[inline(always)]
    pub const fn or(self, other: LaneBits) -> Self {
        LaneBits(self.0 | other.0)
    }

    #[inline(always)]
    pub const fn xor(self, other: LaneBits) -> Self {
        LaneBits(self.0 ^ other.0)
    }

    /// Complement within a `lanes`-wide vector.
    #[inline(always)]
    pub const fn not(self, lanes: usize) -> Self {
        LaneBits(!self.0 & Self::all(lanes).0)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl fmt::Debug for LaneBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LaneBits({:#b})", self.0)
    }
}

/// A boolean predicate for each of `N` lanes.
///
/// Produced by vector comparisons or built explicitly, and consumed by every
/// masked operation of a `Vector<T, N>` with the same `N`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask<const N: usize>
where
    LaneCount<N>: SupportedLaneCount,
{
    bits: LaneBits,
}

impl<const N: usize> Mask<N>
where
    LaneCount<N>: SupportedLaneCount,
{
    /// Broadcasts one boolean to every lane.
    #[inline(always)]
    pub fn splat(value: bool) -> Self {
        if value {
            Self::all_true()
        } else {
            Self::all_false()
        }
    }

    #[inline(always)]
    pub fn all_true() -> Self {
        Self {
            bits: LaneBits::all(N),
        }
    }

    #[inline(always)]
    pub fn all_false() -> Self {
        Self {
            bits: LaneBits::NONE,
        }
    }

    /// The first `count` lanes set, the rest clear. `count` is clamped to `N`.
    #[inline(always)]
    pub fn first(count: usize) -> Self {
        Self {
            bits: LaneBits::first(count.min(N)),
        }
    }

    #[inline(always)]
    pub fn from_array(values: [bool; N]) -> Self {
        Self {
            bits: LaneBits::from_fn(N, |lane| values[lane]),
        }
    }

    /// Builds a mask from a packed pattern, lane `i` at bit `i`. Bits above
    /// lane `N - 1` are ignored.
    #[inline(always)]
    pub fn from_bitmask(bits: u128) -> Self {
        Self {
            bits: LaneBits::from_raw(bits).low(N),
        }
    }

    #[inline(always)]
    pub fn to_bitmask(self) -> u128 {
        self.bits.raw()
    }

    #[inline(always)]
    pub fn to_array(self) -> [bool; N] {
        std::array::from_fn(|lane| self.bits.test(lane))
    }

    #[inline(always)]
    pub(crate) fn from_lane_bits(bits: LaneBits) -> Self {
        Self { bits: bits.low(N) }
    }

    #[inline(always)]
    pub(crate) fn lane_bits(self) -> LaneBits {
        self.bits
    }

    /// # Panics
    ///
    /// Panics if `lane >= N`.
    #[inline(always)]
    pub fn extract(self, lane: usize) -> bool {
        assert!(lane < N, "lane {lane} out of range for {N} lanes");
        self.bits.test(lane)
    }

    /// # Panics
    ///
    /// Panics if `lane >= N`.
    #[inline(always)]
    pub fn insert(&mut self, lane: usize, value: bool) {
        assert!(lane < N, "lane {lane} out of range for {N} lanes");
        self.bits.set(lane, value);
    }

    #[inline(always)]
    pub fn land(self, other: Self) -> Self {
        Self {
            bits: self.bits.and(other.bits),
        }
    }

    #[inline(always)]
    pub fn lor(self, other: Self) -> Self {
        Self {
            bits: self.bits.or(other.bits),
        }
    }

    #[inline(always)]
    pub fn lxor(self, other: Self) -> Self {
        Self {
            bits: self.bits.xor(other.bits),
        }
    }

    #[inline(always)]
    pub fn lnot(self) -> Self {
        Self {
            bits: self.bits.not(N),
        }
    }

    /// Lane-wise `==` of two masks.
    #[inline(always)]
    pub fn cmpeq(self, other: Self) -> Self {
        self.lxor(other).lnot()
    }

    /// Lane-wise `!=` of two masks.
    #[inline(always)]
    pub fn cmpne(self, other: Self) -> Self {
        self.lxor(other)
    }

    #[inline(always)]
    pub fn all(self) -> bool {
        self.bits == LaneBits::all(N)
    }

    #[inline(always)]
    pub fn any(self) -> bool {
        !self.bits.is_empty()
    }

    #[inline(always)]
    pub fn none(self) -> bool {
        self.bits.is_empty()
    }

    /// Number of selected lanes.
    #[inline(always)]
    pub fn count(self) -> u32 {
        self.bits.count()
    }
}

impl<const N: usize> Default for Mask<N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn default() -> Self {
        Self::all_false()
    }
}

impl<const N: usize> fmt::Debug for Mask<N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_array()).finish()
    }
}

impl<const N: usize> From<[bool; N]> for Mask<N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn from(values: [bool; N]) -> Self {
        Self::from_array(values)
    }
}

impl<const N: usize> From<bool> for Mask<N>
where
    LaneCount<N>: SupportedLaneCount,
{
    fn from(value: bool) -> Self {
        Self::splat(value)
    }
}

macro_rules! mask_operator {
    ($($trait:ident::$method:ident, $assign:ident::$assign_method:ident => $combinator:ident;)*) => {$(
        impl<const N: usize> $trait for Mask<N>
        where
            LaneCount<N>: SupportedLaneCount,
        {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                self.$combinator(rhs)
            }
        }

        impl<const N: usize> $assign for Mask<N>
        where
            LaneCount<N>: SupportedLaneCount,
        {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = self.$combinator(rhs);
            }
        }
    )*};
}

mask_operator! {
    BitAnd::bitand, BitAndAssign::bitand_assign => land;
    BitOr::bitor, BitOrAssign::bitor_assign => lor;
    BitXor::bitxor, BitXorAssign::bitxor_assign => lxor;
}

impl<const N: usize> Not for Mask<N>
where
    LaneCount<N>: SupportedLaneCount,
{
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        self.lnot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_bits_split_and_join() {
        let bits = LaneBits::from_raw(0b1011_0110);
        let lo = bits.low(4);
        let hi = bits.high(4);
        assert_eq!(lo.raw(), 0b0110);
        assert_eq!(hi.raw(), 0b1011);
        assert_eq!(LaneBits::join(lo, hi, 4), bits);
    }

    #[test]
    fn test_lane_bits_full_width() {
        let all = LaneBits::all(128);
        assert_eq!(all.raw(), u128::MAX);
        assert_eq!(all.high(64), LaneBits::all(64));
        assert_eq!(all.low(64), LaneBits::all(64));
        assert!(all.not(128).is_empty());
        assert_eq!(all.count(), 128);
    }

    #[test]
    fn test_mask_combinators() {
        let a = Mask::<4>::from_array([true, true, false, false]);
        let b = Mask::<4>::from_array([true, false, true, false]);
        assert_eq!(a.land(b).to_array(), [true, false, false, false]);
        assert_eq!(a.lor(b).to_array(), [true, true, true, false]);
        assert_eq!(a.lxor(b).to_array(), [false, true, true, false]);
        assert_eq!(a.lnot().to_array(), [false, false, true, true]);
        assert_eq!((a & b), a.land(b));
        assert_eq!(!a, a.lnot());
    }

    #[test]
    fn test_mask_equality_compares_all_lanes() {
        let a = Mask::<8>::from_bitmask(0b1010_1010);
        let b = Mask::<8>::from_bitmask(0b1010_1010);
        let c = Mask::<8>::from_bitmask(0b1010_1011);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.cmpeq(c).to_bitmask(), 0b1111_1110);
        assert_eq!(a.cmpne(c).to_bitmask(), 0b0000_0001);
    }

    #[test]
    fn test_from_bitmask_drops_bits_above_lane_count() {
        let mask = Mask::<2>::from_bitmask(0b1111);
        assert_eq!(mask.to_bitmask(), 0b11);
        assert!(mask.all());
        assert_eq!(mask.lnot().to_bitmask(), 0);
    }

    #[test]
    fn test_extract_and_insert() {
        let mut mask = Mask::<16>::all_false();
        mask.insert(9, true);
        assert!(mask.extract(9));
        assert!(!mask.extract(8));
        assert_eq!(mask.count(), 1);
        mask.insert(9, false);
        assert!(mask.none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_extract_out_of_range_panics() {
        let _ = Mask::<4>::all_true().extract(4);
    }

    #[test]
    fn test_first() {
        assert_eq!(Mask::<8>::first(3).to_bitmask(), 0b111);
        assert!(Mask::<8>::first(20).all());
        assert!(Mask::<1>::first(0).none());
    }
}
