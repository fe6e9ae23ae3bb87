//! The vector facade.
//!
//! `Vector<T, N>` holds `N` lanes of `T` in whichever primitive the binding
//! table selects for `(T, N)` (see [`crate::simd::lanes`]) and exposes the
//! same methods and operators whatever that primitive is.
//!
//! Every arithmetic and logic category comes in four forms:
//!
//! | form                        | right operand      | lanes written          |
//! |-----------------------------|--------------------|------------------------|
//! | `op(v)`                     | vector             | all                    |
//! | `op_scalar(s)`              | broadcast scalar   | all                    |
//! | `op_masked(m, v)`           | vector             | where `m` is set       |
//! | `op_scalar_masked(m, s)`    | broadcast scalar   | where `m` is set       |
//!
//! Masked forms return `self` unchanged in every lane where the mask is clear.
//!
//! # Integer division by zero
//!
//! Integer `div` and `rcp` panic when a lane divides by zero. In the masked
//! forms, a masked-off lane is never evaluated by the scalar and composite
//! backends (the only integer backends in this crate), so it does not panic.
//! A native integer backend is allowed to evaluate masked-off lanes; callers
//! that rely on masking to guard against zero divisors should not assume
//! otherwise.

use std::fmt;
use std::mem::size_of;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use crate::element::{Element, FloatElement, IntElement};
use crate::error::{lane_count_error, misaligned_error, LanewiseError, Result};
use crate::mask::Mask;
use crate::simd::lanes::{Backing, LaneCount, SupportedLaneCount};
use crate::simd::traits::{FloatPrimitive, IntPrimitive, Primitive};

/// `N` lanes of `T`.
#[repr(transparent)]
pub struct Vector<T, const N: usize>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    inner: Backing<T, N>,
}

macro_rules! binary_ops {
    ($($(#[$doc:meta])* $op:ident, $scalar:ident, $masked:ident, $scalar_masked:ident;)*) => {$(
        $(#[$doc])*
        #[inline(always)]
        pub fn $op(self, rhs: Self) -> Self {
            Self::from_inner(self.inner.$op(rhs.inner))
        }

        #[inline(always)]
        pub fn $scalar(self, rhs: T) -> Self {
            self.$op(Self::splat(rhs))
        }

        #[inline(always)]
        pub fn $masked(self, mask: Mask<N>, rhs: Self) -> Self {
            Self::from_inner(self.inner.$masked(mask.lane_bits(), rhs.inner))
        }

        #[inline(always)]
        pub fn $scalar_masked(self, mask: Mask<N>, rhs: T) -> Self {
            self.$masked(mask, Self::splat(rhs))
        }
    )*};
}

macro_rules! unary_ops {
    ($($(#[$doc:meta])* $op:ident, $masked:ident;)*) => {$(
        $(#[$doc])*
        #[inline(always)]
        pub fn $op(self) -> Self {
            Self::from_inner(self.inner.$op())
        }

        #[inline(always)]
        pub fn $masked(self, mask: Mask<N>) -> Self {
            Self::from_inner(self.inner.$masked(mask.lane_bits()))
        }
    )*};
}

macro_rules! fused_ops {
    ($($(#[$doc:meta])* $op:ident, $scalar:ident, $masked:ident, $scalar_masked:ident;)*) => {$(
        $(#[$doc])*
        #[inline(always)]
        pub fn $op(self, b: Self, c: Self) -> Self {
            Self::from_inner(self.inner.$op(b.inner, c.inner))
        }

        #[inline(always)]
        pub fn $scalar(self, b: T, c: T) -> Self {
            self.$op(Self::splat(b), Self::splat(c))
        }

        /// Lanes where the mask is clear keep `self`.
        #[inline(always)]
        pub fn $masked(self, mask: Mask<N>, b: Self, c: Self) -> Self {
            Self::from_inner(self.inner.$masked(mask.lane_bits(), b.inner, c.inner))
        }

        #[inline(always)]
        pub fn $scalar_masked(self, mask: Mask<N>, b: T, c: T) -> Self {
            self.$masked(mask, Self::splat(b), Self::splat(c))
        }
    )*};
}

macro_rules! compare_ops {
    ($($op:ident, $scalar:ident, $masked:ident, $scalar_masked:ident;)*) => {$(
        #[inline(always)]
        pub fn $op(self, rhs: Self) -> Mask<N> {
            Mask::from_lane_bits(self.inner.$op(rhs.inner))
        }

        #[inline(always)]
        pub fn $scalar(self, rhs: T) -> Mask<N> {
            self.$op(Self::splat(rhs))
        }

        /// Lanes where `mask` is clear compare false.
        #[inline(always)]
        pub fn $masked(self, mask: Mask<N>, rhs: Self) -> Mask<N> {
            self.$op(rhs).land(mask)
        }

        #[inline(always)]
        pub fn $scalar_masked(self, mask: Mask<N>, rhs: T) -> Mask<N> {
            self.$masked(mask, Self::splat(rhs))
        }
    )*};
}

macro_rules! reductions {
    ($($(#[$doc:meta])* $op:ident, $masked:ident, $seeded:ident, $masked_seeded:ident => $combine:expr;)*) => {$(
        $(#[$doc])*
        #[inline(always)]
        pub fn $op(self) -> T {
            self.inner.$op()
        }

        /// Lanes where `mask` is clear count as the identity element.
        #[inline(always)]
        pub fn $masked(self, mask: Mask<N>) -> T {
            self.inner.$masked(mask.lane_bits())
        }

        /// Folds `seed` into the reduction.
        #[inline(always)]
        pub fn $seeded(self, seed: T) -> T {
            ($combine)(seed, self.$op())
        }

        /// Folds `seed` into the masked reduction. The seed is used whatever
        /// the mask.
        #[inline(always)]
        pub fn $masked_seeded(self, mask: Mask<N>, seed: T) -> T {
            ($combine)(seed, self.$masked(mask))
        }
    )*};
}

macro_rules! classify_ops {
    ($($(#[$doc:meta])* $op:ident;)*) => {$(
        $(#[$doc])*
        #[inline(always)]
        pub fn $op(self) -> Mask<N> {
            Mask::from_lane_bits(self.inner.$op())
        }
    )*};
}

impl<T, const N: usize> Vector<T, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    /// Number of lanes.
    pub const LANES: usize = N;

    /// Alignment required by [`Vector::load_aligned`] and
    /// [`Vector::store_aligned`]: `N * size_of::<T>()` bytes.
    pub const ALIGNMENT: usize = N * size_of::<T>();

    #[inline(always)]
    pub(crate) fn from_inner(inner: Backing<T, N>) -> Self {
        Self { inner }
    }

    /// The backing primitive.
    #[inline(always)]
    pub fn into_inner(self) -> Backing<T, N> {
        self.inner
    }

    // ============================================================================================
    // CONSTRUCTION
    // ============================================================================================

    #[inline(always)]
    pub fn zero() -> Self {
        Self::from_inner(<Backing<T, N> as Primitive>::zero())
    }

    /// Broadcasts `value` to every lane.
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self::from_inner(<Backing<T, N> as Primitive>::splat(value))
    }

    #[inline(always)]
    pub fn from_array(values: [T; N]) -> Self {
        unsafe { Self::load(values.as_ptr()) }
    }

    #[inline(always)]
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self::from_array(std::array::from_fn(f))
    }

    /// Copies exactly `N` elements out of `slice`.
    pub fn try_from_slice(slice: &[T]) -> Result<Self> {
        if slice.len() != N {
            return Err(lane_count_error(N, slice.len()));
        }
        Ok(unsafe { Self::load(slice.as_ptr()) })
    }

    /// Like [`Vector::try_from_slice`] through the aligned load path; the
    /// slice must start on an [`Vector::ALIGNMENT`] boundary.
    pub fn try_load_aligned(slice: &[T]) -> Result<Self> {
        if slice.len() != N {
            return Err(lane_count_error(N, slice.len()));
        }
        if (slice.as_ptr() as usize) % Self::ALIGNMENT != 0 {
            return Err(misaligned_error(slice.as_ptr(), Self::ALIGNMENT));
        }
        Ok(unsafe { Self::load_aligned(slice.as_ptr()) })
    }

    /// Loads the first `min(slice.len(), N)` lanes; the rest are zero.
    #[inline(always)]
    pub fn load_prefix(slice: &[T]) -> Self {
        let mask = Mask::first(slice.len());
        unsafe { Self::zero().load_masked(mask, slice.as_ptr()) }
    }

    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        let mut values = [T::zero(); N];
        unsafe { self.store(values.as_mut_ptr()) };
        values
    }

    /// Writes all `N` lanes into `out`, which must hold exactly `N` elements.
    pub fn try_copy_to_slice(self, out: &mut [T]) -> Result<()> {
        if out.len() != N {
            return Err(lane_count_error(N, out.len()));
        }
        unsafe { self.store(out.as_mut_ptr()) };
        Ok(())
    }

    /// Aligned counterpart of [`Vector::try_copy_to_slice`].
    pub fn try_store_aligned(self, out: &mut [T]) -> Result<()> {
        if out.len() != N {
            return Err(lane_count_error(N, out.len()));
        }
        if (out.as_ptr() as usize) % Self::ALIGNMENT != 0 {
            return Err(misaligned_error(out.as_ptr(), Self::ALIGNMENT));
        }
        unsafe { self.store_aligned(out.as_mut_ptr()) };
        Ok(())
    }

    /// Writes the first `min(out.len(), N)` lanes and returns how many were
    /// written. The rest of `out` is untouched.
    #[inline(always)]
    pub fn store_prefix(self, out: &mut [T]) -> usize {
        let count = out.len().min(N);
        unsafe { self.store_masked(Mask::first(count), out.as_mut_ptr()) };
        count
    }

    /// # Panics
    ///
    /// Panics if `lane >= N`.
    #[inline(always)]
    pub fn extract(self, lane: usize) -> T {
        assert!(lane < N, "lane {lane} out of range for {N} lanes");
        self.inner.extract(lane)
    }

    /// Overwrites one lane in place.
    ///
    /// # Panics
    ///
    /// Panics if `lane >= N`.
    #[inline(always)]
    pub fn insert(&mut self, lane: usize, value: T) {
        assert!(lane < N, "lane {lane} out of range for {N} lanes");
        self.inner.insert(lane, value)
    }

    // ============================================================================================
    // MEMORY
    // ============================================================================================

    /// # Safety
    ///
    /// `ptr` must be valid for reads of `N` elements.
    #[inline(always)]
    pub unsafe fn load(ptr: *const T) -> Self {
        Self::from_inner(<Backing<T, N> as Primitive>::load(ptr))
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reads of `N` elements and aligned to
    /// [`Vector::ALIGNMENT`].
    #[inline(always)]
    pub unsafe fn load_aligned(ptr: *const T) -> Self {
        debug_assert_eq!(ptr as usize % Self::ALIGNMENT, 0, "unaligned load");
        Self::from_inner(<Backing<T, N> as Primitive>::load_aligned(ptr))
    }

    /// # Safety
    ///
    /// `ptr` must be valid for writes of `N` elements.
    #[inline(always)]
    pub unsafe fn store(self, ptr: *mut T) {
        self.inner.store(ptr)
    }

    /// # Safety
    ///
    /// `ptr` must be valid for writes of `N` elements and aligned to
    /// [`Vector::ALIGNMENT`].
    #[inline(always)]
    pub unsafe fn store_aligned(self, ptr: *mut T) {
        debug_assert_eq!(ptr as usize % Self::ALIGNMENT, 0, "unaligned store");
        self.inner.store_aligned(ptr)
    }

    /// Overwrites the selected lanes with `ptr[i]`. Memory behind clear lanes
    /// is not read.
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for reads for every selected lane `i`.
    #[inline(always)]
    pub unsafe fn load_masked(self, mask: Mask<N>, ptr: *const T) -> Self {
        Self::from_inner(self.inner.load_masked(mask.lane_bits(), ptr))
    }

    /// Writes the selected lanes to `ptr[i]`. Memory behind clear lanes is
    /// not written.
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for writes for every selected lane `i`.
    #[inline(always)]
    pub unsafe fn store_masked(self, mask: Mask<N>, ptr: *mut T) {
        self.inner.store_masked(mask.lane_bits(), ptr)
    }

    /// Lane `i` reads `base[i * stride]`.
    ///
    /// # Safety
    ///
    /// Every addressed element must be valid for reads.
    #[inline(always)]
    pub unsafe fn gather_stride(base: *const T, stride: usize) -> Self {
        Self::from_inner(<Backing<T, N> as Primitive>::gather_stride(base, stride))
    }

    /// # Safety
    ///
    /// Every element addressed by a selected lane must be valid for reads.
    #[inline(always)]
    pub unsafe fn gather_stride_masked(self, mask: Mask<N>, base: *const T, stride: usize) -> Self {
        Self::from_inner(self.inner.gather_stride_masked(mask.lane_bits(), base, stride))
    }

    /// Lane `i` reads `base[indices[i]]`.
    ///
    /// # Safety
    ///
    /// Every addressed element must be valid for reads.
    #[inline(always)]
    pub unsafe fn gather(base: *const T, indices: &[u32; N]) -> Self {
        Self::from_inner(<Backing<T, N> as Primitive>::gather_indices(base, indices))
    }

    /// # Safety
    ///
    /// Every element addressed by a selected lane must be valid for reads.
    #[inline(always)]
    pub unsafe fn gather_masked(self, mask: Mask<N>, base: *const T, indices: &[u32; N]) -> Self {
        Self::from_inner(self.inner.gather_indices_masked(mask.lane_bits(), base, indices))
    }

    /// Gather with the indices held in a vector.
    ///
    /// # Safety
    ///
    /// Every addressed element must be valid for reads.
    #[inline(always)]
    pub unsafe fn gather_vector(base: *const T, indices: Vector<u32, N>) -> Self {
        Self::gather(base, &indices.to_array())
    }

    /// # Safety
    ///
    /// Every element addressed by a selected lane must be valid for reads.
    #[inline(always)]
    pub unsafe fn gather_vector_masked(
        self,
        mask: Mask<N>,
        base: *const T,
        indices: Vector<u32, N>,
    ) -> Self {
        self.gather_masked(mask, base, &indices.to_array())
    }

    /// Lane `i` is written to `base[i * stride]`.
    ///
    /// # Safety
    ///
    /// Every addressed element must be valid for writes.
    #[inline(always)]
    pub unsafe fn scatter_stride(self, base: *mut T, stride: usize) {
        self.inner.scatter_stride(base, stride)
    }

    /// # Safety
    ///
    /// Every element addressed by a selected lane must be valid for writes.
    #[inline(always)]
    pub unsafe fn scatter_stride_masked(self, mask: Mask<N>, base: *mut T, stride: usize) {
        self.inner.scatter_stride_masked(mask.lane_bits(), base, stride)
    }

    /// Lane `i` is written to `base[indices[i]]`. With repeated indices the
    /// highest lane wins.
    ///
    /// # Safety
    ///
    /// Every addressed element must be valid for writes.
    #[inline(always)]
    pub unsafe fn scatter(self, base: *mut T, indices: &[u32; N]) {
        self.inner.scatter_indices(base, indices)
    }

    /// # Safety
    ///
    /// Every element addressed by a selected lane must be valid for writes.
    #[inline(always)]
    pub unsafe fn scatter_masked(self, mask: Mask<N>, base: *mut T, indices: &[u32; N]) {
        self.inner.scatter_indices_masked(mask.lane_bits(), base, indices)
    }

    /// # Safety
    ///
    /// Every addressed element must be valid for writes.
    #[inline(always)]
    pub unsafe fn scatter_vector(self, base: *mut T, indices: Vector<u32, N>) {
        self.scatter(base, &indices.to_array())
    }

    /// # Safety
    ///
    /// Every element addressed by a selected lane must be valid for writes.
    #[inline(always)]
    pub unsafe fn scatter_vector_masked(self, mask: Mask<N>, base: *mut T, indices: Vector<u32, N>) {
        self.scatter_masked(mask, base, &indices.to_array())
    }

    // ============================================================================================
    // ARITHMETIC
    // ============================================================================================

    binary_ops! {
        /// Lane-wise `self + rhs`, wrapping for integers.
        add, add_scalar, add_masked, add_scalar_masked;
        /// Lane-wise `self - rhs`, wrapping for integers.
        sub, sub_scalar, sub_masked, sub_scalar_masked;
        /// Lane-wise `rhs - self`.
        subfrom, subfrom_scalar, subfrom_masked, subfrom_scalar_masked;
        /// Lane-wise `self * rhs`, wrapping for integers.
        mul, mul_scalar, mul_masked, mul_scalar_masked;
        /// Lane-wise `self / rhs`.
        ///
        /// # Panics
        ///
        /// Integer lanes panic on division by zero.
        div, div_scalar, div_masked, div_scalar_masked;
        /// Saturating addition for integers, plain addition for floats.
        sadd, sadd_scalar, sadd_masked, sadd_scalar_masked;
        /// Saturating subtraction for integers, plain subtraction for floats.
        ssub, ssub_scalar, ssub_masked, ssub_scalar_masked;
        /// `rhs` unless `self < rhs`.
        min, min_scalar, min_masked, min_scalar_masked;
        /// `rhs` unless `self > rhs`.
        max, max_scalar, max_masked, max_scalar_masked;
    }

    unary_ops! {
        /// Wrapping negation for integers.
        neg, neg_masked;
        /// Wrapping absolute value for signed integers (`MIN` stays `MIN`).
        abs, abs_masked;
        /// `1 / self`.
        ///
        /// # Panics
        ///
        /// Integer lanes panic on a zero lane.
        rcp, rcp_masked;
    }

    /// `rhs / self`.
    #[inline(always)]
    pub fn rcp_scalar(self, rhs: T) -> Self {
        Self::from_inner(self.inner.rcpmul(<Backing<T, N> as Primitive>::splat(rhs)))
    }

    #[inline(always)]
    pub fn rcp_scalar_masked(self, mask: Mask<N>, rhs: T) -> Self {
        Self::from_inner(
            self.inner
                .rcpmul_masked(mask.lane_bits(), <Backing<T, N> as Primitive>::splat(rhs)),
        )
    }

    fused_ops! {
        /// `self * b + c`, a single rounding for floats.
        fmuladd, fmuladd_scalar, fmuladd_masked, fmuladd_scalar_masked;
        /// `self * b - c`, a single rounding for floats.
        fmulsub, fmulsub_scalar, fmulsub_masked, fmulsub_scalar_masked;
        /// `(self + b) * c`.
        faddmul, faddmul_scalar, faddmul_masked, faddmul_scalar_masked;
        /// `(self - b) * c`.
        fsubmul, fsubmul_scalar, fsubmul_masked, fsubmul_scalar_masked;
    }

    // ============================================================================================
    // COMPARE & BLEND
    // ============================================================================================

    compare_ops! {
        cmpeq, cmpeq_scalar, cmpeq_masked, cmpeq_scalar_masked;
        cmpne, cmpne_scalar, cmpne_masked, cmpne_scalar_masked;
        cmpgt, cmpgt_scalar, cmpgt_masked, cmpgt_scalar_masked;
        cmplt, cmplt_scalar, cmplt_masked, cmplt_scalar_masked;
        cmpge, cmpge_scalar, cmpge_masked, cmpge_scalar_masked;
        cmple, cmple_scalar, cmple_masked, cmple_scalar_masked;
    }

    /// Takes `rhs[i]` where `mask` is set and `self[i]` elsewhere.
    #[inline(always)]
    pub fn blend(self, mask: Mask<N>, rhs: Self) -> Self {
        Self::from_inner(self.inner.blend(mask.lane_bits(), rhs.inner))
    }

    #[inline(always)]
    pub fn blend_scalar(self, mask: Mask<N>, rhs: T) -> Self {
        self.blend(mask, Self::splat(rhs))
    }

    // ============================================================================================
    // REDUCTIONS
    // ============================================================================================

    reductions! {
        /// Sum of all lanes, folded pairwise.
        hadd, hadd_masked, hadd_seeded, hadd_masked_seeded => T::scalar_add;
        /// Product of all lanes, folded pairwise.
        hmul, hmul_masked, hmul_seeded, hmul_masked_seeded => T::scalar_mul;
        /// Largest lane.
        hmax, hmax_masked, hmax_seeded, hmax_masked_seeded => T::scalar_max;
        /// Smallest lane.
        hmin, hmin_masked, hmin_seeded, hmin_masked_seeded => T::scalar_min;
    }

    /// Index of the largest lane; the lowest such index on ties.
    #[inline(always)]
    pub fn imax(self) -> usize {
        self.inner.imax().0
    }

    /// Index of the smallest lane; the lowest such index on ties.
    #[inline(always)]
    pub fn imin(self) -> usize {
        self.inner.imin().0
    }

    /// [`Vector::imax`] among the selected lanes, `None` if no lane is
    /// selected.
    #[inline(always)]
    pub fn imax_masked(self, mask: Mask<N>) -> Option<usize> {
        self.inner.imax_masked(mask.lane_bits()).map(|(lane, _)| lane)
    }

    /// [`Vector::imin`] among the selected lanes, `None` if no lane is
    /// selected.
    #[inline(always)]
    pub fn imin_masked(self, mask: Mask<N>) -> Option<usize> {
        self.inner.imin_masked(mask.lane_bits()).map(|(lane, _)| lane)
    }
}

impl<T, const N: usize> Vector<T, N>
where
    T: IntElement,
    LaneCount<N>: SupportedLaneCount,
    Backing<T, N>: IntPrimitive,
{
    binary_ops! {
        band, band_scalar, band_masked, band_scalar_masked;
        bor, bor_scalar, bor_masked, bor_scalar_masked;
        bxor, bxor_scalar, bxor_masked, bxor_scalar_masked;
    }

    unary_ops! {
        bnot, bnot_masked;
    }

    #[inline(always)]
    fn shift_amounts(amounts: Vector<T::Unsigned, N>) -> Self {
        Self::from_array(amounts.to_array().map(T::from_unsigned_bits))
    }

    /// Lane `i` shifted left by `amounts[i]`, modulo the bit width.
    #[inline(always)]
    pub fn shl(self, amounts: Vector<T::Unsigned, N>) -> Self {
        Self::from_inner(self.inner.shl(Self::shift_amounts(amounts).inner))
    }

    /// Every lane shifted left by `amount`, modulo the bit width.
    #[inline(always)]
    pub fn shl_scalar(self, amount: u32) -> Self {
        Self::from_inner(self.inner.shl(Self::splat(T::from_shift_amount(amount)).inner))
    }

    #[inline(always)]
    pub fn shl_masked(self, mask: Mask<N>, amounts: Vector<T::Unsigned, N>) -> Self {
        Self::from_inner(
            self.inner
                .shl_masked(mask.lane_bits(), Self::shift_amounts(amounts).inner),
        )
    }

    #[inline(always)]
    pub fn shl_scalar_masked(self, mask: Mask<N>, amount: u32) -> Self {
        Self::from_inner(self.inner.shl_masked(
            mask.lane_bits(),
            Self::splat(T::from_shift_amount(amount)).inner,
        ))
    }

    /// Lane `i` shifted right by `amounts[i]`, modulo the bit width.
    /// Arithmetic for signed lanes, logical for unsigned ones.
    #[inline(always)]
    pub fn shr(self, amounts: Vector<T::Unsigned, N>) -> Self {
        Self::from_inner(self.inner.shr(Self::shift_amounts(amounts).inner))
    }

    #[inline(always)]
    pub fn shr_scalar(self, amount: u32) -> Self {
        Self::from_inner(self.inner.shr(Self::splat(T::from_shift_amount(amount)).inner))
    }

    #[inline(always)]
    pub fn shr_masked(self, mask: Mask<N>, amounts: Vector<T::Unsigned, N>) -> Self {
        Self::from_inner(
            self.inner
                .shr_masked(mask.lane_bits(), Self::shift_amounts(amounts).inner),
        )
    }

    #[inline(always)]
    pub fn shr_scalar_masked(self, mask: Mask<N>, amount: u32) -> Self {
        Self::from_inner(self.inner.shr_masked(
            mask.lane_bits(),
            Self::splat(T::from_shift_amount(amount)).inner,
        ))
    }

    reductions! {
        /// Bitwise AND of all lanes.
        hband, hband_masked, hband_seeded, hband_masked_seeded => |a: T, b: T| a & b;
        /// Bitwise OR of all lanes.
        hbor, hbor_masked, hbor_seeded, hbor_masked_seeded => |a: T, b: T| a | b;
        /// Bitwise XOR of all lanes.
        hbxor, hbxor_masked, hbxor_seeded, hbxor_masked_seeded => |a: T, b: T| a ^ b;
    }
}

impl<T, const N: usize> Vector<T, N>
where
    T: FloatElement,
    LaneCount<N>: SupportedLaneCount,
    Backing<T, N>: FloatPrimitive,
{
    unary_ops! {
        sqrt, sqrt_masked;
        floor, floor_masked;
        ceil, ceil_masked;
        /// Round to nearest, ties to even.
        round, round_masked;
        /// Round toward zero.
        trunc, trunc_masked;
        exp, exp_masked;
        /// Natural logarithm.
        log, log_masked;
        sin, sin_masked;
        cos, cos_masked;
    }

    classify_ops! {
        /// Neither infinite nor NaN.
        isfin;
        isinf;
        isnan;
        isnormal;
        issubnormal;
        /// `+0.0` or `-0.0`.
        iszero;
    }
}

/// Joins two half-width vectors into one, implemented for every width from
/// 2 to 128 lanes.
pub trait Pack<Half>: Sized {
    fn pack(lo: Half, hi: Half) -> Self;
}

impl<T, const N: usize> Vector<T, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    /// `lo` in lanes `[0, N/2)`, `hi` in lanes `[N/2, N)`.
    ///
    /// The full width follows from the halves, so `Vector::pack(lo, hi)`
    /// needs no annotation.
    #[inline(always)]
    pub fn pack<H>(lo: H, hi: H) -> Self
    where
        Self: Pack<H>,
    {
        <Self as Pack<H>>::pack(lo, hi)
    }
}

macro_rules! halves {
    ($($full:literal => $half:literal),* $(,)?) => {$(
        impl<T: Element> Pack<Vector<T, $half>> for Vector<T, $full> {
            #[inline(always)]
            fn pack(lo: Vector<T, $half>, hi: Vector<T, $half>) -> Self {
                let mut values = [T::zero(); $full];
                unsafe {
                    lo.store(values.as_mut_ptr());
                    hi.store(values.as_mut_ptr().add($half));
                }
                Self::from_array(values)
            }
        }

        impl<T: Element> Vector<T, $full> {
            #[inline(always)]
            pub fn unpack(self) -> (Vector<T, $half>, Vector<T, $half>) {
                (self.unpacklo(), self.unpackhi())
            }

            #[inline(always)]
            pub fn unpacklo(self) -> Vector<T, $half> {
                let values = self.to_array();
                unsafe { Vector::load(values.as_ptr()) }
            }

            #[inline(always)]
            pub fn unpackhi(self) -> Vector<T, $half> {
                let values = self.to_array();
                unsafe { Vector::load(values.as_ptr().add($half)) }
            }

            /// Replaces lanes `[0, N/2)`, keeping the high half.
            #[inline(always)]
            pub fn packlo(&mut self, lo: Vector<T, $half>) {
                *self = Self::pack(lo, self.unpackhi());
            }

            /// Replaces lanes `[N/2, N)`, keeping the low half.
            #[inline(always)]
            pub fn packhi(&mut self, hi: Vector<T, $half>) {
                *self = Self::pack(self.unpacklo(), hi);
            }
        }
    )*};
}

halves! {
    2 => 1,
    4 => 2,
    8 => 4,
    16 => 8,
    32 => 16,
    64 => 32,
    128 => 64,
}

impl<T, const N: usize> Clone for Vector<T, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Vector<T, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
}

impl<T, const N: usize> Default for Vector<T, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    fn default() -> Self {
        Self::zero()
    }
}

/// Lane-wise equality of all `N` lanes, so a NaN lane makes two vectors
/// unequal.
impl<T, const N: usize> PartialEq for Vector<T, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmpeq(*other).all()
    }
}

impl<T, const N: usize> fmt::Debug for Vector<T, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_array()).finish()
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    fn from(values: [T; N]) -> Self {
        Self::from_array(values)
    }
}

impl<T, const N: usize> TryFrom<&[T]> for Vector<T, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    type Error = LanewiseError;

    fn try_from(slice: &[T]) -> Result<Self> {
        Self::try_from_slice(slice)
    }
}

macro_rules! vector_operator {
    (
        $bounds:tt
        $($trait:ident::$method:ident, $assign:ident::$assign_method:ident => $op:ident, $scalar:ident;)*
    ) => {$(
        vector_operator!(@impl $bounds $trait::$method, $assign::$assign_method => $op, $scalar);
    )*};

    (
        @impl [$($bound:tt)*]
        $trait:ident::$method:ident, $assign:ident::$assign_method:ident => $op:ident, $scalar:ident
    ) => {
        impl<T, const N: usize> $trait for Vector<T, N>
        where
            LaneCount<N>: SupportedLaneCount,
            $($bound)*
        {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self::$op(self, rhs)
            }
        }

        impl<T, const N: usize> $trait<T> for Vector<T, N>
        where
            LaneCount<N>: SupportedLaneCount,
            $($bound)*
        {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: T) -> Self {
                Self::$scalar(self, rhs)
            }
        }

        impl<T, const N: usize> $assign for Vector<T, N>
        where
            LaneCount<N>: SupportedLaneCount,
            $($bound)*
        {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = Self::$op(*self, rhs);
            }
        }

        impl<T, const N: usize> $assign<T> for Vector<T, N>
        where
            LaneCount<N>: SupportedLaneCount,
            $($bound)*
        {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: T) {
                *self = Self::$scalar(*self, rhs);
            }
        }
    };
}

vector_operator! {
    [T: Element,]
    Add::add, AddAssign::add_assign => add, add_scalar;
    Sub::sub, SubAssign::sub_assign => sub, sub_scalar;
    Mul::mul, MulAssign::mul_assign => mul, mul_scalar;
    Div::div, DivAssign::div_assign => div, div_scalar;
}

vector_operator! {
    [T: IntElement, Backing<T, N>: IntPrimitive,]
    BitAnd::bitand, BitAndAssign::bitand_assign => band, band_scalar;
    BitOr::bitor, BitOrAssign::bitor_assign => bor, bor_scalar;
    BitXor::bitxor, BitXorAssign::bitxor_assign => bxor, bxor_scalar;
}

impl<T, const N: usize> Neg for Vector<T, N>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self::neg(self)
    }
}

impl<T, const N: usize> Not for Vector<T, N>
where
    T: IntElement,
    LaneCount<N>: SupportedLaneCount,
    Backing<T, N>: IntPrimitive,
{
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        self.bnot()
    }
}

macro_rules! shift_operator {
    ($($trait:ident::$method:ident, $assign:ident::$assign_method:ident => $op:ident, $scalar:ident;)*) => {$(
        impl<T, const N: usize> $trait<u32> for Vector<T, N>
        where
            T: IntElement,
            LaneCount<N>: SupportedLaneCount,
            Backing<T, N>: IntPrimitive,
        {
            type Output = Self;

            #[inline(always)]
            fn $method(self, amount: u32) -> Self {
                self.$scalar(amount)
            }
        }

        impl<T, const N: usize> $trait<Vector<T::Unsigned, N>> for Vector<T, N>
        where
            T: IntElement,
            LaneCount<N>: SupportedLaneCount,
            Backing<T, N>: IntPrimitive,
        {
            type Output = Self;

            #[inline(always)]
            fn $method(self, amounts: Vector<T::Unsigned, N>) -> Self {
                Self::$op(self, amounts)
            }
        }

        impl<T, const N: usize> $assign<u32> for Vector<T, N>
        where
            T: IntElement,
            LaneCount<N>: SupportedLaneCount,
            Backing<T, N>: IntPrimitive,
        {
            #[inline(always)]
            fn $assign_method(&mut self, amount: u32) {
                *self = self.$scalar(amount);
            }
        }

        impl<T, const N: usize> $assign<Vector<T::Unsigned, N>> for Vector<T, N>
        where
            T: IntElement,
            LaneCount<N>: SupportedLaneCount,
            Backing<T, N>: IntPrimitive,
        {
            #[inline(always)]
            fn $assign_method(&mut self, amounts: Vector<T::Unsigned, N>) {
                *self = Self::$op(*self, amounts);
            }
        }
    )*};
}

shift_operator! {
    Shl::shl, ShlAssign::shl_assign => shl, shl_scalar;
    Shr::shr, ShrAssign::shr_assign => shr, shr_scalar;
}
