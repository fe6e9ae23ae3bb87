//! The primitive contract every backend implements.
//!
//! A primitive is one concrete implementation of the operation taxonomy for a
//! fixed `(element, lane count)` pair. Masks cross this seam as [`LaneBits`].
//!
//! Only the unmasked vector-operand form of each operation is required. The
//! masked forms have provided implementations that evaluate the unmasked
//! operation and blend, and the memory forms fall back to their masked
//! counterparts with every lane selected. Backends override whatever they can
//! do better; the scalar and composite backends override every masked form so
//! that masked-off lanes are never evaluated.
//!
//! Reductions fold in a fixed pairwise order (low half first, then high half,
//! then the two results) on every backend, see [`fold_tree`].

use std::fmt::Debug;

use num::traits::{One, Zero};

use crate::element::{Element, FloatElement, IntElement};
use crate::mask::LaneBits;

/// Folds `lanes` pairwise: `f(fold(low half), fold(high half))`.
///
/// This is the association order of a composite vector, so native backends
/// reduce with it to stay bit-identical with composed widths.
#[inline(always)]
pub fn fold_tree<T: Copy>(lanes: &[T], f: &impl Fn(T, T) -> T) -> T {
    debug_assert!(!lanes.is_empty(), "cannot fold zero lanes");
    if lanes.len() == 1 {
        return lanes[0];
    }
    let (lo, hi) = lanes.split_at(lanes.len() / 2);
    f(fold_tree(lo, f), fold_tree(hi, f))
}

/// Index and value of the best lane among the lanes selected by `mask`,
/// in the same pairwise order as [`fold_tree`]. Ties keep the lower index.
#[inline(always)]
pub fn select_tree<T: Copy>(
    lanes: &[T],
    mask: LaneBits,
    better: &impl Fn(T, T) -> bool,
) -> Option<(usize, T)> {
    if lanes.len() == 1 {
        return mask.test(0).then(|| (0, lanes[0]));
    }
    let half = lanes.len() / 2;
    let (lo, hi) = lanes.split_at(half);
    let lo = select_tree(lo, mask.low(half), better);
    let hi = select_tree(hi, mask.high(half), better);
    pick_better(lo, hi, half, better)
}

/// Combines the per-half winners of an index reduction. `hi` indices are
/// relative to the high half and get shifted by `half`.
#[inline(always)]
pub fn pick_better<T: Copy>(
    lo: Option<(usize, T)>,
    hi: Option<(usize, T)>,
    half: usize,
    better: &impl Fn(T, T) -> bool,
) -> Option<(usize, T)> {
    match (lo, hi) {
        (Some((li, lv)), Some((hi, hv))) => {
            if better(hv, lv) {
                Some((hi + half, hv))
            } else {
                Some((li, lv))
            }
        }
        (Some(lo), None) => Some(lo),
        (None, Some((hi, hv))) => Some((hi + half, hv)),
        (None, None) => None,
    }
}

#[inline(always)]
pub(crate) fn greater<T: PartialOrd>(candidate: T, current: T) -> bool {
    candidate > current
}

#[inline(always)]
pub(crate) fn less<T: PartialOrd>(candidate: T, current: T) -> bool {
    candidate < current
}

macro_rules! masked_binary {
    ($($(#[$doc:meta])* $op:ident => $masked:ident;)*) => {$(
        $(#[$doc])*
        #[inline(always)]
        fn $masked(self, mask: LaneBits, rhs: Self) -> Self {
            self.blend(mask, self.$op(rhs))
        }
    )*};
}

macro_rules! masked_unary {
    ($($op:ident => $masked:ident;)*) => {$(
        #[inline(always)]
        fn $masked(self, mask: LaneBits) -> Self {
            self.blend(mask, self.$op())
        }
    )*};
}

macro_rules! masked_ternary {
    ($($op:ident => $masked:ident;)*) => {$(
        #[inline(always)]
        fn $masked(self, mask: LaneBits, b: Self, c: Self) -> Self {
            self.blend(mask, self.$op(b, c))
        }
    )*};
}

macro_rules! masked_reduction {
    ($($op:ident => $masked:ident, $identity:expr;)*) => {$(
        /// Masked-off lanes are replaced by the identity element first.
        #[inline(always)]
        fn $masked(self, mask: LaneBits) -> Self::Scalar {
            Self::splat($identity).blend(mask, self).$op()
        }
    )*};
}

/// Operations available for every element type.
pub trait Primitive: Copy + Debug + Send + Sync + 'static {
    type Scalar: Element;

    const LANES: usize;

    /// Every lane set to `value`.
    fn splat(value: Self::Scalar) -> Self;

    #[inline(always)]
    fn zero() -> Self {
        Self::splat(<Self::Scalar as Zero>::zero())
    }

    /// Value of lane `lane`. `lane < LANES` is checked in debug builds.
    fn extract(self, lane: usize) -> Self::Scalar;

    /// Overwrites lane `lane` in place.
    fn insert(&mut self, lane: usize, value: Self::Scalar);

    // ============================================================================================
    // MEMORY
    // ============================================================================================

    /// # Safety
    ///
    /// `ptr` must be valid for reads of `LANES` elements.
    unsafe fn load(ptr: *const Self::Scalar) -> Self;

    /// # Safety
    ///
    /// As [`Primitive::load`], and `ptr` must be aligned to
    /// `LANES * size_of::<Scalar>()` bytes.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const Self::Scalar) -> Self {
        Self::load(ptr)
    }

    /// # Safety
    ///
    /// `ptr` must be valid for writes of `LANES` elements.
    unsafe fn store(self, ptr: *mut Self::Scalar);

    /// # Safety
    ///
    /// As [`Primitive::store`], and `ptr` must be aligned to
    /// `LANES * size_of::<Scalar>()` bytes.
    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut Self::Scalar) {
        self.store(ptr)
    }

    /// Reads `ptr[i]` into the selected lanes; other lanes keep `self` and
    /// their memory is not read.
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for reads for every selected lane `i`.
    unsafe fn load_masked(self, mask: LaneBits, ptr: *const Self::Scalar) -> Self;

    /// Writes the selected lanes to `ptr[i]`; other memory is not written.
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for writes for every selected lane `i`.
    unsafe fn store_masked(self, mask: LaneBits, ptr: *mut Self::Scalar);

    /// Lane `i` reads `base[i * stride]` when selected.
    ///
    /// # Safety
    ///
    /// Every addressed element of a selected lane must be valid for reads.
    unsafe fn gather_stride_masked(
        self,
        mask: LaneBits,
        base: *const Self::Scalar,
        stride: usize,
    ) -> Self;

    /// Lane `i` reads `base[indices[i]]` when selected.
    ///
    /// # Safety
    ///
    /// `indices.len() == LANES`, and every addressed element of a selected
    /// lane must be valid for reads.
    unsafe fn gather_indices_masked(
        self,
        mask: LaneBits,
        base: *const Self::Scalar,
        indices: &[u32],
    ) -> Self;

    /// Lane `i` is written to `base[i * stride]` when selected.
    ///
    /// # Safety
    ///
    /// Every addressed element of a selected lane must be valid for writes.
    unsafe fn scatter_stride_masked(self, mask: LaneBits, base: *mut Self::Scalar, stride: usize);

    /// Lane `i` is written to `base[indices[i]]` when selected.
    ///
    /// # Safety
    ///
    /// `indices.len() == LANES`, and every addressed element of a selected
    /// lane must be valid for writes.
    unsafe fn scatter_indices_masked(self, mask: LaneBits, base: *mut Self::Scalar, indices: &[u32]);

    /// # Safety
    ///
    /// See [`Primitive::gather_stride_masked`] with every lane selected.
    #[inline(always)]
    unsafe fn gather_stride(base: *const Self::Scalar, stride: usize) -> Self {
        Self::zero().gather_stride_masked(LaneBits::all(Self::LANES), base, stride)
    }

    /// # Safety
    ///
    /// See [`Primitive::gather_indices_masked`] with every lane selected.
    #[inline(always)]
    unsafe fn gather_indices(base: *const Self::Scalar, indices: &[u32]) -> Self {
        Self::zero().gather_indices_masked(LaneBits::all(Self::LANES), base, indices)
    }

    /// # Safety
    ///
    /// See [`Primitive::scatter_stride_masked`] with every lane selected.
    #[inline(always)]
    unsafe fn scatter_stride(self, base: *mut Self::Scalar, stride: usize) {
        self.scatter_stride_masked(LaneBits::all(Self::LANES), base, stride)
    }

    /// # Safety
    ///
    /// See [`Primitive::scatter_indices_masked`] with every lane selected.
    #[inline(always)]
    unsafe fn scatter_indices(self, base: *mut Self::Scalar, indices: &[u32]) {
        self.scatter_indices_masked(LaneBits::all(Self::LANES), base, indices)
    }

    // ============================================================================================
    // ARITHMETIC
    // ============================================================================================

    /// Lane-wise `self + rhs`, wrapping for integers.
    fn add(self, rhs: Self) -> Self;

    /// Lane-wise `self - rhs`, wrapping for integers.
    fn sub(self, rhs: Self) -> Self;

    /// Lane-wise `self * rhs`, keeping the low bits for integers.
    fn mul(self, rhs: Self) -> Self;

    /// # Panics
    ///
    /// Integer primitives panic when a lane divides by zero.
    fn div(self, rhs: Self) -> Self;

    /// Saturating add: integers clamp to `[MIN, MAX]`; floats add normally.
    fn sadd(self, rhs: Self) -> Self;

    /// Saturating subtract, clamped like [`Primitive::sadd`].
    fn ssub(self, rhs: Self) -> Self;

    /// `self` where `self < rhs`, otherwise `rhs`. A NaN in either operand
    /// selects `rhs`.
    fn min(self, rhs: Self) -> Self;

    /// `self` where `self > rhs`, otherwise `rhs`. A NaN in either operand
    /// selects `rhs`.
    fn max(self, rhs: Self) -> Self;

    /// `rhs - self`.
    #[inline(always)]
    fn subfrom(self, rhs: Self) -> Self {
        rhs.sub(self)
    }

    /// `rhs / self`, the reciprocal scaled by `rhs`.
    #[inline(always)]
    fn rcpmul(self, rhs: Self) -> Self {
        rhs.div(self)
    }

    /// Wrapping negation for integers; flips the sign bit for floats.
    fn neg(self) -> Self;

    /// Wrapping absolute value for integers (`MIN` stays `MIN`); clears the
    /// sign bit for floats.
    fn abs(self) -> Self;

    /// `1 / self`.
    #[inline(always)]
    fn rcp(self) -> Self {
        Self::splat(<Self::Scalar as One>::one()).div(self)
    }

    masked_binary! {
        add => add_masked;
        sub => sub_masked;
        mul => mul_masked;
        div => div_masked;
        sadd => sadd_masked;
        ssub => ssub_masked;
        min => min_masked;
        max => max_masked;
        subfrom => subfrom_masked;
        rcpmul => rcpmul_masked;
    }

    masked_unary! {
        neg => neg_masked;
        abs => abs_masked;
        rcp => rcp_masked;
    }

    // ============================================================================================
    // FUSED
    // ============================================================================================

    /// `self * b + c`.
    fn fmuladd(self, b: Self, c: Self) -> Self;

    /// `self * b - c`.
    fn fmulsub(self, b: Self, c: Self) -> Self;

    /// `(self + b) * c`.
    #[inline(always)]
    fn faddmul(self, b: Self, c: Self) -> Self {
        self.add(b).mul(c)
    }

    /// `(self - b) * c`.
    #[inline(always)]
    fn fsubmul(self, b: Self, c: Self) -> Self {
        self.sub(b).mul(c)
    }

    masked_ternary! {
        fmuladd => fmuladd_masked;
        fmulsub => fmulsub_masked;
        faddmul => faddmul_masked;
        fsubmul => fsubmul_masked;
    }

    // ============================================================================================
    // COMPARE & BLEND
    // ============================================================================================

    /// Ordered for floats: a NaN lane is never equal.
    fn cmpeq(self, rhs: Self) -> LaneBits;

    /// Unordered for floats: a NaN lane is always not-equal.
    fn cmpne(self, rhs: Self) -> LaneBits;

    // the relational compares are ordered; NaN lanes come out clear
    fn cmpgt(self, rhs: Self) -> LaneBits;
    fn cmplt(self, rhs: Self) -> LaneBits;
    fn cmpge(self, rhs: Self) -> LaneBits;
    fn cmple(self, rhs: Self) -> LaneBits;

    /// Lane `i` is `rhs[i]` where `mask` is set and `self[i]` elsewhere.
    fn blend(self, mask: LaneBits, rhs: Self) -> Self;

    // ============================================================================================
    // REDUCTIONS
    // ============================================================================================

    /// Sum of all lanes, folded pairwise in the order of [`fold_tree`] so
    /// every backend rounds float sums identically.
    fn hadd(self) -> Self::Scalar;

    /// Product of all lanes, folded like [`Primitive::hadd`].
    fn hmul(self) -> Self::Scalar;

    fn hmax(self) -> Self::Scalar;
    fn hmin(self) -> Self::Scalar;

    masked_reduction! {
        hadd => hadd_masked, <Self::Scalar as Zero>::zero();
        hmul => hmul_masked, <Self::Scalar as One>::one();
        hmax => hmax_masked, <Self::Scalar as Element>::lowest();
        hmin => hmin_masked, <Self::Scalar as Element>::highest();
    }

    /// Lowest index holding the maximum, with its value.
    fn imax(self) -> (usize, Self::Scalar);

    /// Lowest index holding the minimum, with its value.
    fn imin(self) -> (usize, Self::Scalar);

    /// As [`Primitive::imax`] over the selected lanes; `None` if none is.
    #[inline(always)]
    fn imax_masked(self, mask: LaneBits) -> Option<(usize, Self::Scalar)> {
        let lanes: Vec<Self::Scalar> = (0..Self::LANES).map(|lane| self.extract(lane)).collect();
        select_tree(&lanes, mask, &greater)
    }

    /// As [`Primitive::imin`] over the selected lanes; `None` if none is.
    #[inline(always)]
    fn imin_masked(self, mask: LaneBits) -> Option<(usize, Self::Scalar)> {
        let lanes: Vec<Self::Scalar> = (0..Self::LANES).map(|lane| self.extract(lane)).collect();
        select_tree(&lanes, mask, &less)
    }
}

/// Bitwise, shift and bitwise-reduction operations of integer primitives.
///
/// Shift amounts are lanes of `Self`, read as unsigned bit patterns.
pub trait IntPrimitive: Primitive
where
    Self::Scalar: IntElement,
{
    fn band(self, rhs: Self) -> Self;
    fn bor(self, rhs: Self) -> Self;
    fn bxor(self, rhs: Self) -> Self;
    fn bnot(self) -> Self;

    /// Left shift, the amount taken modulo the bit width.
    fn shl(self, amount: Self) -> Self;

    /// Arithmetic right shift for signed lanes, logical for unsigned; the
    /// amount is taken modulo the bit width.
    fn shr(self, amount: Self) -> Self;

    masked_binary! {
        band => band_masked;
        bor => bor_masked;
        bxor => bxor_masked;
        shl => shl_masked;
        shr => shr_masked;
    }

    masked_unary! {
        bnot => bnot_masked;
    }

    fn hband(self) -> Self::Scalar;
    fn hbor(self) -> Self::Scalar;
    fn hbxor(self) -> Self::Scalar;

    masked_reduction! {
        hband => hband_masked, <Self::Scalar as IntElement>::all_ones();
        hbor => hbor_masked, <Self::Scalar as Zero>::zero();
        hbxor => hbxor_masked, <Self::Scalar as Zero>::zero();
    }
}

/// Rounding, transcendental and classification operations of float
/// primitives.
pub trait FloatPrimitive: Primitive
where
    Self::Scalar: FloatElement,
{
    fn sqrt(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;

    /// Round to nearest, ties to even.
    fn round(self) -> Self;

    /// Round toward zero.
    fn trunc(self) -> Self;

    fn exp(self) -> Self;
    fn log(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;

    masked_unary! {
        sqrt => sqrt_masked;
        floor => floor_masked;
        ceil => ceil_masked;
        round => round_masked;
        trunc => trunc_masked;
        exp => exp_masked;
        log => log_masked;
        sin => sin_masked;
        cos => cos_masked;
    }

    /// Neither infinite nor NaN.
    fn isfin(self) -> LaneBits;
    fn isinf(self) -> LaneBits;
    fn isnan(self) -> LaneBits;

    /// Finite, nonzero and not subnormal.
    fn isnormal(self) -> LaneBits;
    fn issubnormal(self) -> LaneBits;

    /// `+0.0` or `-0.0`.
    fn iszero(self) -> LaneBits;
}
