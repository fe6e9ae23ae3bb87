//! Recursive composition: a vector of `2 * H::LANES` lanes held as two
//! half-width primitives.
//!
//! Lanes `[0, H::LANES)` live in `lo`, lanes `[H::LANES, 2 * H::LANES)` in
//! `hi`. Every operation splits its vector operands and its mask into halves,
//! applies the half-width operation to each, and reassembles the result.
//! Comparisons join the two half masks, reductions combine the two half
//! results with the element operation, and index reductions shift the high
//! half's index by `H::LANES`.
//!
//! Pointer arithmetic for masked and strided accesses uses `wrapping_add`, so
//! computing the address of a fully masked-off half is always sound.

use crate::element::{Element, FloatElement, IntElement};
use crate::mask::LaneBits;
use crate::simd::traits::{greater, less, pick_better, FloatPrimitive, IntPrimitive, Primitive};

/// Two half-width primitives side by side.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Composite<H> {
    lo: H,
    hi: H,
}

impl<H: Primitive> Composite<H> {
    #[inline(always)]
    pub fn pack(lo: H, hi: H) -> Self {
        Self { lo, hi }
    }

    #[inline(always)]
    pub fn unpack(self) -> (H, H) {
        (self.lo, self.hi)
    }

    /// Lanes `[0, H::LANES)`.
    #[inline(always)]
    pub fn unpacklo(self) -> H {
        self.lo
    }

    /// Lanes `[H::LANES, 2 * H::LANES)`.
    #[inline(always)]
    pub fn unpackhi(self) -> H {
        self.hi
    }

    #[inline(always)]
    pub fn packlo(&mut self, lo: H) {
        self.lo = lo;
    }

    #[inline(always)]
    pub fn packhi(&mut self, hi: H) {
        self.hi = hi;
    }
}

macro_rules! split_binary {
    ($($op:ident),* $(,)?) => {$(
        #[inline(always)]
        fn $op(self, rhs: Self) -> Self {
            Self::pack(self.lo.$op(rhs.lo), self.hi.$op(rhs.hi))
        }
    )*};
}

macro_rules! split_binary_masked {
    ($($op:ident),* $(,)?) => {$(
        #[inline(always)]
        fn $op(self, mask: LaneBits, rhs: Self) -> Self {
            Self::pack(
                self.lo.$op(mask.low(H::LANES), rhs.lo),
                self.hi.$op(mask.high(H::LANES), rhs.hi),
            )
        }
    )*};
}

macro_rules! split_unary {
    ($($op:ident),* $(,)?) => {$(
        #[inline(always)]
        fn $op(self) -> Self {
            Self::pack(self.lo.$op(), self.hi.$op())
        }
    )*};
}

macro_rules! split_unary_masked {
    ($($op:ident),* $(,)?) => {$(
        #[inline(always)]
        fn $op(self, mask: LaneBits) -> Self {
            Self::pack(
                self.lo.$op(mask.low(H::LANES)),
                self.hi.$op(mask.high(H::LANES)),
            )
        }
    )*};
}

macro_rules! split_ternary {
    ($($op:ident),* $(,)?) => {$(
        #[inline(always)]
        fn $op(self, b: Self, c: Self) -> Self {
            Self::pack(self.lo.$op(b.lo, c.lo), self.hi.$op(b.hi, c.hi))
        }
    )*};
}

macro_rules! split_ternary_masked {
    ($($op:ident),* $(,)?) => {$(
        #[inline(always)]
        fn $op(self, mask: LaneBits, b: Self, c: Self) -> Self {
            Self::pack(
                self.lo.$op(mask.low(H::LANES), b.lo, c.lo),
                self.hi.$op(mask.high(H::LANES), b.hi, c.hi),
            )
        }
    )*};
}

macro_rules! split_compare {
    ($($op:ident),* $(,)?) => {$(
        #[inline(always)]
        fn $op(self, rhs: Self) -> LaneBits {
            LaneBits::join(self.lo.$op(rhs.lo), self.hi.$op(rhs.hi), H::LANES)
        }
    )*};
}

macro_rules! split_classify {
    ($($op:ident),* $(,)?) => {$(
        #[inline(always)]
        fn $op(self) -> LaneBits {
            LaneBits::join(self.lo.$op(), self.hi.$op(), H::LANES)
        }
    )*};
}

macro_rules! split_reduce {
    ($($op:ident, $masked:ident => $combine:expr;)*) => {$(
        #[inline(always)]
        fn $op(self) -> H::Scalar {
            ($combine)(self.lo.$op(), self.hi.$op())
        }

        #[inline(always)]
        fn $masked(self, mask: LaneBits) -> H::Scalar {
            ($combine)(
                self.lo.$masked(mask.low(H::LANES)),
                self.hi.$masked(mask.high(H::LANES)),
            )
        }
    )*};
}

impl<H: Primitive> Primitive for Composite<H> {
    type Scalar = H::Scalar;

    const LANES: usize = 2 * H::LANES;

    #[inline(always)]
    fn splat(value: H::Scalar) -> Self {
        let half = H::splat(value);
        Self::pack(half, half)
    }

    #[inline(always)]
    fn extract(self, lane: usize) -> H::Scalar {
        debug_assert!(lane < Self::LANES, "lane {lane} out of range for {} lanes", Self::LANES);
        if lane < H::LANES {
            self.lo.extract(lane)
        } else {
            self.hi.extract(lane - H::LANES)
        }
    }

    #[inline(always)]
    fn insert(&mut self, lane: usize, value: H::Scalar) {
        debug_assert!(lane < Self::LANES, "lane {lane} out of range for {} lanes", Self::LANES);
        if lane < H::LANES {
            self.lo.insert(lane, value)
        } else {
            self.hi.insert(lane - H::LANES, value)
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const H::Scalar) -> Self {
        Self::pack(H::load(ptr), H::load(ptr.add(H::LANES)))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const H::Scalar) -> Self {
        Self::pack(H::load_aligned(ptr), H::load_aligned(ptr.add(H::LANES)))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut H::Scalar) {
        self.lo.store(ptr);
        self.hi.store(ptr.add(H::LANES));
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut H::Scalar) {
        self.lo.store_aligned(ptr);
        self.hi.store_aligned(ptr.add(H::LANES));
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: LaneBits, ptr: *const H::Scalar) -> Self {
        Self::pack(
            self.lo.load_masked(mask.low(H::LANES), ptr),
            self.hi.load_masked(mask.high(H::LANES), ptr.wrapping_add(H::LANES)),
        )
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: LaneBits, ptr: *mut H::Scalar) {
        self.lo.store_masked(mask.low(H::LANES), ptr);
        self.hi.store_masked(mask.high(H::LANES), ptr.wrapping_add(H::LANES));
    }

    #[inline(always)]
    unsafe fn gather_stride_masked(
        self,
        mask: LaneBits,
        base: *const H::Scalar,
        stride: usize,
    ) -> Self {
        Self::pack(
            self.lo.gather_stride_masked(mask.low(H::LANES), base, stride),
            self.hi.gather_stride_masked(
                mask.high(H::LANES),
                base.wrapping_add(H::LANES * stride),
                stride,
            ),
        )
    }

    #[inline(always)]
    unsafe fn gather_indices_masked(
        self,
        mask: LaneBits,
        base: *const H::Scalar,
        indices: &[u32],
    ) -> Self {
        let (lo_indices, hi_indices) = indices.split_at(H::LANES);
        Self::pack(
            self.lo.gather_indices_masked(mask.low(H::LANES), base, lo_indices),
            self.hi.gather_indices_masked(mask.high(H::LANES), base, hi_indices),
        )
    }

    #[inline(always)]
    unsafe fn scatter_stride_masked(self, mask: LaneBits, base: *mut H::Scalar, stride: usize) {
        self.lo.scatter_stride_masked(mask.low(H::LANES), base, stride);
        self.hi.scatter_stride_masked(
            mask.high(H::LANES),
            base.wrapping_add(H::LANES * stride),
            stride,
        );
    }

    #[inline(always)]
    unsafe fn scatter_indices_masked(self, mask: LaneBits, base: *mut H::Scalar, indices: &[u32]) {
        let (lo_indices, hi_indices) = indices.split_at(H::LANES);
        self.lo.scatter_indices_masked(mask.low(H::LANES), base, lo_indices);
        self.hi.scatter_indices_masked(mask.high(H::LANES), base, hi_indices);
    }

    split_binary!(add, sub, mul, div, sadd, ssub, min, max, subfrom, rcpmul);
    split_binary_masked!(
        add_masked,
        sub_masked,
        mul_masked,
        div_masked,
        sadd_masked,
        ssub_masked,
        min_masked,
        max_masked,
        subfrom_masked,
        rcpmul_masked,
    );
    split_unary!(neg, abs, rcp);
    split_unary_masked!(neg_masked, abs_masked, rcp_masked);
    split_ternary!(fmuladd, fmulsub, faddmul, fsubmul);
    split_ternary_masked!(fmuladd_masked, fmulsub_masked, faddmul_masked, fsubmul_masked);
    split_compare!(cmpeq, cmpne, cmpgt, cmplt, cmpge, cmple);

    #[inline(always)]
    fn blend(self, mask: LaneBits, rhs: Self) -> Self {
        Self::pack(
            self.lo.blend(mask.low(H::LANES), rhs.lo),
            self.hi.blend(mask.high(H::LANES), rhs.hi),
        )
    }

    split_reduce! {
        hadd, hadd_masked => <H::Scalar as Element>::scalar_add;
        hmul, hmul_masked => <H::Scalar as Element>::scalar_mul;
        hmax, hmax_masked => <H::Scalar as Element>::scalar_max;
        hmin, hmin_masked => <H::Scalar as Element>::scalar_min;
    }

    #[inline(always)]
    fn imax(self) -> (usize, H::Scalar) {
        let (lo, hi) = (self.lo.imax(), self.hi.imax());
        if hi.1 > lo.1 {
            (hi.0 + H::LANES, hi.1)
        } else {
            lo
        }
    }

    #[inline(always)]
    fn imin(self) -> (usize, H::Scalar) {
        let (lo, hi) = (self.lo.imin(), self.hi.imin());
        if hi.1 < lo.1 {
            (hi.0 + H::LANES, hi.1)
        } else {
            lo
        }
    }

    #[inline(always)]
    fn imax_masked(self, mask: LaneBits) -> Option<(usize, H::Scalar)> {
        pick_better(
            self.lo.imax_masked(mask.low(H::LANES)),
            self.hi.imax_masked(mask.high(H::LANES)),
            H::LANES,
            &greater,
        )
    }

    #[inline(always)]
    fn imin_masked(self, mask: LaneBits) -> Option<(usize, H::Scalar)> {
        pick_better(
            self.lo.imin_masked(mask.low(H::LANES)),
            self.hi.imin_masked(mask.high(H::LANES)),
            H::LANES,
            &less,
        )
    }
}

impl<H> IntPrimitive for Composite<H>
where
    H: IntPrimitive,
    H::Scalar: IntElement,
{
    split_binary!(band, bor, bxor, shl, shr);
    split_binary_masked!(band_masked, bor_masked, bxor_masked, shl_masked, shr_masked);
    split_unary!(bnot);
    split_unary_masked!(bnot_masked);

    split_reduce! {
        hband, hband_masked => |a: H::Scalar, b: H::Scalar| a & b;
        hbor, hbor_masked => |a: H::Scalar, b: H::Scalar| a | b;
        hbxor, hbxor_masked => |a: H::Scalar, b: H::Scalar| a ^ b;
    }
}

impl<H> FloatPrimitive for Composite<H>
where
    H: FloatPrimitive,
    H::Scalar: FloatElement,
{
    split_unary!(sqrt, floor, ceil, round, trunc, exp, log, sin, cos);
    split_unary_masked!(
        sqrt_masked,
        floor_masked,
        ceil_masked,
        round_masked,
        trunc_masked,
        exp_masked,
        log_masked,
        sin_masked,
        cos_masked,
    );
    split_classify!(isfin, isinf, isnan, isnormal, issubnormal, iszero);
}
