//! Scalar emulation: a single lane evaluated with the element's reference
//! functions.
//!
//! `ScalarLane<T>` is the one-lane primitive every element type has, on every
//! target. Composites of it provide every width that has no native backend.

use crate::element::{Element, FloatElement, IntElement};
use crate::mask::LaneBits;
use crate::simd::traits::{FloatPrimitive, IntPrimitive, Primitive};

/// One lane of `T`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(transparent)]
pub struct ScalarLane<T>(pub T);

#[inline(always)]
fn lane_bit(value: bool) -> LaneBits {
    LaneBits::from_raw(value as u128)
}

/// Masked forms evaluate the operation only when lane 0 is selected, so a
/// masked-off integer division by zero never runs.
macro_rules! lane_gated {
    ($($masked:ident($($arg:ident),*) => $op:ident;)*) => {$(
        #[inline(always)]
        fn $masked(self, mask: LaneBits, $($arg: Self),*) -> Self {
            if mask.test(0) {
                self.$op($($arg),*)
            } else {
                self
            }
        }
    )*};
}

macro_rules! lane_binary {
    ($($op:ident => $scalar:ident;)*) => {$(
        #[inline(always)]
        fn $op(self, rhs: Self) -> Self {
            ScalarLane(self.0.$scalar(rhs.0))
        }
    )*};
}

macro_rules! lane_unary {
    ($($op:ident => $scalar:ident;)*) => {$(
        #[inline(always)]
        fn $op(self) -> Self {
            ScalarLane(self.0.$scalar())
        }
    )*};
}

macro_rules! lane_predicate {
    ($($op:ident => $scalar:ident;)*) => {$(
        #[inline(always)]
        fn $op(self) -> LaneBits {
            lane_bit(self.0.$scalar())
        }
    )*};
}

impl<T: Element> Primitive for ScalarLane<T> {
    type Scalar = T;

    const LANES: usize = 1;

    #[inline(always)]
    fn splat(value: T) -> Self {
        ScalarLane(value)
    }

    #[inline(always)]
    fn extract(self, lane: usize) -> T {
        debug_assert_eq!(lane, 0, "lane {lane} out of range for 1 lane");
        self.0
    }

    #[inline(always)]
    fn insert(&mut self, lane: usize, value: T) {
        debug_assert_eq!(lane, 0, "lane {lane} out of range for 1 lane");
        self.0 = value;
    }

    #[inline(always)]
    unsafe fn load(ptr: *const T) -> Self {
        ScalarLane(*ptr)
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut T) {
        *ptr = self.0;
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: LaneBits, ptr: *const T) -> Self {
        if mask.test(0) {
            ScalarLane(*ptr)
        } else {
            self
        }
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: LaneBits, ptr: *mut T) {
        if mask.test(0) {
            *ptr = self.0;
        }
    }

    #[inline(always)]
    unsafe fn gather_stride_masked(self, mask: LaneBits, base: *const T, _stride: usize) -> Self {
        self.load_masked(mask, base)
    }

    #[inline(always)]
    unsafe fn gather_indices_masked(self, mask: LaneBits, base: *const T, indices: &[u32]) -> Self {
        debug_assert_eq!(indices.len(), 1);
        if mask.test(0) {
            ScalarLane(*base.add(indices[0] as usize))
        } else {
            self
        }
    }

    #[inline(always)]
    unsafe fn scatter_stride_masked(self, mask: LaneBits, base: *mut T, _stride: usize) {
        self.store_masked(mask, base)
    }

    #[inline(always)]
    unsafe fn scatter_indices_masked(self, mask: LaneBits, base: *mut T, indices: &[u32]) {
        debug_assert_eq!(indices.len(), 1);
        if mask.test(0) {
            *base.add(indices[0] as usize) = self.0;
        }
    }

    lane_binary! {
        add => scalar_add;
        sub => scalar_sub;
        mul => scalar_mul;
        div => scalar_div;
        sadd => scalar_sadd;
        ssub => scalar_ssub;
        min => scalar_min;
        max => scalar_max;
    }

    lane_unary! {
        neg => scalar_neg;
        abs => scalar_abs;
        rcp => scalar_rcp;
    }

    lane_gated! {
        add_masked(rhs) => add;
        sub_masked(rhs) => sub;
        mul_masked(rhs) => mul;
        div_masked(rhs) => div;
        sadd_masked(rhs) => sadd;
        ssub_masked(rhs) => ssub;
        min_masked(rhs) => min;
        max_masked(rhs) => max;
        subfrom_masked(rhs) => subfrom;
        rcpmul_masked(rhs) => rcpmul;
        neg_masked() => neg;
        abs_masked() => abs;
        rcp_masked() => rcp;
        fmuladd_masked(b, c) => fmuladd;
        fmulsub_masked(b, c) => fmulsub;
        faddmul_masked(b, c) => faddmul;
        fsubmul_masked(b, c) => fsubmul;
    }

    #[inline(always)]
    fn fmuladd(self, b: Self, c: Self) -> Self {
        ScalarLane(self.0.scalar_mul_add(b.0, c.0))
    }

    #[inline(always)]
    fn fmulsub(self, b: Self, c: Self) -> Self {
        ScalarLane(self.0.scalar_mul_sub(b.0, c.0))
    }

    #[inline(always)]
    fn cmpeq(self, rhs: Self) -> LaneBits {
        lane_bit(self.0 == rhs.0)
    }

    #[inline(always)]
    fn cmpne(self, rhs: Self) -> LaneBits {
        lane_bit(self.0 != rhs.0)
    }

    #[inline(always)]
    fn cmpgt(self, rhs: Self) -> LaneBits {
        lane_bit(self.0 > rhs.0)
    }

    #[inline(always)]
    fn cmplt(self, rhs: Self) -> LaneBits {
        lane_bit(self.0 < rhs.0)
    }

    #[inline(always)]
    fn cmpge(self, rhs: Self) -> LaneBits {
        lane_bit(self.0 >= rhs.0)
    }

    #[inline(always)]
    fn cmple(self, rhs: Self) -> LaneBits {
        lane_bit(self.0 <= rhs.0)
    }

    #[inline(always)]
    fn blend(self, mask: LaneBits, rhs: Self) -> Self {
        if mask.test(0) {
            rhs
        } else {
            self
        }
    }

    #[inline(always)]
    fn hadd(self) -> T {
        self.0
    }

    #[inline(always)]
    fn hmul(self) -> T {
        self.0
    }

    #[inline(always)]
    fn hmax(self) -> T {
        self.0
    }

    #[inline(always)]
    fn hmin(self) -> T {
        self.0
    }

    #[inline(always)]
    fn imax(self) -> (usize, T) {
        (0, self.0)
    }

    #[inline(always)]
    fn imin(self) -> (usize, T) {
        (0, self.0)
    }

    #[inline(always)]
    fn imax_masked(self, mask: LaneBits) -> Option<(usize, T)> {
        mask.test(0).then_some((0, self.0))
    }

    #[inline(always)]
    fn imin_masked(self, mask: LaneBits) -> Option<(usize, T)> {
        mask.test(0).then_some((0, self.0))
    }
}

impl<T: IntElement> IntPrimitive for ScalarLane<T> {
    #[inline(always)]
    fn band(self, rhs: Self) -> Self {
        ScalarLane(self.0 & rhs.0)
    }

    #[inline(always)]
    fn bor(self, rhs: Self) -> Self {
        ScalarLane(self.0 | rhs.0)
    }

    #[inline(always)]
    fn bxor(self, rhs: Self) -> Self {
        ScalarLane(self.0 ^ rhs.0)
    }

    #[inline(always)]
    fn bnot(self) -> Self {
        ScalarLane(!self.0)
    }

    lane_binary! {
        shl => scalar_shl;
        shr => scalar_shr;
    }

    lane_gated! {
        band_masked(rhs) => band;
        bor_masked(rhs) => bor;
        bxor_masked(rhs) => bxor;
        shl_masked(rhs) => shl;
        shr_masked(rhs) => shr;
        bnot_masked() => bnot;
    }

    #[inline(always)]
    fn hband(self) -> T {
        self.0
    }

    #[inline(always)]
    fn hbor(self) -> T {
        self.0
    }

    #[inline(always)]
    fn hbxor(self) -> T {
        self.0
    }
}

impl<T: FloatElement> FloatPrimitive for ScalarLane<T> {
    lane_unary! {
        sqrt => scalar_sqrt;
        floor => scalar_floor;
        ceil => scalar_ceil;
        round => scalar_round;
        trunc => scalar_trunc;
        exp => scalar_exp;
        log => scalar_log;
        sin => scalar_sin;
        cos => scalar_cos;
    }

    lane_gated! {
        sqrt_masked() => sqrt;
        floor_masked() => floor;
        ceil_masked() => ceil;
        round_masked() => round;
        trunc_masked() => trunc;
        exp_masked() => exp;
        log_masked() => log;
        sin_masked() => sin;
        cos_masked() => cos;
    }

    lane_predicate! {
        isfin => scalar_is_finite;
        isinf => scalar_is_infinite;
        isnan => scalar_is_nan;
        isnormal => scalar_is_normal;
        issubnormal => scalar_is_subnormal;
        iszero => scalar_is_zero;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ON: LaneBits = LaneBits::from_raw(1);

    #[test]
    fn test_masked_off_division_is_not_evaluated() {
        let a = ScalarLane(7i32);
        let b = ScalarLane(0i32);
        assert_eq!(a.div_masked(LaneBits::NONE, b), a);
    }

    #[test]
    #[should_panic(expected = "integer division by zero")]
    fn test_selected_division_by_zero_panics() {
        let _ = ScalarLane(7u8).div_masked(ON, ScalarLane(0));
    }

    #[test]
    fn test_masked_reduction_of_empty_mask_is_identity() {
        let a = ScalarLane(5i16);
        assert_eq!(a.hadd_masked(LaneBits::NONE), 0);
        assert_eq!(a.hmul_masked(LaneBits::NONE), 1);
        assert_eq!(a.hmax_masked(LaneBits::NONE), i16::MIN);
        assert_eq!(a.hmin_masked(LaneBits::NONE), i16::MAX);
        assert_eq!(a.hband_masked(LaneBits::NONE), -1);
        assert_eq!(a.hmax_masked(ON), 5);
        assert_eq!(a.imax_masked(LaneBits::NONE), None);
    }

    #[test]
    fn test_fused_forms() {
        let (a, b, c) = (ScalarLane(2.0f64), ScalarLane(3.0), ScalarLane(4.0));
        assert_eq!(a.fmuladd(b, c).0, 10.0);
        assert_eq!(a.fmulsub(b, c).0, 2.0);
        assert_eq!(a.faddmul(b, c).0, 20.0);
        assert_eq!(a.fsubmul(b, c).0, -4.0);
        assert_eq!(a.fmuladd_masked(LaneBits::NONE, b, c), a);
    }

    #[test]
    fn test_compares_produce_lane_zero_bit() {
        let a = ScalarLane(1.0f32);
        let b = ScalarLane(2.0f32);
        assert_eq!(a.cmplt(b), ON);
        assert_eq!(a.cmpgt(b), LaneBits::NONE);
        assert_eq!(ScalarLane(f32::NAN).cmpne(ScalarLane(f32::NAN)), ON);
    }

    #[test]
    fn test_gather_and_scatter_by_index() {
        let data = [10u32, 20, 30, 40];
        let lane = unsafe { ScalarLane::gather_indices(data.as_ptr(), &[2]) };
        assert_eq!(lane.0, 30);

        let mut out = [0u32; 4];
        unsafe { ScalarLane(9u32).scatter_indices(out.as_mut_ptr(), &[3]) };
        assert_eq!(out, [0, 0, 0, 9]);
    }
}
