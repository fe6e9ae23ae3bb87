//! NEON 4-lane f32 primitive.
//!
//! NEON has no packed predicate register and no masked memory access, so
//! compare results are reduced to [`LaneBits`] by weighting each all-ones lane
//! with its bit and summing across the register, and masked loads and stores
//! walk the selected lanes.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use crate::element::{Element, FloatElement};
use crate::mask::LaneBits;
use crate::simd::traits::{fold_tree, greater, less, select_tree, FloatPrimitive, Primitive};

pub const NEON_ALIGNMENT: usize = 16;

pub const LANE_COUNT: usize = 4;

const LANE_WEIGHTS: [u32; LANE_COUNT] = [1, 2, 4, 8];

/// A NEON register of 4 f32 lanes.
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    elements: float32x4_t,
}

impl F32x4 {
    #[inline(always)]
    fn from_register(elements: float32x4_t) -> Self {
        Self { elements }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; LANE_COUNT] {
        let mut lanes = [0.0f32; LANE_COUNT];
        unsafe { vst1q_f32(lanes.as_mut_ptr(), self.elements) };
        lanes
    }

    #[inline(always)]
    fn from_array(lanes: [f32; LANE_COUNT]) -> Self {
        Self::from_register(unsafe { vld1q_f32(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn lane_mask(mask: LaneBits) -> uint32x4_t {
        unsafe {
            vtstq_u32(
                vdupq_n_u32(mask.low(LANE_COUNT).raw() as u32),
                vld1q_u32(LANE_WEIGHTS.as_ptr()),
            )
        }
    }

    #[inline(always)]
    fn lane_bits(cmp: uint32x4_t) -> LaneBits {
        let bits = unsafe { vaddvq_u32(vandq_u32(cmp, vld1q_u32(LANE_WEIGHTS.as_ptr()))) };
        LaneBits::from_raw(bits as u128)
    }

    #[inline(always)]
    fn select(cmp: uint32x4_t, if_set: Self, if_clear: Self) -> Self {
        Self::from_register(unsafe { vbslq_f32(cmp, if_set.elements, if_clear.elements) })
    }

    #[inline(always)]
    fn map_lanes(self, f: impl Fn(f32) -> f32) -> Self {
        Self::from_array(self.to_array().map(f))
    }
}

impl Primitive for F32x4 {
    type Scalar = f32;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self::from_register(unsafe { vdupq_n_f32(value) })
    }

    #[inline(always)]
    fn extract(self, lane: usize) -> f32 {
        debug_assert!(lane < LANE_COUNT, "lane {lane} out of range for {LANE_COUNT} lanes");
        self.to_array()[lane]
    }

    #[inline(always)]
    fn insert(&mut self, lane: usize, value: f32) {
        debug_assert!(lane < LANE_COUNT, "lane {lane} out of range for {LANE_COUNT} lanes");
        let mut lanes = self.to_array();
        lanes[lane] = value;
        *self = Self::from_array(lanes);
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self::from_register(vld1q_f32(ptr))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert_eq!(ptr as usize % NEON_ALIGNMENT, 0, "unaligned load");
        Self::from_register(vld1q_f32(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        vst1q_f32(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        debug_assert_eq!(ptr as usize % NEON_ALIGNMENT, 0, "unaligned store");
        vst1q_f32(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: LaneBits, ptr: *const f32) -> Self {
        self.gather_stride_masked(mask, ptr, 1)
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: LaneBits, ptr: *mut f32) {
        self.scatter_stride_masked(mask, ptr, 1)
    }

    #[inline(always)]
    unsafe fn gather_stride_masked(self, mask: LaneBits, base: *const f32, stride: usize) -> Self {
        let mut lanes = self.to_array();
        for (lane, value) in lanes.iter_mut().enumerate() {
            if mask.test(lane) {
                *value = *base.wrapping_add(lane * stride);
            }
        }
        Self::from_array(lanes)
    }

    #[inline(always)]
    unsafe fn gather_indices_masked(self, mask: LaneBits, base: *const f32, indices: &[u32]) -> Self {
        debug_assert_eq!(indices.len(), LANE_COUNT);
        let mut lanes = self.to_array();
        for (lane, value) in lanes.iter_mut().enumerate() {
            if mask.test(lane) {
                *value = *base.add(indices[lane] as usize);
            }
        }
        Self::from_array(lanes)
    }

    #[inline(always)]
    unsafe fn scatter_stride_masked(self, mask: LaneBits, base: *mut f32, stride: usize) {
        for (lane, value) in self.to_array().into_iter().enumerate() {
            if mask.test(lane) {
                *base.wrapping_add(lane * stride) = value;
            }
        }
    }

    #[inline(always)]
    unsafe fn scatter_indices_masked(self, mask: LaneBits, base: *mut f32, indices: &[u32]) {
        debug_assert_eq!(indices.len(), LANE_COUNT);
        for (lane, value) in self.to_array().into_iter().enumerate() {
            if mask.test(lane) {
                *base.add(indices[lane] as usize) = value;
            }
        }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::from_register(unsafe { vaddq_f32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::from_register(unsafe { vsubq_f32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::from_register(unsafe { vmulq_f32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self::from_register(unsafe { vdivq_f32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn sadd(self, rhs: Self) -> Self {
        self.add(rhs)
    }

    #[inline(always)]
    fn ssub(self, rhs: Self) -> Self {
        self.sub(rhs)
    }

    /// `vminq_f32` propagates NaN from either side; compare and select keeps
    /// the second operand unless `self < rhs`.
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self::select(unsafe { vcltq_f32(self.elements, rhs.elements) }, self, rhs)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self::select(unsafe { vcgtq_f32(self.elements, rhs.elements) }, self, rhs)
    }

    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_register(unsafe { vnegq_f32(self.elements) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self::from_register(unsafe { vabsq_f32(self.elements) })
    }

    #[inline(always)]
    fn fmuladd(self, b: Self, c: Self) -> Self {
        Self::from_register(unsafe { vfmaq_f32(c.elements, self.elements, b.elements) })
    }

    /// `a * b + (-c)`, fused. An exact cancellation gives `+0.0`.
    #[inline(always)]
    fn fmulsub(self, b: Self, c: Self) -> Self {
        Self::from_register(unsafe { vfmaq_f32(vnegq_f32(c.elements), self.elements, b.elements) })
    }

    #[inline(always)]
    fn cmpeq(self, rhs: Self) -> LaneBits {
        Self::lane_bits(unsafe { vceqq_f32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn cmpne(self, rhs: Self) -> LaneBits {
        Self::lane_bits(unsafe { vmvnq_u32(vceqq_f32(self.elements, rhs.elements)) })
    }

    #[inline(always)]
    fn cmpgt(self, rhs: Self) -> LaneBits {
        Self::lane_bits(unsafe { vcgtq_f32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn cmplt(self, rhs: Self) -> LaneBits {
        Self::lane_bits(unsafe { vcltq_f32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn cmpge(self, rhs: Self) -> LaneBits {
        Self::lane_bits(unsafe { vcgeq_f32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn cmple(self, rhs: Self) -> LaneBits {
        Self::lane_bits(unsafe { vcleq_f32(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn blend(self, mask: LaneBits, rhs: Self) -> Self {
        Self::select(Self::lane_mask(mask), rhs, self)
    }

    #[inline(always)]
    fn hadd(self) -> f32 {
        fold_tree(&self.to_array(), &f32::scalar_add)
    }

    #[inline(always)]
    fn hmul(self) -> f32 {
        fold_tree(&self.to_array(), &f32::scalar_mul)
    }

    #[inline(always)]
    fn hmax(self) -> f32 {
        fold_tree(&self.to_array(), &f32::scalar_max)
    }

    #[inline(always)]
    fn hmin(self) -> f32 {
        fold_tree(&self.to_array(), &f32::scalar_min)
    }

    #[inline(always)]
    fn imax(self) -> (usize, f32) {
        let lanes = self.to_array();
        select_tree(&lanes, LaneBits::all(LANE_COUNT), &greater).unwrap_or((0, lanes[0]))
    }

    #[inline(always)]
    fn imin(self) -> (usize, f32) {
        let lanes = self.to_array();
        select_tree(&lanes, LaneBits::all(LANE_COUNT), &less).unwrap_or((0, lanes[0]))
    }

    #[inline(always)]
    fn imax_masked(self, mask: LaneBits) -> Option<(usize, f32)> {
        select_tree(&self.to_array(), mask, &greater)
    }

    #[inline(always)]
    fn imin_masked(self, mask: LaneBits) -> Option<(usize, f32)> {
        select_tree(&self.to_array(), mask, &less)
    }
}

impl FloatPrimitive for F32x4 {
    #[inline(always)]
    fn sqrt(self) -> Self {
        Self::from_register(unsafe { vsqrtq_f32(self.elements) })
    }

    #[inline(always)]
    fn floor(self) -> Self {
        Self::from_register(unsafe { vrndmq_f32(self.elements) })
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        Self::from_register(unsafe { vrndpq_f32(self.elements) })
    }

    #[inline(always)]
    fn round(self) -> Self {
        Self::from_register(unsafe { vrndnq_f32(self.elements) })
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        Self::from_register(unsafe { vrndq_f32(self.elements) })
    }

    #[inline(always)]
    fn exp(self) -> Self {
        self.map_lanes(f32::scalar_exp)
    }

    #[inline(always)]
    fn log(self) -> Self {
        self.map_lanes(f32::scalar_log)
    }

    #[inline(always)]
    fn sin(self) -> Self {
        self.map_lanes(f32::scalar_sin)
    }

    #[inline(always)]
    fn cos(self) -> Self {
        self.map_lanes(f32::scalar_cos)
    }

    #[inline(always)]
    fn isfin(self) -> LaneBits {
        self.abs().cmplt(Self::splat(f32::INFINITY))
    }

    #[inline(always)]
    fn isinf(self) -> LaneBits {
        self.abs().cmpeq(Self::splat(f32::INFINITY))
    }

    #[inline(always)]
    fn isnan(self) -> LaneBits {
        self.cmpne(self)
    }

    #[inline(always)]
    fn isnormal(self) -> LaneBits {
        let magnitude = self.abs();
        magnitude
            .cmpge(Self::splat(f32::MIN_POSITIVE))
            .and(magnitude.cmplt(Self::splat(f32::INFINITY)))
    }

    #[inline(always)]
    fn issubnormal(self) -> LaneBits {
        let magnitude = self.abs();
        magnitude
            .cmplt(Self::splat(f32::MIN_POSITIVE))
            .and(magnitude.cmpgt(Self::zero()))
    }

    #[inline(always)]
    fn iszero(self) -> LaneBits {
        self.cmpeq(Self::zero())
    }
}
