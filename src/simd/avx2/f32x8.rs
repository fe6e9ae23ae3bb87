//! AVX2 8-lane f32 primitive.
//!
//! `F32x8` wraps a `__m256` register and backs `Vector<f32, 8>` (and, through
//! composition, every wider f32 vector) when the build enables the `avx2`
//! backend. Arithmetic, comparisons, rounding and fused multiply-add map to
//! single AVX2/FMA instructions. Predicates are materialized with `movemask`
//! and expanded back to lane masks for `blendv`, `maskload` and `maskstore`.
//!
//! Every register operation goes through a function in [`kernels`] compiled
//! with `#[target_feature(enable = "avx,avx2,fma")]`, so its body lowers to
//! the instructions themselves. When the crate is built with those features
//! enabled globally (`-C target-cpu=native` or
//! `-C target-feature=+avx2,+fma`) the kernels inline into their callers.
//!
//! The transcendental functions are evaluated per lane with the scalar
//! reference, and reductions fold in the shared pairwise order, so results
//! match the scalar-emulation backend bit for bit.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::element::{Element, FloatElement};
use crate::mask::LaneBits;
use crate::simd::traits::{fold_tree, greater, less, select_tree, FloatPrimitive, Primitive};

/// Alignment required by `_mm256_load_ps` and `_mm256_store_ps`.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// Number of f32 lanes in a 256-bit register.
pub(crate) const LANE_COUNT: usize = 8;

/// Register-level operations on `__m256`.
///
/// # Safety
///
/// Every function requires a CPU with AVX, AVX2 and FMA. The build script
/// only compiles this module when the host reports all three.
mod kernels {
    #[cfg(target_arch = "x86")]
    use std::arch::x86::*;

    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::*;

    macro_rules! unary_kernels {
        ($($name:ident => $intrinsic:ident),* $(,)?) => {$(
            #[inline]
            #[target_feature(enable = "avx,avx2,fma")]
            pub(super) unsafe fn $name(a: __m256) -> __m256 {
                $intrinsic(a)
            }
        )*};
    }

    macro_rules! binary_kernels {
        ($($name:ident => $intrinsic:ident),* $(,)?) => {$(
            #[inline]
            #[target_feature(enable = "avx,avx2,fma")]
            pub(super) unsafe fn $name(a: __m256, b: __m256) -> __m256 {
                $intrinsic(a, b)
            }
        )*};
    }

    macro_rules! fused_kernels {
        ($($name:ident => $intrinsic:ident),* $(,)?) => {$(
            #[inline]
            #[target_feature(enable = "avx,avx2,fma")]
            pub(super) unsafe fn $name(a: __m256, b: __m256, c: __m256) -> __m256 {
                $intrinsic(a, b, c)
            }
        )*};
    }

    unary_kernels! {
        sqrt => _mm256_sqrt_ps,
        floor => _mm256_floor_ps,
        ceil => _mm256_ceil_ps,
    }

    binary_kernels! {
        add => _mm256_add_ps,
        sub => _mm256_sub_ps,
        mul => _mm256_mul_ps,
        div => _mm256_div_ps,
        min => _mm256_min_ps,
        max => _mm256_max_ps,
    }

    fused_kernels! {
        fmadd => _mm256_fmadd_ps,
        fmsub => _mm256_fmsub_ps,
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn splat(value: f32) -> __m256 {
        _mm256_set1_ps(value)
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn zero() -> __m256 {
        _mm256_setzero_ps()
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn loadu(ptr: *const f32) -> __m256 {
        _mm256_loadu_ps(ptr)
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn load(ptr: *const f32) -> __m256 {
        _mm256_load_ps(ptr)
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn storeu(ptr: *mut f32, a: __m256) {
        _mm256_storeu_ps(ptr, a)
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn store(ptr: *mut f32, a: __m256) {
        _mm256_store_ps(ptr, a)
    }

    /// Lane `i` all ones when bit `i` of `bits` is set.
    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn lane_mask(bits: i32) -> __m256i {
        let bits = _mm256_set1_epi32(bits);
        let lanes = _mm256_setr_epi32(1, 2, 4, 8, 16, 32, 64, 128);
        _mm256_cmpeq_epi32(_mm256_and_si256(bits, lanes), lanes)
    }

    /// Compare, then pack the sign bit of every lane.
    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn compare<const PREDICATE: i32>(a: __m256, b: __m256) -> i32 {
        _mm256_movemask_ps(_mm256_cmp_ps::<PREDICATE>(a, b))
    }

    /// `b` where bit `i` of `bits` is set, `a` elsewhere.
    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn blend(a: __m256, b: __m256, bits: i32) -> __m256 {
        _mm256_blendv_ps(a, b, _mm256_castsi256_ps(lane_mask(bits)))
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn load_masked(a: __m256, bits: i32, ptr: *const f32) -> __m256 {
        let lanes = lane_mask(bits);
        let loaded = _mm256_maskload_ps(ptr, lanes);
        _mm256_blendv_ps(a, loaded, _mm256_castsi256_ps(lanes))
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn store_masked(a: __m256, bits: i32, ptr: *mut f32) {
        _mm256_maskstore_ps(ptr, lane_mask(bits), a)
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn neg(a: __m256) -> __m256 {
        _mm256_xor_ps(a, _mm256_set1_ps(-0.0))
    }

    /// Clears the sign bit.
    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn magnitude(a: __m256) -> __m256 {
        _mm256_andnot_ps(_mm256_set1_ps(-0.0), a)
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn round(a: __m256) -> __m256 {
        _mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(a)
    }

    #[inline]
    #[target_feature(enable = "avx,avx2,fma")]
    pub(super) unsafe fn trunc(a: __m256) -> __m256 {
        _mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(a)
    }
}

/// AVX2 register holding 8 packed f32 values.
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    elements: __m256,
}

impl F32x8 {
    #[inline(always)]
    fn from_register(elements: __m256) -> Self {
        Self { elements }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; LANE_COUNT] {
        let mut lanes = [0.0f32; LANE_COUNT];
        unsafe { kernels::storeu(lanes.as_mut_ptr(), self.elements) };
        lanes
    }

    #[inline(always)]
    fn from_array(lanes: [f32; LANE_COUNT]) -> Self {
        Self::from_register(unsafe { kernels::loadu(lanes.as_ptr()) })
    }

    /// The low eight bits of `mask` in the form the kernels take.
    #[inline(always)]
    fn mask_bits(mask: LaneBits) -> i32 {
        mask.low(LANE_COUNT).raw() as i32
    }

    #[inline(always)]
    fn compare<const PREDICATE: i32>(self, rhs: Self) -> LaneBits {
        let bits = unsafe { kernels::compare::<PREDICATE>(self.elements, rhs.elements) };
        LaneBits::from_raw(bits as u32 as u128)
    }

    #[inline(always)]
    fn map_lanes(self, f: impl Fn(f32) -> f32) -> Self {
        Self::from_array(self.to_array().map(f))
    }

    #[inline(always)]
    fn magnitude(self) -> Self {
        Self::from_register(unsafe { kernels::magnitude(self.elements) })
    }

    /// Whether `ptr` satisfies [`AVX_ALIGNMENT`].
    #[inline(always)]
    pub(crate) fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % AVX_ALIGNMENT == 0
    }
}

impl Primitive for F32x8 {
    type Scalar = f32;

    const LANES: usize = LANE_COUNT;

    /// Broadcasts `value` with `vbroadcastss`.
    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self::from_register(unsafe { kernels::splat(value) })
    }

    #[inline(always)]
    fn zero() -> Self {
        Self::from_register(unsafe { kernels::zero() })
    }

    /// Goes through memory; lane access is not on the hot path.
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

    /// Unaligned load of 8 lanes.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading 8 f32 values.
    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self::from_register(kernels::loadu(ptr))
    }

    /// Aligned load of 8 lanes.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading 8 f32 values and aligned to
    /// [`AVX_ALIGNMENT`] bytes; a misaligned pointer faults.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert!(Self::is_aligned(ptr), "pointer must be {AVX_ALIGNMENT}-byte aligned");
        Self::from_register(kernels::load(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        kernels::storeu(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        debug_assert!(Self::is_aligned(ptr), "pointer must be {AVX_ALIGNMENT}-byte aligned");
        kernels::store(ptr, self.elements)
    }

    /// `vmaskmovps`: unselected lanes are neither read nor faulted on.
    #[inline(always)]
    unsafe fn load_masked(self, mask: LaneBits, ptr: *const f32) -> Self {
        Self::from_register(kernels::load_masked(self.elements, Self::mask_bits(mask), ptr))
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: LaneBits, ptr: *mut f32) {
        kernels::store_masked(self.elements, Self::mask_bits(mask), ptr)
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
        Self::from_register(unsafe { kernels::add(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::from_register(unsafe { kernels::sub(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::from_register(unsafe { kernels::mul(self.elements, rhs.elements) })
    }

    /// IEEE division; a zero divisor gives a signed infinity or NaN.
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self::from_register(unsafe { kernels::div(self.elements, rhs.elements) })
    }

    /// Floats do not saturate; same as [`Primitive::add`].
    #[inline(always)]
    fn sadd(self, rhs: Self) -> Self {
        self.add(rhs)
    }

    /// Floats do not saturate; same as [`Primitive::sub`].
    #[inline(always)]
    fn ssub(self, rhs: Self) -> Self {
        self.sub(rhs)
    }

    /// `minps` returns the second operand unless `self < rhs`.
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self::from_register(unsafe { kernels::min(self.elements, rhs.elements) })
    }

    /// `maxps` returns the second operand unless `self > rhs`.
    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self::from_register(unsafe { kernels::max(self.elements, rhs.elements) })
    }

    /// Flips the sign bit.
    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_register(unsafe { kernels::neg(self.elements) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.magnitude()
    }

    /// `vfmadd`: `self * b + c` with one rounding.
    #[inline(always)]
    fn fmuladd(self, b: Self, c: Self) -> Self {
        Self::from_register(unsafe { kernels::fmadd(self.elements, b.elements, c.elements) })
    }

    /// `vfmsub`: `self * b - c` with one rounding.
    #[inline(always)]
    fn fmulsub(self, b: Self, c: Self) -> Self {
        Self::from_register(unsafe { kernels::fmsub(self.elements, b.elements, c.elements) })
    }

    #[inline(always)]
    fn cmpeq(self, rhs: Self) -> LaneBits {
        self.compare::<_CMP_EQ_OQ>(rhs)
    }

    /// Unordered: NaN lanes compare not-equal.
    #[inline(always)]
    fn cmpne(self, rhs: Self) -> LaneBits {
        self.compare::<_CMP_NEQ_UQ>(rhs)
    }

    #[inline(always)]
    fn cmpgt(self, rhs: Self) -> LaneBits {
        self.compare::<_CMP_GT_OQ>(rhs)
    }

    #[inline(always)]
    fn cmplt(self, rhs: Self) -> LaneBits {
        self.compare::<_CMP_LT_OQ>(rhs)
    }

    #[inline(always)]
    fn cmpge(self, rhs: Self) -> LaneBits {
        self.compare::<_CMP_GE_OQ>(rhs)
    }

    #[inline(always)]
    fn cmple(self, rhs: Self) -> LaneBits {
        self.compare::<_CMP_LE_OQ>(rhs)
    }

    #[inline(always)]
    fn blend(self, mask: LaneBits, rhs: Self) -> Self {
        Self::from_register(unsafe {
            kernels::blend(self.elements, rhs.elements, Self::mask_bits(mask))
        })
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

impl FloatPrimitive for F32x8 {
    #[inline(always)]
    fn sqrt(self) -> Self {
        Self::from_register(unsafe { kernels::sqrt(self.elements) })
    }

    #[inline(always)]
    fn floor(self) -> Self {
        Self::from_register(unsafe { kernels::floor(self.elements) })
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        Self::from_register(unsafe { kernels::ceil(self.elements) })
    }

    /// Ties to even, the default SSE/AVX rounding mode.
    #[inline(always)]
    fn round(self) -> Self {
        Self::from_register(unsafe { kernels::round(self.elements) })
    }

    #[inline(always)]
    fn trunc(self) -> Self {
        Self::from_register(unsafe { kernels::trunc(self.elements) })
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
        self.magnitude().cmplt(Self::splat(f32::INFINITY))
    }

    #[inline(always)]
    fn isinf(self) -> LaneBits {
        self.magnitude().cmpeq(Self::splat(f32::INFINITY))
    }

    #[inline(always)]
    fn isnan(self) -> LaneBits {
        self.compare::<_CMP_UNORD_Q>(self)
    }

    #[inline(always)]
    fn isnormal(self) -> LaneBits {
        let magnitude = self.magnitude();
        magnitude
            .cmpge(Self::splat(f32::MIN_POSITIVE))
            .and(magnitude.cmplt(Self::splat(f32::INFINITY)))
    }

    #[inline(always)]
    fn issubnormal(self) -> LaneBits {
        let magnitude = self.magnitude();
        magnitude
            .cmplt(Self::splat(f32::MIN_POSITIVE))
            .and(magnitude.compare::<_CMP_NEQ_OQ>(Self::zero()))
    }

    #[inline(always)]
    fn iszero(self) -> LaneBits {
        self.cmpeq(Self::zero())
    }
}
