//! Lane counts and the compile-time backend binding table.
//!
//! For every element type `T` and supported lane count `N`, exactly one
//! primitive type backs `Vector<T, N>`:
//!
//! - `N == 1` is the scalar-emulation primitive [`ScalarLane<T>`].
//! - A native primitive when the active build has one for `(T, N)`
//!   (`F32x8` with the `avx2` backend, `F32x4` with `neon`).
//! - Otherwise [`Composite`] of the `N / 2` backing, so widths above a native
//!   width are composed from it and widths without one bottom out in scalars.
//!
//! The choice is a function of the build configuration only.

use crate::element::Element;
use crate::simd::composite::Composite;
use crate::simd::scalar::ScalarLane;
use crate::simd::traits::Primitive;

/// Marker carrying a lane count at the type level.
pub struct LaneCount<const N: usize>;

mod sealed {
    pub trait Sealed {}
}

impl<const N: usize> sealed::Sealed for LaneCount<N> {}

/// Implemented for the lane counts `Vector` and `Mask` accept: the powers of
/// two from 1 to 128.
pub trait SupportedLaneCount: sealed::Sealed {
    /// Primitive backing an `N`-lane vector of `T`.
    type Backing<T: Element>: Primitive<Scalar = T>;
}

/// The per-element column of the binding table, one primitive per width.
pub trait LaneBacking: Sized {
    type W1: Primitive<Scalar = Self>;
    type W2: Primitive<Scalar = Self>;
    type W4: Primitive<Scalar = Self>;
    type W8: Primitive<Scalar = Self>;
    type W16: Primitive<Scalar = Self>;
    type W32: Primitive<Scalar = Self>;
    type W64: Primitive<Scalar = Self>;
    type W128: Primitive<Scalar = Self>;
}

/// Primitive backing `Vector<T, N>`.
pub type Backing<T, const N: usize> = <LaneCount<N> as SupportedLaneCount>::Backing<T>;

macro_rules! supported_lane_count {
    ($($lanes:literal => $width:ident),* $(,)?) => {$(
        impl SupportedLaneCount for LaneCount<$lanes> {
            type Backing<T: Element> = <T as LaneBacking>::$width;
        }
    )*};
}

supported_lane_count! {
    1 => W1,
    2 => W2,
    4 => W4,
    8 => W8,
    16 => W16,
    32 => W32,
    64 => W64,
    128 => W128,
}

macro_rules! lane_backing {
    ($t:ty) => {
        lane_backing!(
            $t,
            w4 = Composite<<$t as LaneBacking>::W2>,
            w8 = Composite<<$t as LaneBacking>::W4>
        );
    };
    ($t:ty, w4 = $w4:ty, w8 = $w8:ty) => {
        impl LaneBacking for $t {
            type W1 = ScalarLane<$t>;
            type W2 = Composite<<$t as LaneBacking>::W1>;
            type W4 = $w4;
            type W8 = $w8;
            type W16 = Composite<<$t as LaneBacking>::W8>;
            type W32 = Composite<<$t as LaneBacking>::W16>;
            type W64 = Composite<<$t as LaneBacking>::W32>;
            type W128 = Composite<<$t as LaneBacking>::W64>;
        }
    };
}

lane_backing!(u8);
lane_backing!(u16);
lane_backing!(u32);
lane_backing!(u64);
lane_backing!(i8);
lane_backing!(i16);
lane_backing!(i32);
lane_backing!(i64);
lane_backing!(f64);

#[cfg(all(neon, target_arch = "aarch64"))]
type F32Width4 = crate::simd::neon::f32x4::F32x4;

#[cfg(not(all(neon, target_arch = "aarch64")))]
type F32Width4 = Composite<<f32 as LaneBacking>::W2>;

#[cfg(all(avx2, target_arch = "x86_64"))]
type F32Width8 = crate::simd::avx2::f32x8::F32x8;

#[cfg(not(all(avx2, target_arch = "x86_64")))]
type F32Width8 = Composite<<f32 as LaneBacking>::W4>;

lane_backing!(f32, w4 = F32Width4, w8 = F32Width8);
