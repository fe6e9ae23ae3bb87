//! AVX2 primitives for 256-bit registers.
//!
//! Compiled when the build script selects the `avx2` backend: the host
//! advertises both `avx2` and `fma` and the target is `x86_64`. AVX2 is
//! available on Intel processors since Haswell (2013) and AMD processors since
//! Excavator (2015).
//!
//! # Available Types
//!
//! - [`f32x8::F32x8`]: 8 packed single-precision lanes, the native backing of
//!   `Vector<f32, 8>`.

pub mod f32x8;
