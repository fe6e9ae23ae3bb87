//! ARM NEON primitives for 128-bit registers.
//!
//! Compiled when the build script selects the `neon` backend, which it does for
//! every AArch64 target: Advanced SIMD is mandatory there, from Apple Silicon to
//! AWS Graviton.
//!
//! # Available Types
//!
//! - [`f32x4::F32x4`]: 4 packed single-precision lanes, the native backing of
//!   `Vector<f32, 4>`.

pub mod f32x4;
