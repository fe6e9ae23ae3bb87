//! Backend primitives and the binding table that selects them.
//!
//! - [`traits`]: the primitive contract ([`Primitive`], [`IntPrimitive`],
//!   [`FloatPrimitive`]).
//! - [`scalar`]: one-lane scalar emulation, available everywhere.
//! - [`composite`]: two half-width primitives acting as one.
//! - `avx2` / `neon`: native f32 registers, compiled in when the build script
//!   selects them.
//! - [`lanes`]: which primitive backs which `(element, lane count)` pair.

#[cfg(all(avx2, target_arch = "x86_64"))]
pub mod avx2;

#[cfg(all(neon, target_arch = "aarch64"))]
pub mod neon;

pub mod composite;
pub mod lanes;
pub mod scalar;
pub mod traits;

use std::fmt;
use std::sync::Once;

pub use traits::{FloatPrimitive, IntPrimitive, Primitive};

/// Native instruction set the crate was built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// 256-bit AVX2 with FMA on x86_64; backs `Vector<f32, 8>`.
    Avx2,
    /// 128-bit Advanced SIMD on AArch64; backs `Vector<f32, 4>`.
    Neon,
    /// No native primitive; every vector is composed from scalar lanes.
    Fallback,
}

impl Backend {
    /// Lane count of the native f32 primitive, if there is one.
    pub const fn native_f32_lanes(self) -> Option<usize> {
        match self {
            Backend::Avx2 => Some(8),
            Backend::Neon => Some(4),
            Backend::Fallback => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
            Backend::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// The backend fixed by the build configuration.
///
/// The first call logs the selection at debug level.
pub fn active_backend() -> Backend {
    #[cfg(all(avx2, target_arch = "x86_64"))]
    let backend = Backend::Avx2;

    #[cfg(all(neon, target_arch = "aarch64"))]
    let backend = Backend::Neon;

    #[cfg(not(any(all(avx2, target_arch = "x86_64"), all(neon, target_arch = "aarch64"))))]
    let backend = Backend::Fallback;

    static REPORTED: Once = Once::new();
    REPORTED.call_once(|| {
        log::debug!(
            "lanewise backend: {backend} (native f32 lanes: {:?})",
            backend.native_f32_lanes()
        );
    });

    backend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_display() {
        assert_eq!(Backend::Avx2.to_string(), "avx2");
        assert_eq!(Backend::Fallback.to_string(), "fallback");
    }

    #[test]
    fn test_active_backend_is_stable() {
        assert_eq!(active_backend(), active_backend());
    }
}
