//! Fixed-width vector types with one API over every backing.
//!
//! [`Vector<T, N>`] holds `N` lanes of a primitive number type `T`. Behind it
//! sits whichever primitive the binding table picks for `(T, N)`:
//!
//! - a native register (`f32 x 8` on AVX2, `f32 x 4` on NEON),
//! - a one-lane scalar emulation for `N == 1`,
//! - or a composite of two `N / 2` vectors, recursively.
//!
//! All three give the same results, down to the bit for reductions, so code
//! written against `Vector` is portable between targets.
//!
//! ```rust
//! use lanewise::Vector;
//!
//! let a = Vector::<f32, 8>::splat(4.0);
//! let b = Vector::<f32, 8>::splat(5.0);
//! assert_eq!((a + b).to_array(), [9.0; 8]);
//! ```

pub mod convert;
pub mod element;
pub mod error;
pub mod mask;
pub mod ops;
pub mod simd;
pub mod slice;
pub mod vector;

pub use convert::{Degrade, Promote, Reinterpret, ToFloat, ToInt};
pub use element::{Element, FloatElement, IntElement, ScalarKind};
pub use error::{LanewiseError, Result};
pub use mask::{LaneBits, Mask};
pub use ops::{scalar_eq, scalar_ge, scalar_gt, scalar_le, scalar_lt, scalar_ne};
pub use simd::lanes::{Backing, LaneBacking, LaneCount, SupportedLaneCount};
pub use simd::{active_backend, Backend, FloatPrimitive, IntPrimitive, Primitive};
pub use vector::{Pack, Vector};
