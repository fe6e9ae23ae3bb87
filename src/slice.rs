//! Slice kernels built on [`Vector`].
//!
//! Every kernel walks its input in complete `N`-lane blocks and finishes with
//! one masked partial block, so no element past the end of a slice is read or
//! written. The `par_*` variants split the output into lane-aligned chunks
//! and hand them to rayon once the input is large enough to pay for it.
//!
//! ```rust
//! use lanewise::{slice, Vector};
//!
//! let a: Vec<f32> = (0..1000).map(|i| i as f32).collect();
//! let b: Vec<f32> = (0..1000).map(|i| (i * 2) as f32).collect();
//!
//! let c = slice::zip_map::<f32, 8, _>(&a, &b, |x, y| x + y).unwrap();
//! assert_eq!(c[999], 2997.0);
//! ```

use rayon::prelude::*;

use crate::element::Element;
use crate::error::{validation_error, Result};
use crate::simd::lanes::{LaneCount, SupportedLaneCount};
use crate::vector::Vector;

/// Inputs at or below this many elements never go parallel.
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Target number of elements handed to one rayon task.
pub const PARALLEL_CHUNK_SIZE: usize = 1 << 14;

// ================================================================================================
// SEQUENTIAL KERNELS
// ================================================================================================

/// Applies `f` to `a` block by block.
pub fn map<T, const N: usize, F>(a: &[T], f: F) -> Vec<T>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
    F: Fn(Vector<T, N>) -> Vector<T, N>,
{
    let mut out = vec![T::zero(); a.len()];
    map_block(a, &mut out, &f);
    out
}

/// Applies `f` to matching blocks of `a` and `b`.
///
/// # Errors
///
/// Returns a validation error when the slices differ in length.
pub fn zip_map<T, const N: usize, F>(a: &[T], b: &[T], f: F) -> Result<Vec<T>>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
    F: Fn(Vector<T, N>, Vector<T, N>) -> Vector<T, N>,
{
    check_lengths(a, b)?;

    let mut out = vec![T::zero(); a.len()];
    zip_map_block(a, b, &mut out, &f);
    Ok(out)
}

/// Sum of `a`, accumulated lane-wise and reduced once at the end.
///
/// The summation order differs from a sequential loop, so float results can
/// differ from `iter().sum()` in the last bits.
pub fn reduce_add<T, const N: usize>(a: &[T]) -> T
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    let mut blocks = a.chunks_exact(N);
    let mut acc = Vector::<T, N>::zero();

    for block in blocks.by_ref() {
        acc = acc.add(unsafe { Vector::load(block.as_ptr()) });
    }

    // zero-filled lanes are the identity of addition
    acc.add(Vector::load_prefix(blocks.remainder())).hadd()
}

fn map_block<T, const N: usize, F>(a: &[T], out: &mut [T], f: &F)
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
    F: Fn(Vector<T, N>) -> Vector<T, N>,
{
    debug_assert_eq!(a.len(), out.len());

    let mut src = a.chunks_exact(N);
    let mut dst = out.chunks_exact_mut(N);

    for (block, target) in src.by_ref().zip(dst.by_ref()) {
        unsafe { f(Vector::load(block.as_ptr())).store(target.as_mut_ptr()) };
    }

    let tail = src.remainder();
    if !tail.is_empty() {
        f(Vector::load_prefix(tail)).store_prefix(dst.into_remainder());
    }
}

fn zip_map_block<T, const N: usize, F>(a: &[T], b: &[T], out: &mut [T], f: &F)
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
    F: Fn(Vector<T, N>, Vector<T, N>) -> Vector<T, N>,
{
    debug_assert_eq!(a.len(), out.len());
    debug_assert_eq!(b.len(), out.len());

    let mut lhs = a.chunks_exact(N);
    let mut rhs = b.chunks_exact(N);
    let mut dst = out.chunks_exact_mut(N);

    for ((x, y), target) in lhs.by_ref().zip(rhs.by_ref()).zip(dst.by_ref()) {
        unsafe {
            f(Vector::load(x.as_ptr()), Vector::load(y.as_ptr())).store(target.as_mut_ptr())
        };
    }

    let (x, y) = (lhs.remainder(), rhs.remainder());
    if !x.is_empty() {
        f(Vector::load_prefix(x), Vector::load_prefix(y)).store_prefix(dst.into_remainder());
    }
}

// ================================================================================================
// PARALLEL KERNELS
// ================================================================================================

/// Parallel [`map`]. Falls back to [`map`] at or below [`PARALLEL_THRESHOLD`].
pub fn par_map<T, const N: usize, F>(a: &[T], f: F) -> Vec<T>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
    F: Fn(Vector<T, N>) -> Vector<T, N> + Sync,
{
    if a.len() <= PARALLEL_THRESHOLD {
        log::debug!("par_map: {} elements, running sequentially", a.len());
        return map(a, f);
    }

    let chunk_size = chunk_size(N);
    log::debug!(
        "par_map: {} elements in chunks of {chunk_size} ({N} lanes)",
        a.len()
    );

    let mut out = vec![T::zero(); a.len()];
    out.par_chunks_mut(chunk_size)
        .enumerate()
        .for_each(|(chunk_idx, out_chunk)| {
            let start = chunk_idx * chunk_size;
            let end = start + out_chunk.len();
            map_block(&a[start..end], out_chunk, &f);
        });

    out
}

/// Parallel [`zip_map`]. Falls back to [`zip_map`] at or below
/// [`PARALLEL_THRESHOLD`].
///
/// # Errors
///
/// Returns a validation error when the slices differ in length.
pub fn par_zip_map<T, const N: usize, F>(a: &[T], b: &[T], f: F) -> Result<Vec<T>>
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
    F: Fn(Vector<T, N>, Vector<T, N>) -> Vector<T, N> + Sync,
{
    check_lengths(a, b)?;

    if a.len() <= PARALLEL_THRESHOLD {
        log::debug!("par_zip_map: {} elements, running sequentially", a.len());
        return zip_map(a, b, f);
    }

    let chunk_size = chunk_size(N);
    log::debug!(
        "par_zip_map: {} elements in chunks of {chunk_size} ({N} lanes)",
        a.len()
    );

    let mut out = vec![T::zero(); a.len()];
    out.par_chunks_mut(chunk_size)
        .enumerate()
        .for_each(|(chunk_idx, out_chunk)| {
            let start = chunk_idx * chunk_size;
            let end = start + out_chunk.len();
            zip_map_block(&a[start..end], &b[start..end], out_chunk, &f);
        });

    Ok(out)
}

/// Parallel [`reduce_add`]. Each chunk is reduced independently, so the
/// float result depends on [`PARALLEL_CHUNK_SIZE`].
pub fn par_reduce_add<T, const N: usize>(a: &[T]) -> T
where
    T: Element,
    LaneCount<N>: SupportedLaneCount,
{
    if a.len() <= PARALLEL_THRESHOLD {
        return reduce_add::<T, N>(a);
    }

    a.par_chunks(chunk_size(N))
        .map(reduce_add::<T, N>)
        .reduce(T::zero, T::scalar_add)
}

// ================================================================================================
// HELPERS
// ================================================================================================

/// Chunk length rounded down to a whole number of blocks.
#[inline(always)]
fn chunk_size(lanes: usize) -> usize {
    ((PARALLEL_CHUNK_SIZE / lanes) * lanes).max(lanes)
}

fn check_lengths<T>(a: &[T], b: &[T]) -> Result<()> {
    if a.len() != b.len() {
        return Err(validation_error(format!(
            "input slices must have same length ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}
