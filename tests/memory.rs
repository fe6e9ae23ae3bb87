//! Loads, stores, masked memory access, gather and scatter.

use lanewise::{LanewiseError, Mask, Vector};

#[repr(C, align(64))]
struct Aligned<T>([T; 32]);

#[test]
fn test_aligned_roundtrip() {
    let src = Aligned(std::array::from_fn::<f32, 32, _>(|i| i as f32));
    let mut dst = Aligned([0.0f32; 32]);

    let v = Vector::<f32, 8>::try_load_aligned(&src.0[8..16]).unwrap();
    assert_eq!(v.to_array(), [8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);

    v.try_store_aligned(&mut dst.0[16..24]).unwrap();
    assert_eq!(&dst.0[16..24], &src.0[8..16]);
    assert!(dst.0[..16].iter().all(|&x| x == 0.0));
}

#[test]
fn test_misaligned_load_is_rejected() {
    let src = Aligned([0u64; 32]);
    let result = Vector::<u64, 4>::try_load_aligned(&src.0[1..5]);
    assert!(matches!(
        result,
        Err(LanewiseError::Misaligned { alignment: 32, .. })
    ));
}

#[test]
fn test_wrong_length_is_rejected() {
    let data = [1i32; 5];
    assert_eq!(
        Vector::<i32, 4>::try_from_slice(&data),
        Err(lanewise::error::lane_count_error(4, 5))
    );

    let mut out = [0i32; 3];
    assert!(Vector::<i32, 4>::splat(1).try_copy_to_slice(&mut out).is_err());
}

#[test]
fn test_masked_load_does_not_touch_clear_lanes() {
    let data = [10u32, 20, 30];
    let base = Vector::<u32, 4>::splat(7);

    // lane 3 would read past the end of `data`
    let v = unsafe { base.load_masked(Mask::first(3), data.as_ptr()) };
    assert_eq!(v.to_array(), [10, 20, 30, 7]);

    let v = Vector::<u32, 4>::load_prefix(&data);
    assert_eq!(v.to_array(), [10, 20, 30, 0]);
}

#[test]
fn test_masked_store_does_not_touch_clear_lanes() {
    let mut out = [0.0f32; 6];
    let v = Vector::<f32, 8>::splat(1.5);

    assert_eq!(v.store_prefix(&mut out), 6);
    assert_eq!(out, [1.5; 6]);

    let mut out = [0.0f32; 8];
    let mask = Mask::from_array([false, true, false, true, false, true, false, true]);
    unsafe { v.store_masked(mask, out.as_mut_ptr()) };
    assert_eq!(out, [0.0, 1.5, 0.0, 1.5, 0.0, 1.5, 0.0, 1.5]);
}

#[test]
fn test_gather_stride() {
    let data: Vec<i16> = (0..64).collect();

    let v = unsafe { Vector::<i16, 8>::gather_stride(data.as_ptr(), 3) };
    assert_eq!(v.to_array(), [0, 3, 6, 9, 12, 15, 18, 21]);

    // stride 0 broadcasts one element
    let v = unsafe { Vector::<i16, 8>::gather_stride(data.as_ptr().add(5), 0) };
    assert_eq!(v, Vector::splat(5));

    let v = unsafe {
        Vector::<i16, 8>::splat(-1).gather_stride_masked(Mask::first(2), data.as_ptr(), 10)
    };
    assert_eq!(v.to_array(), [0, 10, -1, -1, -1, -1, -1, -1]);
}

#[test]
fn test_gather_indices() {
    let table: Vec<f64> = (0..100).map(|i| i as f64 * 0.5).collect();
    let indices = [99u32, 0, 42, 7];

    let v = unsafe { Vector::<f64, 4>::gather(table.as_ptr(), &indices) };
    assert_eq!(v.to_array(), [49.5, 0.0, 21.0, 3.5]);

    let index_vector = Vector::<u32, 4>::from_array(indices);
    let w = unsafe { Vector::<f64, 4>::gather_vector(table.as_ptr(), index_vector) };
    assert_eq!(v, w);

    // index 1000 is never dereferenced
    let masked = unsafe {
        Vector::<f64, 4>::zero().gather_masked(
            Mask::from_array([true, false, true, false]),
            table.as_ptr(),
            &[1, 1000, 2, 1000],
        )
    };
    assert_eq!(masked.to_array(), [0.5, 0.0, 1.0, 0.0]);
}

#[test]
fn test_f32x8_gather_indices() {
    let table: Vec<f32> = (0..32).map(|i| i as f32).collect();
    let indices = [31u32, 30, 1, 0, 16, 8, 4, 2];

    let v = unsafe { Vector::<f32, 8>::gather(table.as_ptr(), &indices) };
    assert_eq!(v.to_array(), indices.map(|i| i as f32));
}

#[test]
fn test_scatter() {
    let mut out = [0u8; 16];
    let v = Vector::<u8, 4>::from_array([1, 2, 3, 4]);

    unsafe { v.scatter_stride(out.as_mut_ptr(), 4) };
    assert_eq!(out, [1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0]);

    let mut out = [0u8; 4];
    unsafe { v.scatter(out.as_mut_ptr(), &[3, 2, 1, 0]) };
    assert_eq!(out, [4, 3, 2, 1]);

    let mut out = [0u8; 4];
    unsafe {
        v.scatter_vector_masked(
            Mask::from_array([false, true, false, true]),
            out.as_mut_ptr(),
            Vector::from_array([0, 0, 200, 3]),
        )
    };
    assert_eq!(out, [2, 0, 0, 4]);
}

#[test]
fn test_scatter_repeated_index_keeps_highest_lane() {
    let mut out = [0i32; 2];
    let v = Vector::<i32, 4>::from_array([1, 2, 3, 4]);
    unsafe { v.scatter(out.as_mut_ptr(), &[0, 1, 0, 1]) };
    assert_eq!(out, [3, 4]);
}
