//! Half-width packing and the composite backing.

use lanewise::simd::composite::Composite;
use lanewise::simd::scalar::ScalarLane;
use lanewise::{Primitive, Vector};

#[test]
fn test_pack_unpack_laws() {
    let v = Vector::<u16, 16>::from_fn(|i| i as u16 * 3);
    let (lo, hi) = v.unpack();

    assert_eq!(lo.to_array(), std::array::from_fn(|i| i as u16 * 3));
    assert_eq!(hi.to_array(), std::array::from_fn(|i| (i + 8) as u16 * 3));
    assert_eq!(Vector::pack(lo, hi), v);
    assert_eq!(v.unpacklo(), lo);
    assert_eq!(v.unpackhi(), hi);
}

#[test]
fn test_packlo_packhi_replace_one_half() {
    let mut v = Vector::<f32, 8>::splat(1.0);

    v.packlo(Vector::splat(2.0));
    assert_eq!(v.to_array(), [2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0]);

    v.packhi(Vector::splat(3.0));
    assert_eq!(v.to_array(), [2.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0]);
}

#[test]
fn test_single_lane_vectors() {
    let v = Vector::<i64, 1>::splat(-5);
    assert_eq!(v.abs().to_array(), [5]);
    assert_eq!(v.hadd(), -5);
    assert_eq!(v.imax(), 0);

    let pair = Vector::<i64, 2>::pack(v, Vector::splat(9));
    assert_eq!(pair.to_array(), [-5, 9]);
}

#[test]
fn test_wide_vectors() {
    let v = Vector::<u8, 128>::from_fn(|i| i as u8);
    assert_eq!(v.hadd_seeded(0u8), (0..128u32).sum::<u32>() as u8);
    assert_eq!(v.hmax(), 127);
    assert_eq!(v.cmpge_scalar(64).count(), 64);

    let (lo, hi) = v.unpack();
    assert_eq!(hi.sub(lo), Vector::splat(64));
}

#[test]
fn test_composite_primitive_directly() {
    type Quad = Composite<Composite<ScalarLane<i32>>>;

    let lo = Composite::pack(ScalarLane(1), ScalarLane(2));
    let hi = Composite::pack(ScalarLane(3), ScalarLane(4));
    let quad: Quad = Composite::pack(lo, hi);

    assert_eq!(<Quad as Primitive>::LANES, 4);
    assert_eq!(quad.extract(2), 3);
    assert_eq!(quad.hadd(), 10);
    assert_eq!(quad.unpackhi(), hi);

    let mut quad = quad;
    quad.packlo(hi);
    assert_eq!(quad.hadd(), 14);
}

#[test]
fn test_vector_wraps_backing_without_overhead() {
    assert_eq!(std::mem::size_of::<Vector<f32, 8>>(), 32);
    assert_eq!(std::mem::size_of::<Vector<u8, 64>>(), 64);
    assert_eq!(std::mem::size_of::<Vector<f64, 1>>(), 8);
}
