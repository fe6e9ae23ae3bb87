//! Operator overloads on both sides of a vector.

use lanewise::{Mask, Vector};

#[test]
fn test_vector_operators() {
    let a = Vector::<i32, 8>::from_fn(|i| i as i32);
    let b = Vector::<i32, 8>::splat(2);

    assert_eq!((a + b).to_array(), [2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!((a - b).to_array(), [-2, -1, 0, 1, 2, 3, 4, 5]);
    assert_eq!((a * 3).to_array(), [0, 3, 6, 9, 12, 15, 18, 21]);
    assert_eq!((a / b).to_array(), [0, 0, 1, 1, 2, 2, 3, 3]);
    assert_eq!((-a).extract(7), -7);
    assert_eq!((a & 1).to_array(), [0, 1, 0, 1, 0, 1, 0, 1]);
    assert_eq!((a | b).extract(0), 2);
    assert_eq!((a ^ a), Vector::zero());
    assert_eq!((!Vector::<u8, 4>::zero()).to_array(), [0xFF; 4]);
}

#[test]
fn test_assign_operators() {
    let mut v = Vector::<f64, 2>::splat(1.0);
    v += Vector::splat(2.0);
    v *= 4.0;
    v -= 2.0;
    v /= Vector::from_array([2.0, 5.0]);
    assert_eq!(v.to_array(), [5.0, 2.0]);

    let mut bits = Vector::<u32, 4>::splat(0b1100);
    bits &= 0b0110;
    bits |= Vector::splat(1);
    bits ^= 0b1111;
    bits <<= 2;
    bits >>= Vector::from_array([0, 1, 2, 3]);
    assert_eq!(bits.to_array(), [40, 20, 10, 5]);
}

#[test]
fn test_shift_semantics() {
    let signed = Vector::<i32, 4>::splat(-16);
    assert_eq!((signed >> 2).to_array(), [-4; 4]);
    assert_eq!((signed << 1).to_array(), [-32; 4]);

    let unsigned = Vector::<u32, 4>::splat(0x8000_0000);
    assert_eq!((unsigned >> 31).to_array(), [1; 4]);

    // amounts wrap modulo the bit width
    assert_eq!(Vector::<u8, 4>::splat(1).shl_scalar(9).to_array(), [2; 4]);

    let amounts = Vector::<u16, 4>::from_array([0, 1, 2, 3]);
    let mask = Mask::from_array([true, true, false, false]);
    let v = Vector::<i16, 4>::splat(8);
    assert_eq!(v.shr_masked(mask, amounts).to_array(), [8, 4, 8, 8]);
    assert_eq!(v.shl_scalar_masked(mask, 1).to_array(), [16, 16, 8, 8]);
}

#[test]
fn test_scalar_left_operators() {
    let v = Vector::<f32, 8>::splat(4.0);
    assert_eq!((1.0 + v).to_array(), [5.0; 8]);
    assert_eq!((1.0 - v).to_array(), [-3.0; 8]);
    assert_eq!((2.0 * v).to_array(), [8.0; 8]);
    assert_eq!((1.0 / v).to_array(), [0.25; 8]);

    let i = Vector::<i32, 4>::from_array([1, 2, 3, 4]);
    assert_eq!((10 - i).to_array(), [9, 8, 7, 6]);
    assert_eq!((12 / i).to_array(), [12, 6, 4, 3]);
    assert_eq!((6 ^ i).to_array(), [7, 4, 5, 2]);

    let shifted: Vector<u32, 4> = 1i32 << i;
    assert_eq!(shifted.to_array(), [2, 4, 8, 16]);
    let shifted: Vector<u32, 4> = -1i32 >> i;
    assert_eq!(shifted.to_array(), [u32::MAX >> 1, u32::MAX >> 2, u32::MAX >> 3, u32::MAX >> 4]);
}

#[test]
fn test_bitwise_reductions_and_not() {
    let v = Vector::<u8, 8>::from_array([0xF0, 0x0F, 0xFF, 0x00, 0x11, 0x22, 0x44, 0x88]);
    assert_eq!(v.bnot().extract(0), 0x0F);
    assert_eq!(v.hbor(), 0xFF);
    assert_eq!(v.hband(), 0x00);
    assert_eq!(v.band_masked(Mask::first(1), Vector::splat(0x30)).extract(0), 0x30);
}
