//! Horizontal reductions, their masked identities and seeded forms.

use lanewise::{Mask, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_integer_reductions_match_scalar() {
    let mut rng = StdRng::seed_from_u64(12345);

    for _ in 0..100 {
        let a: [i64; 8] = std::array::from_fn(|_| rng.random_range(-1000..=1000));
        let v = Vector::from_array(a);

        assert_eq!(v.hadd(), a.iter().sum::<i64>());
        assert_eq!(v.hmax(), *a.iter().max().unwrap());
        assert_eq!(v.hmin(), *a.iter().min().unwrap());
        assert_eq!(v.hmul(), a.iter().fold(1i64, |acc, x| acc.wrapping_mul(*x)));
        assert_eq!(v.hband(), a.iter().fold(-1i64, |acc, x| acc & x));
        assert_eq!(v.hbor(), a.iter().fold(0i64, |acc, x| acc | x));
        assert_eq!(v.hbxor(), a.iter().fold(0i64, |acc, x| acc ^ x));
    }
}

#[test]
fn test_masked_reductions_use_identity() {
    let v = Vector::<i32, 4>::from_array([5, -3, 8, 2]);
    let none = Mask::all_false();

    assert_eq!(v.hadd_masked(none), 0);
    assert_eq!(v.hmul_masked(none), 1);
    assert_eq!(v.hmax_masked(none), i32::MIN);
    assert_eq!(v.hmin_masked(none), i32::MAX);
    assert_eq!(v.hband_masked(none), -1);
    assert_eq!(v.hbor_masked(none), 0);
    assert_eq!(v.hbxor_masked(none), 0);

    let mask = Mask::from_array([true, false, false, true]);
    assert_eq!(v.hadd_masked(mask), 7);
    assert_eq!(v.hmul_masked(mask), 10);
    assert_eq!(v.hmax_masked(mask), 5);
    assert_eq!(v.hmin_masked(mask), 2);
}

#[test]
fn test_float_max_identity_is_infinite() {
    let v = Vector::<f32, 8>::splat(1.0);
    assert_eq!(v.hmax_masked(Mask::all_false()), f32::NEG_INFINITY);
    assert_eq!(v.hmin_masked(Mask::all_false()), f32::INFINITY);
}

#[test]
fn test_masked_float_extrema_over_infinite_lanes() {
    let v = Vector::<f32, 8>::from_array([f32::NEG_INFINITY, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
    assert_eq!(v.hmax_masked(Mask::first(1)), f32::NEG_INFINITY);

    let w = Vector::<f64, 4>::from_array([f64::INFINITY, -2.0, -2.0, -2.0]);
    assert_eq!(w.hmin_masked(Mask::first(1)), f64::INFINITY);
    assert_eq!(w.hmin_masked(Mask::first(2)), -2.0);

    let wide = Vector::<f32, 16>::splat(f32::NEG_INFINITY);
    assert_eq!(wide.hmax_masked(Mask::from_bitmask(0b1000_0000_0001)), f32::NEG_INFINITY);
}

#[test]
fn test_seeded_reductions() {
    let v = Vector::<u32, 4>::from_array([1, 2, 3, 4]);
    let mask = Mask::first(2);

    assert_eq!(v.hadd_seeded(100), 110);
    assert_eq!(v.hmul_seeded(2), 48);
    assert_eq!(v.hmax_seeded(9), 9);
    assert_eq!(v.hmin_seeded(0), 0);
    assert_eq!(v.hadd_masked_seeded(mask, 100), 103);
    assert_eq!(v.hadd_masked_seeded(Mask::all_false(), 100), 100);
    assert_eq!(v.hbor_masked_seeded(mask, 8), 11);
}

#[test]
fn test_index_reductions_prefer_lowest_lane() {
    let v = Vector::<f32, 8>::from_array([3.0, 9.0, 1.0, 9.0, 1.0, -2.0, -2.0, 0.0]);
    assert_eq!(v.imax(), 1);
    assert_eq!(v.imin(), 5);

    let mask = Mask::from_array([true, false, true, true, true, false, false, false]);
    assert_eq!(v.imax_masked(mask), Some(3));
    assert_eq!(v.imin_masked(mask), Some(2));
    assert_eq!(v.imax_masked(Mask::all_false()), None);
}

#[test]
fn test_index_reductions_random() {
    let mut rng = StdRng::seed_from_u64(12345);

    for _ in 0..100 {
        let a: [i16; 16] = std::array::from_fn(|_| rng.random_range(-20..=20));
        let v = Vector::from_array(a);

        let max = *a.iter().max().unwrap();
        let min = *a.iter().min().unwrap();
        assert_eq!(v.imax(), a.iter().position(|&x| x == max).unwrap());
        assert_eq!(v.imin(), a.iter().position(|&x| x == min).unwrap());
    }
}

#[test]
fn test_float_sum_is_pairwise() {
    // ((a0 + a1) + (a2 + a3)) differs from a left fold for these values
    let v = Vector::<f32, 4>::from_array([1e8, 1.0, -1e8, 1.0]);
    let pairwise = (1e8f32 + 1.0) + (-1e8f32 + 1.0);
    assert_eq!(v.hadd(), pairwise);
}
