//! Width, domain and bit-pattern conversions.

use lanewise::Vector;

#[test]
fn test_promote_preserves_value() {
    let v = Vector::<i8, 8>::from_array([-128, -1, 0, 1, 127, -50, 50, 3]);
    assert_eq!(v.promote().to_array(), [-128i16, -1, 0, 1, 127, -50, 50, 3]);

    let f = Vector::<f32, 4>::from_array([0.1, -2.5, f32::MAX, f32::INFINITY]);
    assert_eq!(f.promote().to_array(), [0.1f32 as f64, -2.5, f32::MAX as f64, f64::INFINITY]);
}

#[test]
fn test_degrade() {
    let v = Vector::<u32, 4>::from_array([0x1_0000, 0xFFFF, 0x1_2345, 7]);
    assert_eq!(v.degrade().to_array(), [0u16, 0xFFFF, 0x2345, 7]);

    let f = Vector::<f64, 2>::from_array([0.1, 1e300]);
    assert_eq!(f.degrade().to_array(), [0.1f32, f32::INFINITY]);
}

#[test]
fn test_int_float_domain() {
    let ints = Vector::<i32, 4>::from_array([-7, 0, 16_777_217, i32::MAX]);
    assert_eq!(ints.to_float().to_array(), [-7.0f32, 0.0, 16_777_216.0, 2_147_483_648.0]);

    let floats = Vector::<f32, 8>::from_array([-1.9, 1.9, 0.5, f32::NAN, 1e10, -1e10, -0.0, 255.99]);
    assert_eq!(
        floats.to_int().to_array(),
        [-1, 1, 0, 0, i32::MAX, i32::MIN, 0, 255]
    );
    assert_eq!(
        floats.to_uint().to_array(),
        [0, 1, 0, 0, u32::MAX, 0, 0, 255]
    );
}

#[test]
fn test_reinterpret_keeps_bits() {
    let v = Vector::<i16, 4>::from_array([-1, i16::MIN, 0, 1]);
    let u = v.reinterpret();
    assert_eq!(u.to_array(), [0xFFFF, 0x8000, 0, 1]);
    assert_eq!(u.reinterpret(), v);
}

#[test]
fn test_degrade_then_promote_recovers_representable_values() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(12345);

    for _ in 0..500 {
        let ints = Vector::<i32, 8>::from_fn(|_| rng.random_range(i16::MIN as i32..=i16::MAX as i32));
        assert_eq!(ints.degrade().promote(), ints);

        let bytes = Vector::<u16, 16>::from_fn(|_| rng.random_range(0..=u8::MAX as u16));
        assert_eq!(bytes.degrade().promote(), bytes);

        let doubles = Vector::<f64, 4>::from_fn(|_| rng.random_range(-1e6f32..=1e6) as f64);
        assert_eq!(doubles.degrade().promote(), doubles);

        // not representable at half width: within the rounding of one f32 step
        let precise = Vector::<f64, 4>::from_fn(|_| rng.random_range(-1e6..=1e6));
        let recovered = precise.degrade().promote();
        for (x, y) in precise.to_array().into_iter().zip(recovered.to_array()) {
            assert!((x - y).abs() <= x.abs() * f32::EPSILON as f64, "{x} vs {y}");
        }
    }
}

#[test]
#[allow(overflowing_literals)]
fn test_promote_then_degrade_is_lossless() {
    let v = Vector::<i8, 8>::from_array([i8::MIN, -1, 0, 1, i8::MAX, 42, -42, 7]);
    assert_eq!(v.promote().degrade(), v);

    let f = Vector::<f32, 4>::from_array([0.1, -1e-30, 3.5e38, f32::NEG_INFINITY]);
    assert_eq!(f.promote().degrade(), f);
}
