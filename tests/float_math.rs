//! Float math against the standard library, random inputs.

use lanewise::{Mask, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_lanes<const N: usize>(rng: &mut StdRng, lo: f64, hi: f64) -> [f64; N] {
    std::array::from_fn(|_| rng.random_range(lo..=hi))
}

#[test]
fn test_f64_math_matches_std() {
    let mut rng = StdRng::seed_from_u64(12345);

    for _ in 0..250 {
        let a = random_lanes::<4>(&mut rng, -50.0, 50.0);
        let v = Vector::from_array(a);

        assert_eq!(v.floor().to_array(), a.map(f64::floor));
        assert_eq!(v.ceil().to_array(), a.map(f64::ceil));
        assert_eq!(v.trunc().to_array(), a.map(f64::trunc));
        assert_eq!(v.round().to_array(), a.map(f64::round_ties_even));
        assert_eq!(v.exp().to_array(), a.map(f64::exp));
        assert_eq!(v.sin().to_array(), a.map(f64::sin));
        assert_eq!(v.cos().to_array(), a.map(f64::cos));

        let abs = v.abs();
        assert_eq!(abs.sqrt().to_array(), a.map(|x| x.abs().sqrt()));
        assert_eq!(abs.log().to_array(), a.map(|x| x.abs().ln()));
    }
}

#[test]
fn test_f32_math_precision() {
    let mut rng = StdRng::seed_from_u64(12345);
    let inputs: Vec<f32> = (0..1024)
        .map(|_| rng.random_range(-4.0 * std::f32::consts::PI..=4.0 * std::f32::consts::PI))
        .collect();

    let mut max_abs_error = 0.0f32;
    for chunk in inputs.chunks_exact(8) {
        let v = Vector::<f32, 8>::try_from_slice(chunk).unwrap();
        let cos = v.cos().to_array();
        let sin = v.sin().to_array();

        for (i, &x) in chunk.iter().enumerate() {
            max_abs_error = max_abs_error.max((cos[i] - x.cos()).abs());
            max_abs_error = max_abs_error.max((sin[i] - x.sin()).abs());
        }
    }

    println!("max abs error: {max_abs_error:.2e}");
    assert!(max_abs_error < 1e-6, "max abs error {max_abs_error:.2e}");
}

#[test]
fn test_masked_math_keeps_unselected_lanes() {
    let v = Vector::<f32, 4>::from_array([-4.0, 4.0, 9.0, -9.0]);
    let positive = v.cmpgt_scalar(0.0);

    // negative lanes would produce NaN if evaluated and kept
    assert_eq!(v.sqrt_masked(positive).to_array(), [-4.0, 2.0, 3.0, -9.0]);
    assert_eq!(v.log_masked(Mask::all_false()), v);
}

#[test]
fn test_special_values() {
    let v = Vector::<f64, 2>::from_array([f64::INFINITY, -1.0]);
    let s = v.sqrt().to_array();
    assert_eq!(s[0], f64::INFINITY);
    assert!(s[1].is_nan());

    let z = Vector::<f64, 2>::from_array([0.0, f64::NEG_INFINITY]);
    assert_eq!(z.log().extract(0), f64::NEG_INFINITY);
    assert_eq!(z.exp().to_array(), [1.0, 0.0]);
}
