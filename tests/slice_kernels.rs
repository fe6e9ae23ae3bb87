//! Sequential and parallel slice kernels against scalar loops.

use lanewise::slice::{self, PARALLEL_THRESHOLD};
use lanewise::Vector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vec(rng: &mut StdRng, len: usize) -> Vec<f32> {
    (0..len).map(|_| rng.random_range(-1000.0..=1000.0)).collect()
}

#[test]
fn test_zip_map_add_various_lengths() {
    let mut rng = StdRng::seed_from_u64(12345);

    for len in [0, 1, 7, 8, 9, 63, 64, 1000] {
        let a = random_vec(&mut rng, len);
        let b = random_vec(&mut rng, len);

        let c = slice::zip_map::<f32, 8, _>(&a, &b, |x, y| x + y).unwrap();
        let expected: Vec<f32> = a.iter().zip(&b).map(|(x, y)| x + y).collect();
        assert_eq!(c, expected, "length {len}");
    }
}

#[test]
fn test_par_zip_map_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(12345);
    let len = PARALLEL_THRESHOLD * 3 + 5;
    let a = random_vec(&mut rng, len);
    let b = random_vec(&mut rng, len);

    let fused = |x: Vector<f32, 8>, y: Vector<f32, 8>| x.fmuladd(y, x);
    let sequential = slice::zip_map(&a, &b, fused).unwrap();
    let parallel = slice::par_zip_map(&a, &b, fused).unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_par_map_large_array() {
    let data: Vec<f32> = (0..100_000)
        .map(|i| if i % 2 == 0 { i as f32 } else { -(i as f32) })
        .collect();

    let result = slice::par_map::<f32, 8, _>(&data, |v| v.abs());
    for (i, &val) in result.iter().enumerate() {
        assert_eq!(val, i as f32, "par_map abs failed at index {i}");
    }
}

#[test]
fn test_length_mismatch_is_an_error() {
    let a = vec![1.0f64; 10];
    let b = vec![1.0f64; 11];
    let error = slice::par_zip_map::<f64, 4, _>(&a, &b, |x, y| x * y).unwrap_err();
    assert!(error.to_string().contains("same length"));
}

#[test]
fn test_reduce_add_integers() {
    let data: Vec<i64> = (1..=200_001).collect();
    let expected: i64 = data.iter().sum();

    assert_eq!(slice::reduce_add::<i64, 4>(&data), expected);
    assert_eq!(slice::par_reduce_add::<i64, 4>(&data), expected);
}

#[test]
fn test_map_integer_lanes() {
    let data: Vec<u8> = (0..=255).collect();
    let result = slice::map::<u8, 32, _>(&data, |v| v.sadd_scalar(200));
    let expected: Vec<u8> = data.iter().map(|x| x.saturating_add(200)).collect();
    assert_eq!(result, expected);
}
