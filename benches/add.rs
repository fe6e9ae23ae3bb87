//! Addition benchmarks: scalar loop, lane-wise kernel, parallel kernel and
//! ndarray, across sizes that walk the cache hierarchy.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lanewise::{active_backend, slice, Vector};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ================================================================================================
// BENCHMARK CONFIGURATION
// ================================================================================================

/// f32 = 4 bytes, so 1M elements = 4 MiB
const VECTOR_SIZES: &[usize] = &[
    1_024,      // 4 KiB - L1 cache
    16_384,     // 64 KiB - L1→L2 transition
    262_144,    // 1 MiB - L2 cache
    1_048_576,  // 4 MiB - L2→L3 transition
    16_777_216, // 64 MiB - main memory
];

const LANES: usize = 8;

fn generate_test_data(len: usize) -> (Vec<f32>, Vec<f32>) {
    let mut rng = StdRng::seed_from_u64(42);

    let a: Vec<f32> = (0..len).map(|_| rng.random::<f32>()).collect();
    let b: Vec<f32> = (0..len).map(|_| rng.random::<f32>()).collect();

    (a, b)
}

fn scalar_add(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

fn lane_add(x: Vector<f32, LANES>, y: Vector<f32, LANES>) -> Vector<f32, LANES> {
    x + y
}

// ================================================================================================
// BENCHMARK IMPLEMENTATIONS
// ================================================================================================

fn benchmark_addition(c: &mut Criterion) {
    println!("backend: {}", active_backend());

    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("Addition_{}", format_size(size)));
        group.throughput(Throughput::Bytes(
            (size * std::mem::size_of::<f32>() * 2) as u64,
        ));

        let (a_vec, b_vec) = generate_test_data(size);
        let a: &[f32] = a_vec.as_slice();
        let b: &[f32] = b_vec.as_slice();

        group.bench_with_input(BenchmarkId::new("scalar", size), &(a, b), |bench, &(a, b)| {
            bench.iter(|| black_box(scalar_add(a, black_box(b))))
        });

        group.bench_with_input(BenchmarkId::new("lanewise", size), &(a, b), |bench, &(a, b)| {
            bench.iter(|| black_box(slice::zip_map(a, black_box(b), lane_add)))
        });

        if size > slice::PARALLEL_THRESHOLD {
            group.bench_with_input(
                BenchmarkId::new("parallel", size),
                &(a, b),
                |bench, &(a, b)| {
                    bench.iter(|| black_box(slice::par_zip_map(a, black_box(b), lane_add)))
                },
            );
        }

        let a_ndarray = Array1::from_vec(a_vec.clone());
        let b_ndarray = Array1::from_vec(b_vec.clone());
        group.bench_with_input(
            BenchmarkId::new("ndarray", size),
            &(&a_ndarray, &b_ndarray),
            |bench, (a, b)| bench.iter(|| black_box(*a + *b)),
        );

        group.finish();
    }
}

// ================================================================================================
// UTILITY FUNCTIONS
// ================================================================================================

fn format_size(elements: usize) -> String {
    let bytes = elements * std::mem::size_of::<f32>();

    if bytes >= 1_048_576 {
        format!("{:.1}_MiB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1}_KiB", bytes as f64 / 1024.0)
    } else {
        format!("{}_B", bytes)
    }
}

criterion_group!(benches, benchmark_addition);
criterion_main!(benches);
