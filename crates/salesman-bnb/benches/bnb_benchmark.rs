// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use salesman_bnb::bnb::BnbSolver;
use salesman_bnb::matrix::CostMatrix;
use salesman_bnb::monitor::no_op::NoOperationMonitor;
use salesman_model::index::CityIndex;
use salesman_model::model::Model;
use std::hint::black_box;

const SEED: u64 = 0x7A11_5EED;

/// Random points in a 1000 x 1000 square, Euclidean distances rounded to integers.
fn euclidean_instance(num_cities: usize, seed: u64) -> Model<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..num_cities)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();

    Model::from_fn(num_cities, |from, to| {
        let (ax, ay) = points[from.get()];
        let (bx, by) = points[to.get()];
        Some((ax - bx).hypot(ay - by).round() as i64)
    })
    .expect("Euclidean instances are always valid")
}

/// Random directed costs in `1..1000`.
fn asymmetric_instance(num_cities: usize, seed: u64) -> Model<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Model::from_fn(num_cities, |_, _| Some(rng.random_range(1..1000)))
        .expect("complete instances are always valid")
}

fn bench_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduction");

    for &n in &[16usize, 32, 64] {
        let model = asymmetric_instance(n, SEED);
        let matrix = CostMatrix::from_model(&model);

        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, matrix| {
            b.iter(|| black_box(matrix.clone()).reduce())
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for &n in &[8usize, 10, 12] {
        let symmetric = euclidean_instance(n, SEED);
        let directed = asymmetric_instance(n, SEED);
        let mut solver = BnbSolver::preallocated(1024);

        group.bench_with_input(BenchmarkId::new("euclidean", n), &symmetric, |b, model| {
            b.iter(|| {
                let outcome = solver
                    .solve(black_box(model), CityIndex::new(0), NoOperationMonitor::new())
                    .expect("Benchmark configuration error: generated model is invalid");
                if !outcome.is_optimal() {
                    panic!("Benchmark configuration error: search did not prove optimality.");
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("asymmetric", n), &directed, |b, model| {
            b.iter(|| {
                let outcome = solver
                    .solve(black_box(model), CityIndex::new(0), NoOperationMonitor::new())
                    .expect("Benchmark configuration error: generated model is invalid");
                black_box(outcome.objective())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reduction, bench_solve);
criterion_main!(benches);
