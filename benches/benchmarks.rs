//! Benchmarks for storeless
//!
//! Run with: cargo bench --features full

// Require the algorithm families
#[cfg(not(all(feature = "statistics", feature = "array")))]
compile_error!("Benchmarks require all features. Run: cargo bench --features full");

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use storeless::array::ResizableDoubleArray;
use storeless::moment::{FirstMoment, FourthMoment, SecondMoment};
use storeless::statistics::{Kurtosis, Mean, StandardDeviation, Variance};
use storeless::traits::{StorelessStatistic, UnivariateStatistic};

fn sample(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 7919) % 1000) as f64 * 0.1).collect()
}

// ============================================================================
// Moment Benchmarks
// ============================================================================

fn bench_moments(c: &mut Criterion) {
    let mut group = c.benchmark_group("moments");
    group.throughput(Throughput::Elements(1));

    group.bench_function("first_increment", |b| {
        let mut m = FirstMoment::new();
        let mut i = 0u64;
        b.iter(|| {
            m.increment(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("second_increment", |b| {
        let mut m = SecondMoment::new();
        let mut i = 0u64;
        b.iter(|| {
            m.increment(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("fourth_increment", |b| {
        let mut m = FourthMoment::new();
        let mut i = 0u64;
        b.iter(|| {
            m.increment(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("fourth_merge", |b| {
        let mut m1 = FourthMoment::new();
        let mut m2 = FourthMoment::new();
        for i in 0..10_000u64 {
            m1.increment(i as f64);
            m2.increment((i + 10_000) as f64);
        }
        b.iter(|| {
            let mut m = m1.clone();
            m.merge(black_box(&m2));
        });
    });

    group.finish();
}

// ============================================================================
// Statistic Benchmarks
// ============================================================================

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for size in [100, 10_000, 1_000_000] {
        let data = sample(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("mean_evaluate", size), &data, |b, data| {
            let mean = Mean::new();
            b.iter(|| black_box(mean.evaluate(data).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("variance_evaluate", size), &data, |b, data| {
            let var = Variance::new();
            b.iter(|| black_box(var.evaluate(data).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("variance_stream", size), &data, |b, data| {
            b.iter(|| {
                let mut var = Variance::new();
                var.increment_all(data);
                black_box(var.result())
            });
        });

        group.bench_with_input(BenchmarkId::new("kurtosis_evaluate", size), &data, |b, data| {
            let kurt = Kurtosis::new();
            b.iter(|| black_box(kurt.evaluate(data).unwrap()));
        });
    }

    group.bench_function("std_dev_result", |b| {
        let mut sd = StandardDeviation::new();
        sd.increment_all(&sample(100_000));
        b.iter(|| black_box(sd.result()));
    });

    group.finish();
}

// ============================================================================
// ResizableDoubleArray Benchmarks
// ============================================================================

fn bench_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("resizable_array");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_element", |b| {
        let array = ResizableDoubleArray::new();
        let mut i = 0u64;
        b.iter(|| {
            array.add_element(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("add_element_rolling", |b| {
        let array = ResizableDoubleArray::from_slice(&sample(1000));
        let mut i = 0u64;
        b.iter(|| {
            black_box(array.add_element_rolling(i as f64));
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("compute_mean", |b| {
        let array = ResizableDoubleArray::from_slice(&sample(10_000));
        let mean = Mean::new();
        b.iter(|| black_box(array.compute(|values, start, len| mean.evaluate_range(values, start, len))));
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_moments, bench_statistics, bench_array);

criterion_main!(benches);
