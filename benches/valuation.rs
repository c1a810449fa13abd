//! Latency benchmarks for the valuation pipeline.
//!
//! Run with: `cargo bench --bench valuation`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use catalog_valuation::core::format;
use catalog_valuation::core::ValuationInputs;
use catalog_valuation::engine::ValuationEngine;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CITY_POOL: &[&str] = &[
    "London, United Kingdom",
    "New York, United States",
    "Paris, France",
    "Berlin, Germany",
    "Mexico City, Mexico",
    "Mumbai, India",
    "Tokyo, Japan",
    "Reykjavik, Iceland",
    "Cairo, Egypt",
    "Sydney, Australia",
];

/// Generate a synthetic listener-city sample of the given size.
fn generate_city_sample(size: usize, rng: &mut StdRng) -> Vec<String> {
    (0..size)
        .map(|_| CITY_POOL[rng.gen_range(0..CITY_POOL.len())].to_string())
        .collect()
}

fn generate_inputs(city_count: usize, rng: &mut StdRng) -> ValuationInputs {
    let release = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
    let valued_at = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    ValuationInputs::new(rng.gen_range(1_000_000..10_000_000_000u64), release, valued_at)
        .with_top_cities(generate_city_sample(city_count, rng))
}

fn bench_compute(c: &mut Criterion) {
    let engine = ValuationEngine::default();
    let mut rng = StdRng::seed_from_u64(42);

    let mut group = c.benchmark_group("compute_valuation");
    for city_count in [0usize, 5, 50, 500] {
        let inputs = generate_inputs(city_count, &mut rng);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(city_count),
            &inputs,
            |b, inputs| b.iter(|| engine.compute(black_box(inputs))),
        );
    }
    group.finish();
}

fn bench_parse_count(c: &mut Criterion) {
    let tokens = ["7.2B", "150M", "80K", "1,204,558"];
    c.bench_function("parse_count", |b| {
        b.iter(|| {
            for token in tokens {
                let _ = format::parse_count(black_box(token));
            }
        })
    });
}

criterion_group!(benches, bench_compute, bench_parse_count);
criterion_main!(benches);
