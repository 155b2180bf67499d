//! Benchmarks for the diff engine.
//!
//! Run with: cargo bench --bench diff_benchmark
//!
//! Payloads mimic a large processor with many outputs, each carrying
//! configuration fields and noisy per-channel telemetry.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use led_volume_logger::diff::{DiffEngine, VetoRuleSet};
use led_volume_logger::model::Snapshot;
use serde_json::{json, Map, Value};
use std::hint::black_box;

/// Generate a payload with `outputs` output blocks. `generation` shifts the
/// telemetry values and, every tenth output, one configuration field.
fn generate_payload(outputs: usize, generation: i64) -> Snapshot {
    let mut blocks = Map::new();
    for i in 0..outputs {
        let brightness = if i % 10 == 0 { 100 - generation } else { 100 };
        blocks.insert(
            format!("output{i}"),
            json!({
                "name": format!("Wall section {i}"),
                "brightness": brightness,
                "gamma": 2.2,
                "inputs": ["sdi1", "sdi2", "hdmi1"],
                "temps": {"board": 40 + generation, "fpga": 55 + generation},
                "fans": {"f1": 2000 + generation * 10},
                "uptime": 1000 + generation,
                "SFP #1 Temp": 38 + generation,
            }),
        );
    }
    Snapshot::from(json!({"sys": {"serial": "HX-0001"}, "outputs": Value::Object(blocks)}))
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    for size in [10, 100, 1000] {
        let old = generate_payload(size, 0);
        let new = generate_payload(size, 1);
        let standard = DiffEngine::new();
        let unfiltered = DiffEngine::new().with_veto_rules(VetoRuleSet::empty());

        group.bench_with_input(BenchmarkId::new("standard_veto", size), &size, |b, _| {
            b.iter(|| black_box(standard.compare(black_box(&old), black_box(&new))));
        });
        group.bench_with_input(BenchmarkId::new("no_veto", size), &size, |b, _| {
            b.iter(|| black_box(unfiltered.compare(black_box(&old), black_box(&new))));
        });
    }

    group.finish();
}

fn bench_identical(c: &mut Criterion) {
    let old = generate_payload(1000, 0);
    let new = generate_payload(1000, 0);
    let engine = DiffEngine::new();

    c.bench_function("compare_identical_1000", |b| {
        b.iter(|| black_box(engine.compare(black_box(&old), black_box(&new))));
    });
}

criterion_group!(benches, bench_compare, bench_identical);
criterion_main!(benches);
