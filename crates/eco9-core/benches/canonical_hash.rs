use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eco9_core::canonical;
use serde_json::json;

fn bench_stable_json_hash(c: &mut Criterion) {
    let value = json!({
        "categories": [
            {"name": "transport", "subtypes": [{"name": "biking", "co2_factor": 0.4, "water_factor": 0.1}]},
            {"name": "energy", "subtypes": [{"name": "solar", "co2_factor": 2.5, "water_factor": 0.5}]},
        ]
    });

    c.bench_function("stable_json_hash_hex", |b| {
        b.iter(|| canonical::stable_json_hash_hex(black_box(&value)))
    });
}

criterion_group!(benches, bench_stable_json_hash);
criterion_main!(benches);
