use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eco9_impact::{calculate, ImpactCalculator};
use eco9_model::ActivityInput;

fn bench_calculate(c: &mut Criterion) {
    c.bench_function("calculate_known_category", |b| {
        b.iter(|| calculate(black_box("transport"), black_box(5.2), black_box("km")))
    });
    c.bench_function("calculate_fallback_category", |b| {
        b.iter(|| calculate(black_box("gardening"), black_box(5.2), black_box("m2")))
    });
}

fn bench_checked(c: &mut Criterion) {
    let Ok(calc) = ImpactCalculator::builtin() else {
        return;
    };
    let input = ActivityInput::new("energy", 3.5, "kWh").with_subtype("led_bulbs");
    c.bench_function("calculate_checked", |b| {
        b.iter(|| calc.calculate_checked(black_box(&input)))
    });
}

criterion_group!(benches, bench_calculate, bench_checked);
criterion_main!(benches);
