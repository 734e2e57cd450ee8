use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lt_instruments::{DefaultableZeroCouponBond, ExponentialHazard, OptionType, Swap, Swaption, VanillaOption};
use lt_methods::{BinomialCalibration, ShortRateParameters};
use lt_pricingengines::{BinomialVanillaEngine, DefaultableBondEngine, ShortRateSwapEngine};
use std::hint::black_box;
use std::sync::Arc;

// Backward induction touches (N + 1)(N + 2) / 2 nodes, so cost grows as N².

fn bench_american_put_steps(c: &mut Criterion) {
    let option = VanillaOption::american(OptionType::Put, 100.0);
    let mut group = c.benchmark_group("american_put");
    for steps in [50usize, 200, 800] {
        let calibration = BinomialCalibration::new(1.0, 0.20, steps, 0.05, 0.0)
            .expect("benchmark calibration should be valid");
        let engine = BinomialVanillaEngine::new(calibration, 100.0);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, _| {
            b.iter(|| {
                let v = engine.value(black_box(&option)).expect("pricing should succeed");
                black_box(v.npv())
            })
        });
    }
    group.finish();
}

fn bench_swaption(c: &mut Criterion) {
    let rates = ShortRateParameters::new(1.01, 0.99, 0.05)
        .lattice(200)
        .expect("benchmark lattice should be valid");
    let engine = ShortRateSwapEngine::new(Arc::new(rates));
    let swaption = Swaption::new(Swap::forward_starting(0.05, 200), 100);

    c.bench_function("swaption_200_steps", |b| {
        b.iter(|| {
            let v = engine
                .value_swaption(black_box(&swaption))
                .expect("pricing should succeed");
            black_box(v.npv())
        })
    });
}

fn bench_defaultable_bond(c: &mut Criterion) {
    let rates = ShortRateParameters::new(1.01, 0.99, 0.05)
        .lattice(200)
        .expect("benchmark lattice should be valid");
    let engine = DefaultableBondEngine::new(Arc::new(rates));
    let bond = DefaultableZeroCouponBond::new(100.0, 200, 0.4, Arc::new(ExponentialHazard::new(0.001, 1.001)));

    c.bench_function("defaultable_zcb_200_steps", |b| {
        b.iter(|| {
            let v = engine.value(black_box(&bond)).expect("pricing should succeed");
            black_box(v.npv())
        })
    });
}

criterion_group!(benches, bench_american_put_steps, bench_swaption, bench_defaultable_bond);
criterion_main!(benches);
