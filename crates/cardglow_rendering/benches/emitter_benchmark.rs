//! Benchmark for per-frame emitter cost.
//!
//! TARGET: 50 premium cards advanced well inside one 60 Hz frame
//!
//! Run with: cargo bench --package cardglow_rendering --bench emitter_benchmark

use cardglow_rendering::{HouseEffectCatalog, ParticleEmitter, ParticlePreset};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const FRAME: f32 = 1.0 / 60.0;

fn warmed(preset: ParticlePreset, seed: u64) -> ParticleEmitter {
    let mut emitter = ParticleEmitter::with_seed(preset, [75.0, 105.0], seed);
    emitter.burst(emitter.pool_size());
    emitter
}

fn benchmark_single_advance(c: &mut Criterion) {
    let mut emitter = warmed(ParticlePreset::FIRE, 1);

    c.bench_function("emitter_advance_fire", |b| {
        b.iter(|| emitter.advance(black_box(FRAME)));
    });
}

fn benchmark_table_of_cards(c: &mut Criterion) {
    let catalog = HouseEffectCatalog::new();
    let houses: Vec<&str> = catalog.houses().collect();
    let mut emitters: Vec<ParticleEmitter> = (0..50u64)
        .map(|i| warmed(catalog.preset(houses[i as usize % houses.len()]), i))
        .collect();

    let mut group = c.benchmark_group("table");
    group.throughput(Throughput::Elements(emitters.len() as u64));
    group.bench_function("advance_50_emitters", |b| {
        b.iter(|| {
            for emitter in &mut emitters {
                emitter.advance(black_box(FRAME));
            }
        });
    });
    group.finish();
}

fn benchmark_catch_up(c: &mut Criterion) {
    let mut emitter = warmed(ParticlePreset::SPARKLE, 9);

    c.bench_function("emitter_advance_stalled_tab", |b| {
        b.iter(|| emitter.advance(black_box(5.0)));
    });
}

criterion_group!(
    benches,
    benchmark_single_advance,
    benchmark_table_of_cards,
    benchmark_catch_up
);
criterion_main!(benches);
