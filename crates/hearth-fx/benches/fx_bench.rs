//! Benchmarks for particle stepping and effect rendering.
//!
//! Performance budgets (one nominal frame is ~16.7ms):
//! - Heavy storm step (15k particles): < 1ms
//! - Snow render at 640x360, full quality: < 4ms
//! - Aurora render at 640x360, full quality: < 4ms
//!
//! Run with: cargo bench -p hearth-fx --bench fx_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use hearth_core::scene::IntensityLevel;
use hearth_fx::{Aurora, FRAME, FieldConfig, FieldVariant, FxQuality, ParticleField, WeatherFx};
use hearth_render::Surface;

// =============================================================================
// Configurations
// =============================================================================

const VARIANTS: &[(FieldVariant, &str)] = &[
    (FieldVariant::Snow, "snow"),
    (FieldVariant::Rain, "rain"),
    (FieldVariant::Storm, "storm"),
];

const SIZES: &[(u32, u32, &str)] = &[
    (320, 180, "320x180"),
    (640, 360, "640x360"),
    (1280, 720, "1280x720"),
];

const QUALITIES: &[FxQuality] = &[FxQuality::Full, FxQuality::Reduced, FxQuality::Minimal];

fn field(variant: FieldVariant, intensity: IntensityLevel) -> ParticleField {
    ParticleField::new(FieldConfig::new(variant, intensity).with_seed(42))
}

// =============================================================================
// Simulation
// =============================================================================

fn bench_particle_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("fx/particle_step");

    for &(variant, name) in VARIANTS {
        for intensity in IntensityLevel::ALL {
            let mut fx = field(variant, intensity);
            group.throughput(Throughput::Elements(fx.capacity() as u64));
            group.bench_function(BenchmarkId::new(name, intensity.as_str()), |b| {
                b.iter(|| fx.step(black_box(FRAME)));
            });
        }
    }

    group.finish();
}

// =============================================================================
// Rendering
// =============================================================================

fn bench_particle_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("fx/particle_render");

    for &(variant, name) in VARIANTS {
        for &(w, h, size) in SIZES {
            let mut fx = field(variant, IntensityLevel::Medium);
            let mut surface = Surface::new(w, h);
            fx.resize(w, h);
            fx.step(FRAME);
            group.throughput(Throughput::Elements(fx.capacity() as u64));
            group.bench_function(BenchmarkId::new(name, size), |b| {
                b.iter(|| {
                    fx.render(&mut surface, FxQuality::Full);
                    black_box(&surface);
                });
            });
        }
    }

    group.finish();
}

fn bench_aurora_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("fx/aurora_render");

    for &(w, h, size) in SIZES {
        group.throughput(Throughput::Elements(u64::from(w) * u64::from(h)));
        for &quality in QUALITIES {
            let mut fx = Aurora::new(IntensityLevel::High);
            let mut surface = Surface::new(w, h);
            fx.resize(w, h);
            group.bench_with_input(BenchmarkId::new(quality.as_str(), size), &quality, |b, &q| {
                b.iter(|| {
                    fx.step(FRAME);
                    fx.render(&mut surface, q);
                    black_box(&surface);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_particle_step,
    bench_particle_render,
    bench_aurora_render,
);

criterion_main!(benches);
