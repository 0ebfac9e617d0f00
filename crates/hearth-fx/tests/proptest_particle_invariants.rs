//! Property-based invariant tests for the particle fields and the aurora.
//!
//! 1. The pool never changes size, whatever `dt` sequence is fed in.
//! 2. Every particle stays inside its variant's volume.
//! 3. Lightning power only decays between strikes and always reaches zero.
//! 4. Band shape is a pure function of `(x, t)` and repeats after its period.
//! 5. Rendering never panics on odd surface sizes or qualities.

use std::time::Duration;

use hearth_core::random::seeded;
use hearth_core::scene::IntensityLevel;
use hearth_fx::particles::flash::{FlashParams, FlashState};
use hearth_fx::{
    Aurora, FieldConfig, FieldVariant, FxQuality, ParticleField, WaveBand, WeatherFx, band_period,
};
use hearth_render::Surface;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn variant_strategy() -> impl Strategy<Value = FieldVariant> {
    prop::sample::select(vec![FieldVariant::Snow, FieldVariant::Rain, FieldVariant::Storm])
}

fn quality_strategy() -> impl Strategy<Value = FxQuality> {
    prop::sample::select(vec![
        FxQuality::Off,
        FxQuality::Minimal,
        FxQuality::Reduced,
        FxQuality::Full,
    ])
}

fn dts() -> impl Strategy<Value = Vec<Duration>> {
    prop::collection::vec((0u64..250).prop_map(Duration::from_millis), 1..40)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Pool size and bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn pool_is_fixed_and_bounded(
        variant in variant_strategy(),
        seed in any::<u64>(),
        dts in dts(),
    ) {
        let config = FieldConfig::new(variant, IntensityLevel::Low).with_seed(seed);
        let mut field = ParticleField::new(config);
        let capacity = field.capacity();
        let volume = *field.volume();
        for dt in dts {
            field.step(dt);
            prop_assert_eq!(field.particles().len(), capacity);
        }
        for p in field.particles() {
            prop_assert!(volume.contains(p.position), "{:?} escaped {:?}", p.position, volume);
        }
    }

    #[test]
    fn wind_stays_in_unit_range(seed in any::<u64>(), steps in 1usize..400) {
        let config = FieldConfig::new(FieldVariant::Snow, IntensityLevel::Low).with_seed(seed);
        let mut field = ParticleField::new(config);
        for _ in 0..steps {
            field.step(Duration::from_millis(16));
            prop_assert!((-1.0..=1.0).contains(&field.wind()));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Lightning decay
// ═════════════════════════════════════════════════════════════════════════

fn flash_params_strategy() -> impl Strategy<Value = FlashParams> {
    prop::sample::select(vec![FlashParams::STORM, FlashParams::RAIN])
}

proptest! {
    #[test]
    fn flash_decays_monotonically_between_strikes(
        seed in any::<u64>(),
        params in flash_params_strategy(),
    ) {
        let mut rng = seeded(seed);
        let mut flash = FlashState::new(&params);
        let mut prev = flash.power();
        for _ in 0..2_000 {
            let struck = flash.tick(&params, &mut rng);
            if struck {
                prop_assert!(flash.power() >= params.power.0);
                prop_assert!(prev == 0.0, "struck while still lit");
            } else {
                prop_assert!(flash.power() <= prev);
            }
            prop_assert!(flash.power() == 0.0 || flash.power() >= params.threshold);
            prev = flash.power();
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Band shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn band_shape_is_pure_and_periodic(
        band in 0usize..5,
        x in 0.0f64..4000.0,
        t in 0.0f64..100.0,
        speed in prop::sample::select(vec![0.3f64, 0.5, 0.7]),
    ) {
        let band = WaveBand::nth(band);
        let a = band.y(x, t, speed, 720.0);
        prop_assert_eq!(a.to_bits(), band.y(x, t, speed, 720.0).to_bits());
        let b = band.y(x, t + band_period(speed), speed, 720.0);
        prop_assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Rendering robustness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn render_never_panics(
        variant in variant_strategy(),
        quality in quality_strategy(),
        w in 0u32..64,
        h in 0u32..64,
    ) {
        let config = FieldConfig::new(variant, IntensityLevel::Low).with_seed(5);
        let mut field = ParticleField::new(config);
        let mut aurora = Aurora::new(IntensityLevel::High);
        let mut surface = Surface::new(w, h);
        field.resize(w, h);
        aurora.resize(w, h);
        for _ in 0..3 {
            field.step(Duration::from_millis(16));
            aurora.step(Duration::from_millis(16));
            field.render(&mut surface, quality);
            aurora.render(&mut surface, quality);
        }
    }
}
