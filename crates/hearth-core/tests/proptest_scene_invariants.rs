//! Property-based invariant tests for the scene vocabulary and helpers.
//!
//! 1. Every hour maps to exactly one time of day, and the mapping is 24-periodic.
//! 2. Intensity parsing never panics and always yields a level.
//! 3. Intensity names parse regardless of case.
//! 4. `wrap_edge` always lands inside the span.
//! 5. `between` stays inside its range.

use hearth_core::geometry::Span;
use hearth_core::random::{between, seeded};
use hearth_core::scene::{IntensityLevel, TimeOfDay};
use proptest::prelude::*;

// ═════════════════════════════════════════════════════════════════════════
// 1. Hour mapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hour_mapping_is_periodic(hour in 0u8..=23) {
        prop_assert_eq!(TimeOfDay::from_hour(hour), TimeOfDay::from_hour(hour + 24));
    }

    #[test]
    fn night_hours_are_night(hour in prop_oneof![0u8..=5, 20u8..=23]) {
        prop_assert_eq!(TimeOfDay::from_hour(hour), TimeOfDay::Night);
        prop_assert!(TimeOfDay::from_hour(hour).is_night());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Intensity parsing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intensity_parse_is_total(s in ".{0,16}") {
        let level = IntensityLevel::from_name(&s);
        prop_assert!(IntensityLevel::ALL.contains(&level));
    }

    #[test]
    fn intensity_parse_ignores_case(
        name in prop::sample::select(vec!["low", "light", "medium", "moderate", "high", "heavy"]),
        mask in any::<u16>(),
    ) {
        let mixed: String = name
            .chars()
            .enumerate()
            .map(|(i, c)| if mask & (1 << (i % 16)) != 0 { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert_eq!(IntensityLevel::from_name(&mixed), IntensityLevel::from_name(name));
        prop_assert!(mixed.parse::<IntensityLevel>().is_ok());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Span wrapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wrap_edge_stays_in_span(
        min in -500.0f32..0.0,
        width in 1.0f32..1000.0,
        v in -2000.0f32..2000.0,
    ) {
        let span = Span::new(min, min + width);
        let wrapped = span.wrap_edge(v);
        prop_assert!(span.contains(wrapped), "{} wrapped to {} outside {:?}", v, wrapped, span);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Ranged sampling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn between_stays_in_range(
        seed in any::<u64>(),
        lo in -100.0f32..100.0,
        width in 0.001f32..50.0,
    ) {
        let mut rng = seeded(seed);
        let hi = lo + width;
        for _ in 0..16 {
            let v = between(&mut rng, lo, hi);
            prop_assert!(v >= lo && v < hi, "{} not in [{}, {})", v, lo, hi);
        }
    }
}
