//! Property-based invariant tests for blending and rasterization.
//!
//! 1. Additive and screen blending never darken the destination.
//! 2. Over with an opaque source yields the source.
//! 3. Rasterizers never panic and never write outside the surface, for any
//!    coordinates (including far off-screen and non-finite ones).
//! 4. Gradient samples stay within the channel range of their stops.
//! 5. Fading never raises alpha.

use hearth_render::raster::{self, Edge, Gradient, Stop};
use hearth_render::{BlendMode, PackedRgba, Surface};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn color_strategy() -> impl Strategy<Value = PackedRgba> {
    any::<u32>().prop_map(PackedRgba)
}

fn coord_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![
        -1.0e6f32..1.0e6,
        -64.0f32..128.0,
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
    ]
}

fn falloff() -> Gradient {
    Gradient::new(vec![
        Stop::new(0.0, PackedRgba::rgba(255, 255, 255, 255)),
        Stop::new(0.3, PackedRgba::rgba(255, 255, 255, 204)),
        Stop::new(0.7, PackedRgba::rgba(220, 235, 255, 77)),
        Stop::new(1.0, PackedRgba::rgba(200, 220, 255, 0)),
    ])
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Blending
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lightening_modes_never_darken(top in color_strategy(), bottom in color_strategy()) {
        for mode in [BlendMode::Additive, BlendMode::Screen] {
            let out = mode.blend(top, bottom);
            prop_assert!(
                out.r() >= bottom.r(),
                "{:?} darkened red: {:?} onto {:?}",
                mode,
                top,
                bottom
            );
            prop_assert!(out.g() >= bottom.g());
            prop_assert!(out.b() >= bottom.b());
            prop_assert!(out.a() >= bottom.a());
        }
    }

    #[test]
    fn opaque_over_replaces(
        r in any::<u8>(),
        g in any::<u8>(),
        b in any::<u8>(),
        bottom in color_strategy(),
    ) {
        let top = PackedRgba::rgb(r, g, b);
        prop_assert_eq!(BlendMode::Over.blend(top, bottom), top);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Rasterizers stay in bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn soft_point_never_panics(
        w in 1u32..48,
        h in 1u32..48,
        cx in coord_strategy(),
        cy in coord_strategy(),
        radius in prop_oneof![0.0f32..12.0, Just(f32::NAN), Just(-3.0f32)],
    ) {
        let mut s = Surface::new(w, h);
        raster::soft_point(&mut s, cx, cy, radius, &falloff(), BlendMode::Additive);
        prop_assert_eq!(s.pixels().len(), (w * h) as usize);
    }

    #[test]
    fn line_never_panics(
        w in 1u32..48,
        h in 1u32..48,
        x0 in -200i32..200, y0 in -200i32..200,
        x1 in -200i32..200, y1 in -200i32..200,
    ) {
        let mut s = Surface::new(w, h);
        raster::line(&mut s, x0, y0, x1, y1, PackedRgba::WHITE, BlendMode::Over);
        prop_assert!(s.lit_pixels() <= (w * h) as usize);
    }

    #[test]
    fn spans_never_panic(
        w in 1u32..48,
        h in 1u32..48,
        x in -10i32..60,
        top in coord_strategy(),
        bottom in coord_strategy(),
        left in coord_strategy(),
        right in coord_strategy(),
    ) {
        let mut s = Surface::new(w, h);
        let g = falloff();
        raster::vertical_span(&mut s, x, top, bottom, &g, 0.0, h as f32, BlendMode::Screen);
        let edge = Edge::new(left, right);
        raster::trapezoid(&mut s, edge, edge, top, bottom, &g, BlendMode::Screen);
        prop_assert_eq!(s.pixels().len(), (w * h) as usize);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Gradient range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn gradient_within_stop_range(t in -2.0f32..3.0) {
        let g = falloff();
        let sample = g.sample(t);
        let min_r = g.stops().iter().map(|s| s.color.r()).min().unwrap_or(0);
        let max_a = g.stops().iter().map(|s| s.color.a()).max().unwrap_or(0);
        prop_assert!(sample.r() >= min_r);
        prop_assert!(sample.a() <= max_a);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Fade is monotone
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fade_never_raises_alpha(
        seed in prop::collection::vec(any::<u32>(), 16),
        amount in 0.0f32..1.0,
    ) {
        let mut s = Surface::new(4, 4);
        for (i, v) in seed.iter().enumerate() {
            s.set((i % 4) as i32, (i / 4) as i32, PackedRgba(*v));
        }
        let before: Vec<u8> = s.pixels().iter().map(|p| p.a()).collect();
        s.fade(amount);
        for (b, p) in before.iter().zip(s.pixels()) {
            prop_assert!(p.a() <= *b);
        }
    }
}
