//! Mounting, teardown, and fail-soft behavior with real effects.

use std::time::Duration;

use hearth_core::scene::IntensityLevel;
use hearth_fx::{
    Aurora, FieldConfig, FieldVariant, FrameLoop, FxQuality, Mount, MountState, ParticleField,
};
use hearth_render::{BlendMode, SoftwareProvider, UnavailableProvider};

const DT: Duration = Duration::from_millis(16);

fn snow() -> Box<ParticleField> {
    Box::new(ParticleField::new(
        FieldConfig::new(FieldVariant::Snow, IntensityLevel::Low).with_seed(21),
    ))
}

#[test]
fn unavailable_surface_renders_nothing() {
    let mut provider = UnavailableProvider::new("no drawing context");
    let mut mount = Mount::new(snow(), &mut provider, 320, 180, FxQuality::Full);
    assert_eq!(mount.state(), MountState::SurfaceUnavailable);
    for _ in 0..30 {
        assert!(mount.frame(DT));
    }
    assert_eq!(mount.draw_calls(), 0);
    assert!(mount.surface().is_none());
}

#[test]
fn oversized_request_fails_soft() {
    let mut provider = SoftwareProvider::with_max_pixels(100);
    let mount = Mount::new(snow(), &mut provider, 320, 180, FxQuality::Full);
    assert_eq!(mount.state(), MountState::SurfaceUnavailable);
}

#[test]
fn resize_after_unmount_is_ignored() {
    let mut mount = Mount::new(
        Box::new(Aurora::new(IntensityLevel::Medium)),
        &mut SoftwareProvider::default(),
        160,
        90,
        FxQuality::Full,
    );
    for _ in 0..10 {
        mount.frame(DT);
    }
    assert_eq!(mount.draw_calls(), 10);
    mount.dispose();
    for size in [(800, 600), (1, 1), (0, 0)] {
        mount.resize(size.0, size.1);
        assert!(!mount.frame(DT));
    }
    assert_eq!(mount.draw_calls(), 10);
    assert_eq!(mount.state(), MountState::Disposed);
}

#[test]
fn resize_keeps_particles() {
    let mut mount = Mount::new(snow(), &mut SoftwareProvider::default(), 320, 180, FxQuality::Full);
    for _ in 0..20 {
        mount.frame(DT);
    }
    let lit_before = mount.surface().map(|s| s.lit_pixels()).unwrap_or(0);
    assert!(lit_before > 0);
    mount.resize(640, 360);
    let surface = mount.surface().expect("still mounted");
    assert_eq!(surface.lit_pixels(), 0);
    mount.frame(Duration::ZERO);
    assert!(mount.surface().map(|s| s.lit_pixels()).unwrap_or(0) > 0);
}

#[test]
fn blend_modes_follow_effect() {
    let mut provider = SoftwareProvider::default();
    let aurora = Mount::new(
        Box::new(Aurora::new(IntensityLevel::Low)),
        &mut provider,
        8,
        8,
        FxQuality::Full,
    );
    let rain = Mount::new(
        Box::new(ParticleField::new(FieldConfig::new(FieldVariant::Rain, IntensityLevel::Low))),
        &mut provider,
        8,
        8,
        FxQuality::Full,
    );
    assert_eq!(aurora.blend_mode(), BlendMode::Screen);
    assert_eq!(rain.blend_mode(), BlendMode::Over);
}

#[test]
fn frame_loop_runs_until_cancelled() {
    let mount = Mount::new(snow(), &mut SoftwareProvider::default(), 64, 64, FxQuality::Reduced);
    let mut lp = FrameLoop::new(mount, Duration::from_millis(100));
    for _ in 0..5 {
        assert!(lp.frame());
    }
    assert_eq!(lp.frames(), 5);
    lp.cancel();
    assert!(!lp.frame());
    assert_eq!(lp.mount().draw_calls(), 5);
}
