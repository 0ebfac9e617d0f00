#![forbid(unsafe_code)]

//! Mounting an effect onto a surface and driving its frame loop.
//!
//! A [`Mount`] pairs one [`WeatherFx`] with the surface it draws on. Mounting
//! never fails: if the provider cannot hand out a surface the mount enters
//! [`MountState::SurfaceUnavailable`], disposes the effect, and renders
//! nothing for the rest of its life. Teardown is explicit ([`Mount::dispose`])
//! and also happens on drop, so a forgotten mount cannot keep animating.

use std::time::Duration;

use hearth_core::clock::FrameClock;
use hearth_render::{BlendMode, Surface, SurfaceProvider};
use tracing::{debug, info, warn};

use crate::fx::{FxQuality, WeatherFx};

/// Lifecycle of a [`Mount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    /// Drawing every frame.
    Active,
    /// No surface could be acquired; frames are accepted and ignored.
    SurfaceUnavailable,
    /// Torn down. Terminal.
    Disposed,
}

impl MountState {
    #[inline]
    pub fn is_live(self) -> bool {
        !matches!(self, Self::Disposed)
    }
}

pub struct Mount {
    fx: Box<dyn WeatherFx>,
    surface: Option<Surface>,
    state: MountState,
    quality: FxQuality,
    draw_calls: u64,
}

impl std::fmt::Debug for Mount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mount")
            .field("fx", &self.fx.name())
            .field("state", &self.state)
            .field("quality", &self.quality)
            .field("draw_calls", &self.draw_calls)
            .finish_non_exhaustive()
    }
}

impl Mount {
    /// Mount `fx` on a `width` x `height` surface from `provider`.
    pub fn new(
        mut fx: Box<dyn WeatherFx>,
        provider: &mut dyn SurfaceProvider,
        width: u32,
        height: u32,
        quality: FxQuality,
    ) -> Self {
        let name = fx.name();
        match provider.acquire(width, height) {
            Ok(surface) => {
                fx.resize(width, height);
                info!(fx = name, width, height, quality = quality.as_str(), "mounted");
                Self {
                    fx,
                    surface: Some(surface),
                    state: MountState::Active,
                    quality,
                    draw_calls: 0,
                }
            }
            Err(err) => {
                warn!(fx = name, error = %err, "surface unavailable; rendering nothing");
                fx.dispose();
                Self {
                    fx,
                    surface: None,
                    state: MountState::SurfaceUnavailable,
                    quality,
                    draw_calls: 0,
                }
            }
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.fx.name()
    }

    #[inline]
    pub fn state(&self) -> MountState {
        self.state
    }

    #[inline]
    pub fn quality(&self) -> FxQuality {
        self.quality
    }

    /// How this mount's surface should be composited onto the page.
    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.fx.blend_mode()
    }

    /// The drawn surface, while active.
    #[inline]
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Number of frames actually rendered.
    #[inline]
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    /// Step the effect by `dt` and redraw. Returns `false` once disposed.
    pub fn frame(&mut self, dt: Duration) -> bool {
        match self.state {
            MountState::Disposed => false,
            MountState::SurfaceUnavailable => true,
            MountState::Active => {
                let Some(surface) = self.surface.as_mut() else {
                    return true;
                };
                self.fx.step(dt);
                if self.quality.is_enabled() {
                    self.fx.render(surface, self.quality);
                    self.draw_calls += 1;
                }
                true
            }
        }
    }

    /// Follow a viewport change. The surface is reallocated (clearing trails);
    /// particle state is kept. Ignored after teardown.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.state != MountState::Active {
            debug!(fx = self.fx.name(), state = ?self.state, width, height, "resize ignored");
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
            self.fx.resize(width, height);
        }
    }

    /// Cancel the effect and release every buffer. Idempotent.
    pub fn dispose(&mut self) {
        if self.state == MountState::Disposed {
            return;
        }
        let was_active = self.state == MountState::Active;
        self.state = MountState::Disposed;
        if let Some(mut surface) = self.surface.take() {
            surface.release();
        }
        if was_active {
            self.fx.dispose();
        }
        info!(fx = self.fx.name(), draw_calls = self.draw_calls, "unmounted");
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ---------------------------------------------------------------------------
// Frame loop
// ---------------------------------------------------------------------------

/// A mount plus the clock that feeds it.
///
/// The host calls [`frame`](Self::frame) from its refresh callback and stops
/// scheduling once it returns `false`.
#[derive(Debug)]
pub struct FrameLoop {
    clock: FrameClock,
    mount: Mount,
}

impl FrameLoop {
    pub fn new(mount: Mount, max_dt: Duration) -> Self {
        Self {
            clock: FrameClock::new(max_dt),
            mount,
        }
    }

    /// Run one frame timed by the wall clock.
    pub fn frame(&mut self) -> bool {
        if !self.mount.state().is_live() {
            return false;
        }
        let dt = self.clock.tick();
        self.mount.frame(dt)
    }

    /// Run one frame with an explicit `dt`, clamped like a measured one.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.mount.state().is_live() {
            return false;
        }
        let dt = self.clock.advance(dt);
        self.mount.frame(dt)
    }

    /// Stop the loop and tear the mount down.
    pub fn cancel(&mut self) {
        self.mount.dispose();
        self.clock.reset();
    }

    /// Frames run so far, whether wall-clock timed or advanced by hand.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    #[inline]
    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    #[inline]
    pub fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::FRAME;
    use hearth_render::{SoftwareProvider, UnavailableProvider};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls; paints one pixel per render.
    #[derive(Default)]
    struct Recorder {
        steps: Arc<AtomicUsize>,
        renders: Arc<AtomicUsize>,
        disposes: Arc<AtomicUsize>,
    }

    impl WeatherFx for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }
        fn step(&mut self, _dt: Duration) {
            self.steps.fetch_add(1, Ordering::SeqCst);
        }
        fn render(&mut self, surface: &mut Surface, _quality: FxQuality) {
            self.renders.fetch_add(1, Ordering::SeqCst);
            surface.set(0, 0, hearth_render::PackedRgba::WHITE);
        }
        fn dispose(&mut self) {
            self.disposes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn recorder() -> (Box<Recorder>, Arc<AtomicUsize>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let p = Recorder::default();
        let (s, r, d) = (p.steps.clone(), p.renders.clone(), p.disposes.clone());
        (Box::new(p), s, r, d)
    }

    #[test]
    fn active_mount_draws() {
        let (fx, steps, renders, _) = recorder();
        let mut mount = Mount::new(fx, &mut SoftwareProvider::default(), 8, 8, FxQuality::Full);
        assert_eq!(mount.state(), MountState::Active);
        assert!(mount.frame(FRAME));
        assert!(mount.frame(FRAME));
        assert_eq!(steps.load(Ordering::SeqCst), 2);
        assert_eq!(renders.load(Ordering::SeqCst), 2);
        assert_eq!(mount.draw_calls(), 2);
        assert_eq!(mount.surface().map(Surface::lit_pixels), Some(1));
    }

    #[test]
    fn unavailable_surface_fails_soft() {
        let (fx, steps, renders, disposes) = recorder();
        let mut provider = UnavailableProvider::new("no context");
        let mut mount = Mount::new(fx, &mut provider, 8, 8, FxQuality::Full);
        assert_eq!(mount.state(), MountState::SurfaceUnavailable);
        assert_eq!(disposes.load(Ordering::SeqCst), 1);
        for _ in 0..10 {
            assert!(mount.frame(FRAME));
        }
        mount.resize(16, 16);
        assert_eq!(steps.load(Ordering::SeqCst), 0);
        assert_eq!(renders.load(Ordering::SeqCst), 0);
        assert!(mount.surface().is_none());
    }

    #[test]
    fn zero_sized_container_fails_soft() {
        let (fx, _, renders, _) = recorder();
        let mut mount = Mount::new(fx, &mut SoftwareProvider::default(), 0, 10, FxQuality::Full);
        assert_eq!(mount.state(), MountState::SurfaceUnavailable);
        mount.frame(FRAME);
        assert_eq!(renders.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn quality_off_steps_without_drawing() {
        let (fx, steps, renders, _) = recorder();
        let mut mount = Mount::new(fx, &mut SoftwareProvider::default(), 4, 4, FxQuality::Off);
        mount.frame(FRAME);
        assert_eq!(steps.load(Ordering::SeqCst), 1);
        assert_eq!(renders.load(Ordering::SeqCst), 0);
        assert_eq!(mount.draw_calls(), 0);
    }

    #[test]
    fn dispose_is_terminal_and_idempotent() {
        let (fx, _, renders, disposes) = recorder();
        let mut mount = Mount::new(fx, &mut SoftwareProvider::default(), 4, 4, FxQuality::Full);
        mount.frame(FRAME);
        mount.dispose();
        mount.dispose();
        assert_eq!(disposes.load(Ordering::SeqCst), 1);
        assert!(!mount.frame(FRAME));
        mount.resize(100, 100);
        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert_eq!(mount.state(), MountState::Disposed);
        assert!(mount.surface().is_none());
    }

    #[test]
    fn drop_disposes() {
        let (fx, _, _, disposes) = recorder();
        {
            let _mount = Mount::new(fx, &mut SoftwareProvider::default(), 4, 4, FxQuality::Full);
        }
        assert_eq!(disposes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn resize_reallocates_surface() {
        let (fx, _, _, _) = recorder();
        let mut mount = Mount::new(fx, &mut SoftwareProvider::default(), 4, 4, FxQuality::Full);
        mount.frame(FRAME);
        mount.resize(10, 6);
        let surface = mount.surface().expect("active");
        assert_eq!((surface.width(), surface.height()), (10, 6));
        assert_eq!(surface.lit_pixels(), 0);
    }

    #[test]
    fn frame_loop_stops_after_cancel() {
        let (fx, steps, _, _) = recorder();
        let mount = Mount::new(fx, &mut SoftwareProvider::default(), 4, 4, FxQuality::Full);
        let mut lp = FrameLoop::new(mount, Duration::from_millis(100));
        assert!(lp.frame());
        assert!(lp.advance(Duration::from_secs(5)));
        lp.cancel();
        assert!(!lp.frame());
        assert!(!lp.advance(FRAME));
        assert_eq!(steps.load(Ordering::SeqCst), 2);
        assert_eq!(lp.mount().state(), MountState::Disposed);
    }

    #[test]
    fn frame_loop_counts_advanced_frames() {
        let (fx, steps, _, _) = recorder();
        let mount = Mount::new(fx, &mut SoftwareProvider::default(), 4, 4, FxQuality::Full);
        let mut lp = FrameLoop::new(mount, Duration::from_millis(100));
        for _ in 0..3 {
            assert!(lp.advance(FRAME));
        }
        assert!(lp.frame());
        assert_eq!(lp.frames(), 4);
        lp.cancel();
        assert!(!lp.advance(FRAME));
        assert_eq!(lp.frames(), 4);
        assert_eq!(steps.load(Ordering::SeqCst), 4);
    }
}
