#![forbid(unsafe_code)]

//! Effect trait and quality tiers.
//!
//! Design goals shared by every effect:
//! - **Deterministic** for a fixed seed and a fixed sequence of `dt` values.
//! - **No per-frame allocations** in steady state; buffers are sized at
//!   construction or resize.
//! - **Tiny-area safe**: a 0x0 surface renders nothing and must not panic.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use hearth_render::{BlendMode, Surface};
use serde::{Deserialize, Serialize};

/// Nominal display frame. Per-frame constants (fall speeds, decay rates)
/// are expressed against this.
pub const FRAME: Duration = Duration::from_micros(16_667);

/// Upper bound on how many nominal frames one `step` may cover.
pub const MAX_FRAMES_PER_STEP: f32 = 4.0;

/// Number of nominal frames `dt` covers, clamped to `[0, MAX_FRAMES_PER_STEP]`.
#[inline]
pub fn frames_in(dt: Duration) -> f32 {
    (dt.as_secs_f32() / FRAME.as_secs_f32()).clamp(0.0, MAX_FRAMES_PER_STEP)
}

/// Quality dial for graceful degradation.
///
/// Quality only thins what is drawn. It never changes simulation state, so
/// switching tiers mid-animation is seamless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FxQuality {
    /// Render nothing; the surface is left untouched.
    Off,
    /// Every 4th particle; aurora without curtains.
    Minimal,
    /// Every 2nd particle; coarser aurora sampling.
    Reduced,
    #[default]
    Full,
}

impl FxQuality {
    #[inline]
    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }

    /// Draw every `stride`-th element. `Off` has no stride.
    #[inline]
    pub fn stride(self) -> Option<usize> {
        match self {
            Self::Off => None,
            Self::Minimal => Some(4),
            Self::Reduced => Some(2),
            Self::Full => Some(1),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Minimal => "minimal",
            Self::Reduced => "reduced",
            Self::Full => "full",
        }
    }
}

impl FromStr for FxQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "minimal" => Ok(Self::Minimal),
            "reduced" => Ok(Self::Reduced),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown quality: {other:?}")),
        }
    }
}

impl fmt::Display for FxQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mounted weather effect.
///
/// Effects own their simulation state. The host owns the surface and hands
/// it in for each render; see [`crate::mount::Mount`].
pub trait WeatherFx: Send {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// The viewport changed. Simulation state must survive this.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Advance the simulation by `dt`.
    fn step(&mut self, dt: Duration);

    /// Draw the current state into `surface`.
    fn render(&mut self, surface: &mut Surface, quality: FxQuality);

    /// Release simulation buffers. Called once, before the effect is dropped.
    fn dispose(&mut self) {}

    /// How this effect's surface composites onto the scene.
    fn blend_mode(&self) -> BlendMode {
        BlendMode::Over
    }
}
