#![forbid(unsafe_code)]

//! Lightning.
//!
//! One transient light source per lit field. While lit, power decays
//! geometrically and snaps to zero once it drops under the threshold. Once
//! the cooldown has run out each frame has a small chance of striking again
//! at a new random position and power.
//!
//! Storm and rain strike differently; [`FlashParams`] carries the numbers.

use hearth_core::geometry::Vec3;
use hearth_core::random::{between, chance};
use hearth_render::PackedRgba;
use rand::Rng;

/// Power below which a decaying storm flash is extinguished.
pub const FLASH_THRESHOLD: f32 = 100.0;
/// Per-frame decay factor of a storm flash.
pub const FLASH_DECAY: f32 = 0.9;
/// Per-frame storm strike probability once the cooldown has expired.
pub const FLASH_PROBABILITY: f64 = 0.03;
/// Range of a new storm strike's power.
pub const FLASH_POWER: (f32, f32) = (100.0, 500.0);
/// Dark frames required between storm strikes.
pub const FLASH_COOLDOWN: (u32, u32) = (60, 120);

/// How one kind of lightning strikes, fades, and looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashParams {
    pub threshold: f32,
    pub decay: f32,
    pub probability: f64,
    pub power: (f32, f32),
    /// Strike position ranges; `z` is fixed.
    pub x: (f32, f32),
    pub y: (f32, f32),
    pub z: f32,
    pub cooldown: (u32, u32),
    /// Count the cooldown down on every frame, lit or dark. Otherwise only
    /// dark frames count.
    pub cooldown_while_lit: bool,
    pub color: PackedRgba,
    /// Light position before the first strike.
    pub rest: Vec3,
}

impl FlashParams {
    /// Bright, frequent strikes high over the storm volume.
    pub const STORM: Self = Self {
        threshold: FLASH_THRESHOLD,
        decay: FLASH_DECAY,
        probability: FLASH_PROBABILITY,
        power: FLASH_POWER,
        x: (-200.0, 200.0),
        y: (300.0, 500.0),
        z: 100.0,
        cooldown: FLASH_COOLDOWN,
        cooldown_while_lit: false,
        color: PackedRgba::from_hex(0x4488ff),
        rest: Vec3::new(200.0, 300.0, 100.0),
    };

    /// Rarer, softer strikes just above the rain.
    pub const RAIN: Self = Self {
        threshold: 0.5,
        decay: 0.85,
        probability: 0.008,
        power: (3.0, 8.0),
        x: (-100.0, 100.0),
        y: (80.0, 120.0),
        z: 50.0,
        cooldown: (30, 120),
        cooldown_while_lit: true,
        color: PackedRgba::from_hex(0x88aaff),
        rest: Vec3::new(0.0, 100.0, 50.0),
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashState {
    power: f32,
    peak: f32,
    position: Vec3,
    cooldown_frames: u32,
}

impl Default for FlashState {
    fn default() -> Self {
        Self::new(&FlashParams::STORM)
    }
}

impl FlashState {
    /// Dark, ready to strike, resting at `params.rest`.
    pub fn new(params: &FlashParams) -> Self {
        Self {
            power: 0.0,
            peak: params.power.1,
            position: params.rest,
            cooldown_frames: 0,
        }
    }

    #[inline]
    pub fn power(&self) -> f32 {
        self.power
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn cooldown_frames(&self) -> u32 {
        self.cooldown_frames
    }

    #[inline]
    pub fn is_lit(&self) -> bool {
        self.power > 0.0
    }

    /// Brightness in `[0, 1]` relative to the strongest possible strike.
    #[inline]
    pub fn strength(&self) -> f32 {
        if self.peak <= 0.0 {
            return 0.0;
        }
        (self.power / self.peak).clamp(0.0, 1.0)
    }

    /// Advance one frame. Returns `true` if a new strike started.
    pub fn tick<R: Rng + ?Sized>(&mut self, params: &FlashParams, rng: &mut R) -> bool {
        if params.cooldown_while_lit {
            self.cooldown_frames = self.cooldown_frames.saturating_sub(1);
        }
        if self.power > 0.0 {
            self.power *= params.decay;
            if self.power < params.threshold {
                self.power = 0.0;
            }
            return false;
        }
        if self.cooldown_frames > 0 {
            if !params.cooldown_while_lit {
                self.cooldown_frames -= 1;
            }
            return false;
        }
        if !chance(rng, params.probability) {
            return false;
        }

        self.position = Vec3::new(
            between(rng, params.x.0, params.x.1),
            between(rng, params.y.0, params.y.1),
            params.z,
        );
        self.power = between(rng, params.power.0, params.power.1);
        self.peak = params.power.1;
        self.cooldown_frames = rng.gen_range(params.cooldown.0..=params.cooldown.1);
        true
    }
}
