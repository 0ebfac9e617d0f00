#![forbid(unsafe_code)]

//! Particle fields: snow, rain, and storm.
//!
//! A field is a fixed pool of particles falling through a bounded volume.
//! Particles that drop below the volume re-enter at the top; particles that
//! drift past a side wall reappear on the opposite one. The pool never grows
//! or shrinks while the field is alive.
//!
//! # Order independence
//!
//! Each particle's update reads only its own state plus a read-only
//! [`StepInput`] computed once per step. Respawn randomness comes from
//! [`respawn_stream`], keyed by `(field seed, particle index, generation)`,
//! so stepping particles in any order (or in parallel) gives the same
//! result.

pub mod flash;
pub mod presets;

use std::time::Duration;

use hearth_core::geometry::Vec3;
use hearth_core::random::{BoxedRng, between, chance, respawn_stream, rng_for};
use hearth_core::scene::IntensityLevel;
use hearth_render::raster::{self, Gradient, Stop};
use hearth_render::{BlendMode, Camera, Surface};
use rand::RngCore;
use tracing::{debug, info, trace_span};

use crate::fx::{FRAME, FxQuality, MAX_FRAMES_PER_STEP, WeatherFx, frames_in};
use flash::{FlashParams, FlashState};
pub use presets::{FieldVariant, Palette, Volume};

/// Shared lightning hook. Called once per strike, on the frame thread.
///
/// The call happens synchronously inside [`WeatherFx::step`], so it must not
/// block: hand any slow work (playing a sound, say) off to another thread or
/// queue and return.
pub type FlashCallback = std::sync::Arc<dyn Fn() + Send + Sync>;

/// Peak sideways wobble of a snowflake, in world units per frame.
const WOBBLE_AMPLITUDE: f64 = 0.02;
/// Per-frame chance that the snow wind picks a new target.
const WIND_SHIFT_CHANCE: f64 = 0.005;
/// Fraction of the remaining gap the wind closes each frame.
const WIND_EASE: f32 = 0.01;
/// Horizontal drift per unit of wind.
const WIND_DRIFT: f32 = 0.1;
/// Rain streaks lean this far sideways over their length.
const STREAK_SLANT: f32 = 0.3;
/// Base point size for snowflakes, scaled by each flake's own size.
const SNOW_POINT_SIZE: f32 = 3.0;
const MAX_POINT_RADIUS: f32 = 8.0;

/// Construction parameters for a [`ParticleField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConfig {
    pub variant: FieldVariant,
    pub intensity: IntensityLevel,
    /// Night (or storm) lighting.
    pub night: bool,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Snow only: enable drifting wind gusts.
    pub wind: bool,
    /// Lightning strikes. Ignored by snow.
    pub lightning: bool,
}

impl FieldConfig {
    pub fn new(variant: FieldVariant, intensity: IntensityLevel) -> Self {
        Self {
            variant,
            intensity,
            night: matches!(variant, FieldVariant::Storm),
            seed: None,
            wind: true,
            lightning: matches!(variant, FieldVariant::Storm),
        }
    }

    #[must_use]
    pub fn with_night(mut self, night: bool) -> Self {
        self.night = night;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_wind(mut self, wind: bool) -> Self {
        self.wind = wind;
        self
    }

    #[must_use]
    pub fn with_lightning(mut self, lightning: bool) -> Self {
        self.lightning = lightning;
        self
    }

    /// Lightning this field actually runs, if any.
    pub fn flash_params(&self) -> Option<FlashParams> {
        if !self.lightning {
            return None;
        }
        self.variant.flash_params()
    }
}

/// One falling element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Per-frame motion. `y` is always `<= 0`.
    pub velocity: Vec3,
    pub size: f32,
    /// Rain only: length of the streak trailing above `position`. Zero otherwise.
    pub streak: f32,
    generation: u32,
}

impl Particle {
    /// How many times this particle has been recycled.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Lower end of a rain streak.
    #[inline]
    pub fn streak_end(&self) -> Vec3 {
        self.position + Vec3::new(STREAK_SLANT, -self.streak, 0.0)
    }

    fn spawn(rng: &mut dyn RngCore, variant: FieldVariant, volume: &Volume) -> Self {
        let motion = variant.motion();
        let position = Vec3::new(
            between(rng, volume.x.min, volume.x.max),
            between(rng, volume.spawn_y.min, volume.spawn_y.max),
            between(rng, volume.z.min, volume.z.max),
        );
        let velocity = Vec3::new(
            between(rng, motion.drift_x.0, motion.drift_x.1),
            -between(rng, motion.fall.0, motion.fall.1),
            between(rng, motion.drift_z.0, motion.drift_z.1),
        );
        Self {
            position,
            velocity,
            size: between(rng, motion.size.0, motion.size.1),
            streak: between(rng, motion.streak.0, motion.streak.1),
            generation: 0,
        }
    }

    /// Advance one step. Reads nothing but `self` and `input`.
    fn advance(&mut self, index: usize, input: &StepInput) {
        let f = input.frames;
        let mut dx = self.velocity.x + input.wind_dx;
        if input.wobble {
            dx += ((input.elapsed + index as f64).sin() * WOBBLE_AMPLITUDE) as f32;
        }
        self.position.x += dx * f;
        self.position.y += self.velocity.y * f;
        self.position.z += self.velocity.z * f;

        if self.position.y < input.volume.y.min {
            self.recycle(index, input);
        }
        self.position.x = input.volume.x.wrap_edge(self.position.x);
        self.position.z = input.volume.z.wrap_edge(self.position.z);
    }

    /// Re-enter at the top with a fresh `x`/`z`. Velocity, size, and streak
    /// length are kept.
    fn recycle(&mut self, index: usize, input: &StepInput) {
        self.generation = self.generation.wrapping_add(1);
        let mut rng = respawn_stream(input.seed, index as u64, self.generation);
        let v = &input.volume;
        self.position = Vec3::new(
            between(&mut rng, v.x.min, v.x.max),
            between(&mut rng, v.respawn_y.min, v.respawn_y.max),
            between(&mut rng, v.z.min, v.z.max),
        );
    }
}

/// Everything a particle may read during a step.
#[derive(Debug, Clone, Copy)]
struct StepInput {
    frames: f32,
    wind_dx: f32,
    elapsed: f64,
    wobble: bool,
    volume: Volume,
    seed: u64,
}

/// Fixed-size particle simulation with its own camera and palette.
pub struct ParticleField {
    config: FieldConfig,
    capacity: usize,
    pool: Vec<Particle>,
    volume: Volume,
    camera: Camera,
    palette: Palette,
    falloff: Gradient,
    rng: BoxedRng,
    respawn_seed: u64,
    elapsed: f64,
    wind: f32,
    wind_target: f32,
    frame_debt: Duration,
    flash_params: Option<FlashParams>,
    flash: FlashState,
    on_flash: Option<FlashCallback>,
    disposed: bool,
}

impl std::fmt::Debug for ParticleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleField")
            .field("config", &self.config)
            .field("pool", &self.pool.len())
            .field("elapsed", &self.elapsed)
            .field("wind", &self.wind)
            .field("flash", &self.flash)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl ParticleField {
    /// Build a field, seeding from `config.seed` or entropy.
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, Box::new(rng_for(config.seed)))
    }

    /// Build a field drawing all randomness from `rng`.
    pub fn with_rng(config: FieldConfig, mut rng: BoxedRng) -> Self {
        let variant = config.variant;
        let capacity = variant.pool_size(config.intensity);
        let volume = variant.volume();
        let flash_params = config.flash_params();
        let palette = match flash_params {
            Some(_) => variant.lightning_palette(config.night),
            None => variant.palette(config.night),
        };
        let respawn_seed = rng.next_u64();

        let mut pool = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            pool.push(Particle::spawn(&mut *rng, variant, &volume));
        }

        info!(
            variant = variant.name(),
            intensity = config.intensity.as_str(),
            pool = capacity,
            night = config.night,
            lightning = flash_params.is_some(),
            "particle field created"
        );

        Self {
            config,
            capacity,
            pool,
            volume,
            camera: variant.camera(),
            falloff: snow_falloff(&palette),
            palette,
            rng,
            respawn_seed,
            elapsed: 0.0,
            wind: 0.0,
            wind_target: 0.0,
            frame_debt: Duration::ZERO,
            flash: flash_params
                .as_ref()
                .map_or_else(FlashState::default, FlashState::new),
            flash_params,
            on_flash: None,
            disposed: false,
        }
    }

    /// Register the hook invoked whenever lightning strikes.
    pub fn set_flash_callback(&mut self, callback: FlashCallback) {
        self.on_flash = Some(callback);
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn variant(&self) -> FieldVariant {
        self.config.variant
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.pool
    }

    /// Configured pool size.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    #[inline]
    pub fn flash(&self) -> &FlashState {
        &self.flash
    }

    #[inline]
    pub fn wind(&self) -> f32 {
        self.wind
    }

    /// Simulation seconds since creation.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn update_wind(&mut self, frames: f32) {
        if !(self.config.wind && self.config.variant == FieldVariant::Snow) {
            return;
        }
        if chance(&mut *self.rng, WIND_SHIFT_CHANCE * f64::from(frames)) {
            self.wind_target = between(&mut *self.rng, -1.0, 1.0);
        }
        let ease = 1.0 - (1.0 - WIND_EASE).powf(frames);
        self.wind += (self.wind_target - self.wind) * ease;
    }

    fn update_flash(&mut self, dt: Duration) {
        let Some(params) = self.flash_params else {
            return;
        };
        self.frame_debt = (self.frame_debt + dt).min(FRAME.mul_f32(MAX_FRAMES_PER_STEP));
        while self.frame_debt >= FRAME {
            self.frame_debt -= FRAME;
            if self.flash.tick(&params, &mut *self.rng) {
                debug!(
                    power = self.flash.power(),
                    x = self.flash.position().x,
                    y = self.flash.position().y,
                    "lightning strike"
                );
                if let Some(callback) = &self.on_flash {
                    callback();
                }
            }
        }
    }

    fn step_input(&self, frames: f32) -> StepInput {
        StepInput {
            frames,
            wind_dx: self.wind * WIND_DRIFT,
            elapsed: self.elapsed,
            wobble: self.config.variant == FieldVariant::Snow,
            volume: self.volume,
            seed: self.respawn_seed,
        }
    }

    fn draw_snow(&self, surface: &mut Surface, stride: usize) {
        for p in self.pool.iter().step_by(stride) {
            let Some(proj) = self.camera.project(p.position) else {
                continue;
            };
            let radius = (self.camera.pixel_scale(p.size * SNOW_POINT_SIZE, proj.depth) * 0.5)
                .clamp(0.5, MAX_POINT_RADIUS);
            raster::soft_point(
                surface,
                proj.x,
                proj.y,
                radius,
                &self.falloff,
                BlendMode::Additive,
            );
        }
    }

    fn draw_rain(&self, surface: &mut Surface, stride: usize) {
        let color = self.palette.particle.with_opacity(self.palette.opacity);
        for p in self.pool.iter().step_by(stride) {
            let (Some(a), Some(b)) = (
                self.camera.project(p.position),
                self.camera.project(p.streak_end()),
            ) else {
                continue;
            };
            raster::line(
                surface,
                a.x as i32,
                a.y as i32,
                b.x as i32,
                b.y as i32,
                color,
                BlendMode::Additive,
            );
        }
    }

    fn draw_storm(&self, surface: &mut Surface, stride: usize) {
        for p in self.pool.iter().step_by(stride) {
            let Some(proj) = self.camera.project(p.position) else {
                continue;
            };
            let alpha = self.palette.opacity * self.palette.fog_factor(proj.depth);
            surface.blend(
                proj.x as i32,
                proj.y as i32,
                self.palette.particle.with_opacity(alpha),
                BlendMode::Additive,
            );
        }
        self.draw_flash(surface);
    }

    fn draw_flash(&self, surface: &mut Surface) {
        let Some(params) = &self.flash_params else {
            return;
        };
        if !self.flash.is_lit() {
            return;
        }
        let strength = self.flash.strength();
        let glow_color = params.color;
        raster::wash(
            surface,
            glow_color.with_opacity(strength * 0.25),
            BlendMode::Additive,
        );
        if let Some(center) = self.camera.project(self.flash.position()) {
            let radius = surface.width().min(surface.height()) as f32 * 0.5 * strength;
            let glow = Gradient::new(vec![
                Stop::new(0.0, glow_color.with_opacity(strength * 0.8)),
                Stop::new(1.0, glow_color.with_alpha(0)),
            ]);
            raster::soft_point(surface, center.x, center.y, radius, &glow, BlendMode::Screen);
        }
    }
}

/// Radial falloff for snowflakes: bright core, ambient-tinted soft edge.
fn snow_falloff(palette: &Palette) -> Gradient {
    let core = palette.particle;
    let edge = core.lerp(palette.ambient, 0.5);
    Gradient::new(vec![
        Stop::new(0.0, core),
        Stop::new(0.3, core.with_opacity(0.8)),
        Stop::new(0.7, edge.with_opacity(0.3)),
        Stop::new(1.0, palette.ambient.with_alpha(0)),
    ])
    .with_opacity(palette.opacity)
}

impl WeatherFx for ParticleField {
    fn name(&self) -> &'static str {
        self.config.variant.name()
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Reproject only; particles keep their positions.
        self.camera.set_viewport(width, height);
    }

    fn step(&mut self, dt: Duration) {
        if self.disposed {
            return;
        }
        let frames = frames_in(dt);
        self.update_wind(frames);
        self.update_flash(dt);

        let input = self.step_input(frames);
        for (index, particle) in self.pool.iter_mut().enumerate() {
            particle.advance(index, &input);
        }
        self.elapsed += f64::from(frames) * FRAME.as_secs_f64();
    }

    fn render(&mut self, surface: &mut Surface, quality: FxQuality) {
        let Some(stride) = quality.stride() else {
            return;
        };
        if self.disposed {
            return;
        }
        let _span = trace_span!("fx_frame", name = self.name()).entered();

        match self.palette.backdrop {
            Some(backdrop) => surface.fill(backdrop),
            None => surface.clear(),
        }
        if surface.is_empty() {
            return;
        }
        self.camera.set_viewport(surface.width(), surface.height());

        match self.config.variant {
            FieldVariant::Snow => self.draw_snow(surface, stride),
            FieldVariant::Rain => {
                self.draw_rain(surface, stride);
                self.draw_flash(surface);
            }
            FieldVariant::Storm => self.draw_storm(surface, stride),
        }
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.pool = Vec::new();
        self.on_flash = None;
        info!(variant = self.config.variant.name(), "particle field disposed");
    }
}
