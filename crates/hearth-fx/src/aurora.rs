#![forbid(unsafe_code)]

//! Aurora: a procedural field of wavy translucent bands.
//!
//! Bands are analytic curves, not particles. Each frame the persistent
//! surface fades a little (leaving trails), every band is redrawn as a
//! region hanging from the top edge down to its curve, and a row of
//! vertical light curtains sways over it. All drawing uses screen blending.

use std::f64::consts::PI;
use std::time::Duration;

use hearth_core::scene::IntensityLevel;
use hearth_render::raster::{self, Edge, Gradient, Stop};
use hearth_render::{BlendMode, PackedRgba, Surface};
use tracing::{info, trace_span};

use crate::fx::{FRAME, FxQuality, WeatherFx, frames_in};

// ---------------------------------------------------------------------------
// Band shape
// ---------------------------------------------------------------------------

/// `(amplitude px, spatial frequency per px, time multiplier)` per term.
pub const BAND_TERMS: [(f64, f64, f64); 3] = [
    (40.0, 0.008, 1.0),
    (25.0, 0.015, 0.7),
    (60.0, 0.003, 0.3),
];

/// Horizontal distance between curve samples at full quality.
pub const SAMPLE_SPACING: u32 = 5;

/// Alpha removed from the trail buffer each frame.
pub const TRAIL_FADE: f32 = 0.03;

/// Band colors, cycled by band index. Alpha is each band's peak strength.
const BAND_COLORS: [PackedRgba; 5] = [
    PackedRgba::rgba(46, 204, 113, 153),  // emerald
    PackedRgba::rgba(26, 188, 156, 128),  // turquoise
    PackedRgba::rgba(52, 152, 219, 102),  // blue
    PackedRgba::rgba(155, 89, 182, 128),  // purple
    PackedRgba::rgba(46, 204, 113, 77),   // light green
];

/// One wavy band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveBand {
    /// `(peak, fringe)` colors of the band's vertical gradient.
    pub colors: (PackedRgba, PackedRgba),
    /// Rest position as a fraction of surface height.
    pub vertical_offset: f64,
    /// Phase added to every term, in radians.
    pub phase_offset: f64,
}

impl WaveBand {
    /// The `index`-th band of a display.
    pub fn nth(index: usize) -> Self {
        Self {
            colors: (
                BAND_COLORS[index % BAND_COLORS.len()],
                BAND_COLORS[(index + 1) % BAND_COLORS.len()],
            ),
            vertical_offset: 0.2 + 0.15 * index as f64,
            phase_offset: 0.5 * index as f64,
        }
    }

    /// Rest line in pixels for a surface `height` pixels tall.
    #[inline]
    pub fn base_y(&self, height: f64) -> f64 {
        height * self.vertical_offset
    }

    /// Curve height at column `x` and time `t`.
    ///
    /// Pure function of its inputs: identical arguments give identical output.
    #[inline]
    pub fn y(&self, x: f64, t: f64, speed: f64, height: f64) -> f64 {
        let mut y = self.base_y(height);
        for (amplitude, frequency, rate) in BAND_TERMS {
            y += amplitude * (frequency * x + t * speed * rate + self.phase_offset).sin();
        }
        y
    }
}

/// Time after which every band shape repeats exactly.
///
/// The terms advance at `1`, `0.7` and `0.3` times `speed`; the smallest
/// common period of the three is `20π / speed`. The fastest term alone
/// repeats every `2π / speed`.
#[inline]
pub fn band_period(speed: f64) -> f64 {
    20.0 * PI / speed
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Tunables selected by intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuroraParams {
    pub bands: usize,
    pub opacity: f32,
    pub speed: f64,
    pub curtains: usize,
}

impl AuroraParams {
    pub fn for_intensity(intensity: IntensityLevel) -> Self {
        intensity.pick([
            Self {
                bands: 2,
                opacity: 0.4,
                speed: 0.3,
                curtains: 8,
            },
            Self {
                bands: 3,
                opacity: 0.6,
                speed: 0.5,
                curtains: 10,
            },
            Self {
                bands: 4,
                opacity: 0.8,
                speed: 0.7,
                curtains: 12,
            },
        ])
    }
}

// ---------------------------------------------------------------------------
// Aurora
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Aurora {
    params: AuroraParams,
    bands: Vec<WaveBand>,
    band_gradients: Vec<Gradient>,
    curtain_gradient: Gradient,
    samples: Vec<f64>,
    time: f64,
    disposed: bool,
}

impl Aurora {
    pub fn new(intensity: IntensityLevel) -> Self {
        Self::with_params(AuroraParams::for_intensity(intensity))
    }

    pub fn with_params(params: AuroraParams) -> Self {
        let bands: Vec<WaveBand> = (0..params.bands).map(WaveBand::nth).collect();
        let band_gradients = bands
            .iter()
            .map(|band| band_gradient(band, params.opacity))
            .collect();
        info!(
            bands = params.bands,
            curtains = params.curtains,
            speed = params.speed,
            "aurora created"
        );
        Self {
            params,
            bands,
            band_gradients,
            curtain_gradient: Gradient::default(),
            samples: Vec::new(),
            time: 0.0,
            disposed: false,
        }
    }

    #[inline]
    pub fn params(&self) -> &AuroraParams {
        &self.params
    }

    #[inline]
    pub fn bands(&self) -> &[WaveBand] {
        &self.bands
    }

    /// Animation time in seconds.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    fn draw_bands(&mut self, surface: &mut Surface, spacing: u32) {
        let w = surface.width();
        let h = f64::from(surface.height());
        let t = self.time;
        let speed = self.params.speed;

        for (band, gradient) in self.bands.iter().zip(&self.band_gradients) {
            self.samples.clear();
            let mut x = 0;
            loop {
                self.samples.push(band.y(f64::from(x), t, speed, h));
                if x >= w {
                    break;
                }
                x = (x + spacing).min(w);
            }

            let fade_end = (band.base_y(h) + 100.0) as f32;
            for col in 0..w {
                let seg = (col / spacing) as usize;
                let x0 = seg as u32 * spacing;
                let x1 = (x0 + spacing).min(w);
                let a = self.samples[seg];
                let b = self.samples.get(seg + 1).copied().unwrap_or(a);
                let frac = if x1 > x0 {
                    f64::from(col - x0) / f64::from(x1 - x0)
                } else {
                    0.0
                };
                let y = a + (b - a) * frac;
                raster::vertical_span(
                    surface,
                    col as i32,
                    0.0,
                    y as f32,
                    gradient,
                    0.0,
                    fade_end,
                    BlendMode::Screen,
                );
            }
        }
    }

    fn draw_curtains(&mut self, surface: &mut Surface) {
        let count = self.params.curtains;
        if count == 0 {
            return;
        }
        let w = f64::from(surface.width());
        let h = f64::from(surface.height());
        let t = self.time;
        let opacity = self.params.opacity;

        for i in 0..count {
            let fi = i as f64;
            let x = (w / count as f64) * fi + (t * 0.5 + fi).sin() * 30.0;
            let height = h * (0.3 + (t * 0.3 + fi * 0.5).sin() * 0.2);
            let hue = (140.0 + (t * 0.2 + fi).sin() * 40.0) as f32;
            let sway = (t + fi).sin() * 5.0;

            let base = PackedRgba::from_hsl(hue, 0.7, 0.5);
            let bright = PackedRgba::from_hsl(hue, 0.7, 0.6);
            self.curtain_gradient.set_stops(&[
                Stop::new(0.0, base.with_alpha(0)),
                Stop::new(0.3, base.with_opacity(0.1 * opacity)),
                Stop::new(0.6, bright.with_opacity(0.2 * opacity)),
                Stop::new(1.0, base.with_alpha(0)),
            ]);
            raster::trapezoid(
                surface,
                Edge::new((x - 15.0) as f32, (x + 15.0) as f32),
                Edge::new((x - 10.0 + sway) as f32, (x + 10.0 + sway) as f32),
                0.0,
                height as f32,
                &self.curtain_gradient,
                BlendMode::Screen,
            );
        }
    }
}

/// Vertical ramp: transparent at the top, peaking mid-band, gone by the end.
fn band_gradient(band: &WaveBand, opacity: f32) -> Gradient {
    let (peak, fringe) = band.colors;
    let strength = f32::from(peak.a()) / 255.0 * opacity;
    let peak = peak.with_alpha(255);
    let fringe = fringe.with_alpha(255);
    Gradient::new(vec![
        Stop::new(0.0, fringe.with_alpha(0)),
        Stop::new(0.3, fringe.with_opacity(strength * 0.3)),
        Stop::new(0.5, peak.with_opacity(strength)),
        Stop::new(0.7, peak.with_opacity(strength * 0.5)),
        Stop::new(1.0, peak.with_alpha(0)),
    ])
}

impl WeatherFx for Aurora {
    fn name(&self) -> &'static str {
        "aurora"
    }

    fn resize(&mut self, width: u32, _height: u32) {
        let needed = (width / SAMPLE_SPACING) as usize + 2;
        self.samples.reserve(needed.saturating_sub(self.samples.len()));
    }

    fn step(&mut self, dt: Duration) {
        if self.disposed {
            return;
        }
        self.time += f64::from(frames_in(dt)) * FRAME.as_secs_f64();
    }

    fn render(&mut self, surface: &mut Surface, quality: FxQuality) {
        let Some(stride) = quality.stride() else {
            return;
        };
        if self.disposed || surface.is_empty() {
            return;
        }
        let _span = trace_span!("fx_frame", name = "aurora").entered();

        surface.fade(TRAIL_FADE);
        self.draw_bands(surface, SAMPLE_SPACING * stride as u32);
        if quality != FxQuality::Minimal {
            self.draw_curtains(surface);
        }
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.samples = Vec::new();
        self.band_gradients = Vec::new();
        info!("aurora disposed");
    }

    fn blend_mode(&self) -> BlendMode {
        BlendMode::Screen
    }
}
