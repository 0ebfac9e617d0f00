#![forbid(unsafe_code)]

//! Per-variant constants: pool sizes, volumes, cameras, and palettes.

use hearth_core::geometry::{Span, Vec3};
use hearth_core::scene::IntensityLevel;
use hearth_render::{Camera, PackedRgba};

use super::flash::FlashParams;

/// Which precipitation a field simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldVariant {
    Snow,
    Rain,
    Storm,
}

impl FieldVariant {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Snow => "snow",
            Self::Rain => "rain",
            Self::Storm => "storm",
        }
    }

    /// Particle count for `intensity`. Fixed for the field's lifetime.
    pub fn pool_size(self, intensity: IntensityLevel) -> usize {
        intensity.pick(match self {
            Self::Snow => [3_000, 6_000, 10_000],
            Self::Rain => [1_000, 2_000, 4_000],
            Self::Storm => [5_000, 10_000, 15_000],
        })
    }

    pub fn volume(self) -> Volume {
        match self {
            Self::Snow | Self::Storm => Volume {
                x: Span::new(-200.0, 200.0),
                y: Span::new(-250.0, 250.0),
                z: Span::new(-200.0, 200.0),
                spawn_y: Span::new(-250.0, 250.0),
                respawn_y: Span::new(250.0, 250.0),
            },
            Self::Rain => Volume {
                x: Span::new(-150.0, 150.0),
                y: Span::new(-100.0, 150.0),
                z: Span::new(-100.0, 100.0),
                spawn_y: Span::new(-100.0, 100.0),
                respawn_y: Span::new(100.0, 150.0),
            },
        }
    }

    /// Camera for this variant, viewport unset.
    pub fn camera(self) -> Camera {
        let camera = Camera::perspective(60.0, 1.0, 1000.0);
        match self {
            // Looking at the origin from straight in front.
            Self::Rain => camera.with_position(Vec3::new(0.0, 0.0, 100.0)),
            // Oblique view up into the falling volume.
            Self::Snow | Self::Storm => camera
                .with_position(Vec3::new(0.0, 0.0, 1.0))
                .with_rotation(Vec3::new(1.16, -0.12, 0.27)),
        }
    }

    pub fn palette(self, night: bool) -> Palette {
        match self {
            Self::Snow if night => Palette {
                particle: PackedRgba::rgb(200, 215, 235),
                opacity: 0.75,
                ambient: PackedRgba::from_hex(0x334455),
                backdrop: None,
                fog_density: 0.0,
            },
            Self::Snow => Palette {
                particle: PackedRgba::WHITE,
                opacity: 0.9,
                ambient: PackedRgba::from_hex(0x888899),
                backdrop: None,
                fog_density: 0.0,
            },
            Self::Rain => Palette {
                particle: PackedRgba::from_hex(0xaabbdd),
                opacity: 0.4,
                ambient: PackedRgba::from_hex(0x888899),
                backdrop: None,
                fog_density: 0.0,
            },
            Self::Storm => Palette {
                particle: PackedRgba::from_hex(0xaaccff),
                opacity: 0.6,
                ambient: PackedRgba::from_hex(0x444455),
                backdrop: Some(PackedRgba::from_hex(0x0a0a12).with_opacity(0.3)),
                fog_density: 0.002,
            },
        }
    }
}

impl FieldVariant {
    /// Lightning this variant can carry. Snow never strikes.
    pub const fn flash_params(self) -> Option<FlashParams> {
        match self {
            Self::Snow => None,
            Self::Rain => Some(FlashParams::RAIN),
            Self::Storm => Some(FlashParams::STORM),
        }
    }

    /// Palette when lightning is on. Rain streaks turn darker and denser.
    pub fn lightning_palette(self, night: bool) -> Palette {
        let base = self.palette(night);
        match self {
            Self::Rain => Palette {
                particle: PackedRgba::from_hex(0x8899bb),
                opacity: 0.5,
                ..base
            },
            Self::Snow | Self::Storm => base,
        }
    }
}

/// Bounds a field's particles live in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    pub x: Span,
    /// Visible vertical range; recycling keeps every particle inside it.
    pub y: Span,
    pub z: Span,
    /// Initial vertical placement.
    pub spawn_y: Span,
    /// Where recycled particles re-enter. Lies within `y`.
    pub respawn_y: Span,
}

impl Volume {
    pub fn contains(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }
}

/// Colors and atmosphere for one variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub particle: PackedRgba,
    pub opacity: f32,
    /// Ambient light tint; colors the soft edge of snowflakes.
    pub ambient: PackedRgba,
    /// Cleared behind the particles every frame, if any.
    pub backdrop: Option<PackedRgba>,
    /// Exponential-squared depth fog. Zero disables fog.
    pub fog_density: f32,
}

impl Palette {
    /// Fog visibility in `[0, 1]` at `depth` world units.
    #[inline]
    pub fn fog_factor(&self, depth: f32) -> f32 {
        if self.fog_density <= 0.0 {
            return 1.0;
        }
        let d = self.fog_density * depth;
        (-(d * d)).exp()
    }
}

/// Falling-motion ranges used when spawning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Motion {
    pub fall: (f32, f32),
    pub drift_x: (f32, f32),
    pub drift_z: (f32, f32),
    pub size: (f32, f32),
    pub streak: (f32, f32),
}

impl FieldVariant {
    pub(crate) const fn motion(self) -> Motion {
        match self {
            Self::Snow => Motion {
                fall: (0.3, 0.8),
                drift_x: (-0.15, 0.15),
                drift_z: (-0.05, 0.05),
                size: (0.5, 2.5),
                streak: (0.0, 0.0),
            },
            Self::Rain => Motion {
                fall: (0.4, 0.8),
                drift_x: (0.0, 0.0),
                drift_z: (0.0, 0.0),
                size: (1.0, 1.0),
                streak: (3.0, 8.0),
            },
            Self::Storm => Motion {
                fall: (2.0, 4.0),
                drift_x: (-0.1, 0.1),
                drift_z: (0.0, 0.0),
                size: (0.15, 0.15),
                streak: (0.0, 0.0),
            },
        }
    }
}
