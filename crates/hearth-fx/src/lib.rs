#![forbid(unsafe_code)]

//! Weather animation core.
//!
//! Two kinds of effect, both behind [`WeatherFx`]:
//!
//! - [`ParticleField`]: a fixed pool of snowflakes or raindrops falling
//!   through a bounded 3D volume, projected through a perspective camera.
//!   Storm and rain fields can carry lightning ([`FlashState`], tuned by
//!   [`FlashParams`]).
//! - [`Aurora`]: analytic wave bands and light curtains drawn over a fading
//!   trail buffer.
//!
//! [`Mount`] and [`FrameLoop`] host one effect on a surface; [`SceneDirector`]
//! decides which effects a [`SceneContext`](hearth_core::SceneContext) needs.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use hearth_core::IntensityLevel;
//! use hearth_fx::{FieldConfig, FieldVariant, FxQuality, Mount, ParticleField};
//! use hearth_render::SoftwareProvider;
//!
//! let config = FieldConfig::new(FieldVariant::Snow, IntensityLevel::Low).with_seed(7);
//! let field = Box::new(ParticleField::new(config));
//! let mut provider = SoftwareProvider::default();
//! let mut mount = Mount::new(field, &mut provider, 160, 90, FxQuality::Full);
//! assert!(mount.frame(Duration::from_millis(16)));
//! mount.dispose();
//! assert!(!mount.frame(Duration::from_millis(16)));
//! ```

pub mod aurora;
pub mod config;
pub mod fx;
pub mod mount;
pub mod particles;
pub mod scene;

pub use aurora::{Aurora, AuroraParams, WaveBand, band_period};
pub use config::{ConfigError, FxConfig};
pub use fx::{FRAME, FxQuality, WeatherFx};
pub use mount::{FrameLoop, Mount, MountState};
pub use particles::flash::{FlashParams, FlashState};
pub use particles::{FieldConfig, FieldVariant, FlashCallback, Particle, ParticleField};
pub use scene::{PlannedFx, ScenePlan, SceneDirector};
