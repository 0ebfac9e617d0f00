#![forbid(unsafe_code)]

//! Choosing and hosting the effects a scene calls for.
//!
//! [`ScenePlan`] maps a [`SceneContext`] to the set of effects that should be
//! on screen. [`SceneDirector`] keeps those effects mounted: a scene change
//! with a different plan tears every mount down and mounts the new plan from
//! scratch. Effects are never reconfigured in place.

use std::time::Duration;

use hearth_core::scene::{IntensityLevel, SceneContext, WeatherCondition};
use hearth_render::{Surface, SurfaceProvider};
use tracing::info;

use crate::aurora::Aurora;
use crate::config::FxConfig;
use crate::fx::WeatherFx;
use crate::mount::{FrameLoop, Mount};
use crate::particles::{FieldConfig, FieldVariant, FlashCallback, ParticleField};

/// One effect to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedFx {
    Particles {
        variant: FieldVariant,
        intensity: IntensityLevel,
        night: bool,
        lightning: bool,
    },
    Aurora {
        intensity: IntensityLevel,
    },
}

impl PlannedFx {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Particles { variant, .. } => variant.name(),
            Self::Aurora { .. } => "aurora",
        }
    }

    /// Build the effect. `seed` fixes its randomness.
    pub fn build(
        &self,
        seed: Option<u64>,
        snow_wind: bool,
        on_flash: Option<&FlashCallback>,
    ) -> Box<dyn WeatherFx> {
        match *self {
            Self::Particles {
                variant,
                intensity,
                night,
                lightning,
            } => {
                let mut config = FieldConfig::new(variant, intensity)
                    .with_night(night)
                    .with_wind(snow_wind)
                    .with_lightning(lightning);
                config.seed = seed;
                let mut field = ParticleField::new(config);
                if let Some(cb) = on_flash {
                    field.set_flash_callback(cb.clone());
                }
                Box::new(field)
            }
            Self::Aurora { intensity } => Box::new(Aurora::new(intensity)),
        }
    }
}

/// The effects one scene shows, in back-to-front order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenePlan {
    effects: Vec<PlannedFx>,
}

impl ScenePlan {
    pub fn for_scene(ctx: &SceneContext) -> Self {
        let night = ctx.is_night();
        let effects = match ctx.weather {
            WeatherCondition::Aurora if night => vec![PlannedFx::Aurora {
                intensity: IntensityLevel::High,
            }],
            WeatherCondition::Rain => vec![PlannedFx::Particles {
                variant: FieldVariant::Rain,
                intensity: IntensityLevel::Medium,
                night,
                lightning: false,
            }],
            WeatherCondition::Snow => vec![PlannedFx::Particles {
                variant: FieldVariant::Snow,
                intensity: IntensityLevel::Medium,
                night,
                lightning: false,
            }],
            // Heavy rain with its own lightning, not the storm field.
            WeatherCondition::Storm => vec![PlannedFx::Particles {
                variant: FieldVariant::Rain,
                intensity: IntensityLevel::High,
                night: true,
                lightning: true,
            }],
            WeatherCondition::Aurora
            | WeatherCondition::Clear
            | WeatherCondition::Cloudy
            | WeatherCondition::Fog => Vec::new(),
        };
        Self { effects }
    }

    /// Same effects, all at `intensity`.
    #[must_use]
    pub fn with_intensity(mut self, level: IntensityLevel) -> Self {
        for fx in &mut self.effects {
            match fx {
                PlannedFx::Particles { intensity, .. } | PlannedFx::Aurora { intensity } => {
                    *intensity = level;
                }
            }
        }
        self
    }

    #[inline]
    pub fn effects(&self) -> &[PlannedFx] {
        &self.effects
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Director
// ---------------------------------------------------------------------------

/// Keeps the mounted effects in line with the current scene.
pub struct SceneDirector {
    config: FxConfig,
    provider: Box<dyn SurfaceProvider>,
    plan: ScenePlan,
    loops: Vec<FrameLoop>,
    on_flash: Option<FlashCallback>,
}

impl std::fmt::Debug for SceneDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneDirector")
            .field("config", &self.config)
            .field("plan", &self.plan)
            .field("loops", &self.loops)
            .finish_non_exhaustive()
    }
}

impl SceneDirector {
    pub fn new(config: FxConfig, provider: Box<dyn SurfaceProvider>) -> Self {
        Self {
            config,
            provider,
            plan: ScenePlan::default(),
            loops: Vec::new(),
            on_flash: None,
        }
    }

    /// Hook called on every lightning strike of any field mounted from now on.
    /// It runs on the frame thread and must not block.
    pub fn set_flash_callback(&mut self, callback: FlashCallback) {
        self.on_flash = Some(callback);
    }

    #[inline]
    pub fn config(&self) -> &FxConfig {
        &self.config
    }

    #[inline]
    pub fn plan(&self) -> &ScenePlan {
        &self.plan
    }

    #[inline]
    pub fn mounts(&self) -> impl Iterator<Item = &Mount> {
        self.loops.iter().map(FrameLoop::mount)
    }

    /// Switch to `ctx`. Returns `true` if the mounted effects changed.
    pub fn apply(&mut self, ctx: &SceneContext) -> bool {
        let changed = self.mount_plan(ScenePlan::for_scene(ctx));
        if changed {
            info!(
                time = ctx.time_of_day.as_str(),
                weather = ctx.weather.as_str(),
                effects = self.plan.effects().len(),
                "scene applied"
            );
        }
        changed
    }

    /// Mount `plan` unless it is already mounted. Returns `true` on change.
    pub fn mount_plan(&mut self, plan: ScenePlan) -> bool {
        if plan == self.plan {
            return false;
        }
        self.unmount_all();

        let (w, h) = (self.config.width, self.config.height);
        for (i, planned) in plan.effects().iter().enumerate() {
            let seed = self.config.seed.map(|s| s.wrapping_add(i as u64));
            let fx = planned.build(seed, self.config.snow_wind, self.on_flash.as_ref());
            let mount = Mount::new(fx, self.provider.as_mut(), w, h, self.config.quality);
            self.loops.push(FrameLoop::new(mount, self.config.max_frame_dt()));
        }
        self.plan = plan;
        true
    }

    /// Advance every mounted effect by `dt`.
    pub fn frame_all(&mut self, dt: Duration) {
        for lp in &mut self.loops {
            lp.advance(dt);
        }
    }

    /// Follow a viewport change.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        for lp in &mut self.loops {
            lp.mount_mut().resize(width, height);
        }
    }

    /// Composite every mounted surface onto `target`, back to front.
    pub fn composite(&self, target: &mut Surface) {
        for mount in self.mounts() {
            if let Some(surface) = mount.surface() {
                target.composite(surface, mount.blend_mode());
            }
        }
    }

    /// Tear every effect down.
    pub fn dispose(&mut self) {
        self.unmount_all();
        self.plan = ScenePlan::default();
    }

    fn unmount_all(&mut self) {
        for lp in &mut self.loops {
            lp.cancel();
        }
        self.loops.clear();
    }
}
