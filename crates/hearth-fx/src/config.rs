#![forbid(unsafe_code)]

//! Runtime configuration.
//!
//! Loaded from JSON, then optionally overridden from the environment:
//!
//! | Variable            | Effect                                   |
//! |---------------------|------------------------------------------|
//! | `HEARTH_FX_SEED`    | Fixed seed (u64) for reproducible runs    |
//! | `HEARTH_FX_QUALITY` | `off`, `minimal`, `reduced` or `full`     |
//! | `HEARTH_FX_DISABLE` | `1` or `true` forces quality `off`        |

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fx::FxQuality;

pub const ENV_SEED: &str = "HEARTH_FX_SEED";
pub const ENV_QUALITY: &str = "HEARTH_FX_QUALITY";
pub const ENV_DISABLE: &str = "HEARTH_FX_DISABLE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FxConfig {
    /// Fixed seed; `None` seeds every effect from entropy.
    pub seed: Option<u64>,
    pub quality: FxQuality,
    pub width: u32,
    pub height: u32,
    /// Upper bound on one frame's `dt`, in milliseconds.
    pub max_frame_dt_ms: u64,
    /// Wind gusts in snow fields.
    pub snow_wind: bool,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            seed: None,
            quality: FxQuality::Full,
            width: 640,
            height: 360,
            max_frame_dt_ms: 100,
            snow_wind: true,
        }
    }
}

impl FxConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "surface size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_frame_dt_ms == 0 {
            return Err(ConfigError::Invalid(
                "max_frame_dt_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn max_frame_dt(&self) -> Duration {
        Duration::from_millis(self.max_frame_dt_ms)
    }

    /// Apply overrides from `lookup` (usually the process environment).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_SEED} must be an unsigned integer, got {raw:?}"))
            })?;
            self.seed = Some(seed);
        }
        if let Some(raw) = lookup(ENV_QUALITY) {
            self.quality = raw
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("{ENV_QUALITY}: {e}")))?;
        }
        if lookup(ENV_DISABLE).is_some_and(|v| env_truthy(&v)) {
            self.quality = FxQuality::Off;
        }
        Ok(())
    }

    pub fn apply_process_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())
    }
}

fn env_truthy(value: &str) -> bool {
    let v = value.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}
