#![forbid(unsafe_code)]

//! Scene vocabulary: time of day, weather condition, and effect intensity.
//!
//! These are the only inputs the renderers receive from the outside world.
//! A [`SceneContext`] is read-only from a renderer's point of view; a change
//! in context means the old renderers are torn down and new ones mounted.

use std::fmt;
use std::str::FromStr;

/// Coarse time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeOfDay {
    Dawn,
    #[default]
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    /// Derive the time of day from a local wall-clock hour (0..=23).
    ///
    /// | Hours     | TimeOfDay |
    /// |-----------|-----------|
    /// | 6, 7      | Dawn      |
    /// | 8 ..= 17  | Day       |
    /// | 18, 19    | Dusk      |
    /// | otherwise | Night     |
    ///
    /// Hours past 23 are taken modulo 24.
    pub const fn from_hour(hour: u8) -> Self {
        match hour % 24 {
            6..=7 => Self::Dawn,
            8..=17 => Self::Day,
            18..=19 => Self::Dusk,
            _ => Self::Night,
        }
    }

    /// Dusk counts as night for lighting and effect selection.
    #[inline]
    pub const fn is_night(self) -> bool {
        matches!(self, Self::Night | Self::Dusk)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Dusk => "dusk",
            Self::Night => "night",
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseSceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dawn" => Ok(Self::Dawn),
            "day" => Ok(Self::Day),
            "dusk" => Ok(Self::Dusk),
            "night" => Ok(Self::Night),
            _ => Err(ParseSceneError::new("time of day", s)),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weather condition shown through the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Snow,
    Fog,
    Storm,
    /// Northern lights. Only visible at night.
    Aurora,
}

impl WeatherCondition {
    pub const ALL: [Self; 7] = [
        Self::Clear,
        Self::Cloudy,
        Self::Rain,
        Self::Snow,
        Self::Fog,
        Self::Storm,
        Self::Aurora,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Fog => "fog",
            Self::Storm => "storm",
            Self::Aurora => "aurora",
        }
    }
}

impl FromStr for WeatherCondition {
    type Err = ParseSceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| ParseSceneError::new("weather condition", s))
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual density of an effect.
///
/// Two vocabularies name the same three levels: `low|medium|high` (aurora)
/// and `light|moderate|heavy` (precipitation). Both parse to this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntensityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl IntensityLevel {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Parse either vocabulary, case-insensitively.
    ///
    /// Unknown input falls back to [`IntensityLevel::Medium`].
    pub fn from_name(name: &str) -> Self {
        match name.parse() {
            Ok(level) => level,
            Err(_) => {
                crate::debug!(input = name, "unknown intensity, using medium");
                Self::Medium
            }
        }
    }

    /// Pick the entry for this level from a `[low, medium, high]` table.
    #[inline]
    pub fn pick<T: Copy>(self, table: [T; 3]) -> T {
        match self {
            Self::Low => table[0],
            Self::Medium => table[1],
            Self::High => table[2],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for IntensityLevel {
    type Err = ParseSceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "light" => Ok(Self::Low),
            "medium" | "moderate" => Ok(Self::Medium),
            "high" | "heavy" => Ok(Self::High),
            _ => Err(ParseSceneError::new("intensity", s)),
        }
    }
}

impl fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally supplied scene state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SceneContext {
    pub time_of_day: TimeOfDay,
    pub weather: WeatherCondition,
}

impl SceneContext {
    #[inline]
    pub const fn new(time_of_day: TimeOfDay, weather: WeatherCondition) -> Self {
        Self {
            time_of_day,
            weather,
        }
    }

    #[inline]
    pub const fn is_night(&self) -> bool {
        self.time_of_day.is_night()
    }
}

/// A scene name that did not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSceneError {
    kind: &'static str,
    input: String,
}

impl ParseSceneError {
    fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_owned(),
        }
    }

    /// What was being parsed (`"intensity"`, `"weather condition"`, ...).
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Display for ParseSceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.input)
    }
}

impl std::error::Error for ParseSceneError {}
