#![forbid(unsafe_code)]

//! Core: scene vocabulary, geometry, random sources, and frame timing.

pub mod clock;
pub mod geometry;
pub mod logging;
pub mod random;
pub mod scene;

pub use clock::FrameClock;
pub use geometry::{Span, Vec3};
pub use random::FxRng;
pub use scene::{IntensityLevel, ParseSceneError, SceneContext, TimeOfDay, WeatherCondition};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, trace_span, warn};
