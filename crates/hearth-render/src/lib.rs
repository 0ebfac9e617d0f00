#![forbid(unsafe_code)]

//! Render: pixel surfaces, blending, perspective projection, rasterization.

pub mod blend;
pub mod camera;
pub mod color;
pub mod raster;
pub mod surface;

pub use blend::BlendMode;
pub use camera::{Camera, Projected};
pub use color::PackedRgba;
pub use raster::{Edge, Gradient, Stop};
pub use surface::{SoftwareProvider, Surface, SurfaceError, SurfaceProvider, UnavailableProvider};
