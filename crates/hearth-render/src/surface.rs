#![forbid(unsafe_code)]

//! Drawing surfaces and how effects acquire them.
//!
//! A [`Surface`] is a plain RGBA pixel grid owned by one mounted effect.
//! Effects never create surfaces directly; they ask a [`SurfaceProvider`],
//! which may refuse (no GPU, oversized request, zero-sized container).

use std::fmt;

use crate::blend::BlendMode;
use crate::color::PackedRgba;

/// Largest surface the software provider hands out by default.
pub const DEFAULT_MAX_PIXELS: u64 = 8192 * 8192;

/// Why a surface could not be acquired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The host has no drawing context to give.
    Unavailable(String),
    /// A surface with no pixels was requested.
    ZeroSized { width: u32, height: u32 },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "drawing surface unavailable: {msg}"),
            Self::ZeroSized { width, height } => {
                write!(f, "zero-sized surface requested ({width}x{height})")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Source of drawing surfaces.
pub trait SurfaceProvider {
    /// Acquire a cleared surface of the given size.
    fn acquire(&mut self, width: u32, height: u32) -> Result<Surface, SurfaceError>;
}

/// Hands out in-memory surfaces up to a pixel budget.
#[derive(Debug, Clone, Copy)]
pub struct SoftwareProvider {
    max_pixels: u64,
}

impl Default for SoftwareProvider {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl SoftwareProvider {
    pub fn with_max_pixels(max_pixels: u64) -> Self {
        Self { max_pixels }
    }
}

impl SurfaceProvider for SoftwareProvider {
    fn acquire(&mut self, width: u32, height: u32) -> Result<Surface, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroSized { width, height });
        }
        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.max_pixels {
            return Err(SurfaceError::Unavailable(format!(
                "{width}x{height} exceeds the {} pixel budget",
                self.max_pixels
            )));
        }
        hearth_core::debug!(width, height, "software surface acquired");
        Ok(Surface::new(width, height))
    }
}

/// A provider that always fails, standing in for a host without a context.
#[derive(Debug, Clone, Default)]
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl SurfaceProvider for UnavailableProvider {
    fn acquire(&mut self, _width: u32, _height: u32) -> Result<Surface, SurfaceError> {
        Err(SurfaceError::Unavailable(self.reason.clone()))
    }
}

/// RGBA pixel grid, row-major, origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
}

impl Surface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![PackedRgba::TRANSPARENT; len],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    /// Change dimensions and clear to transparent.
    ///
    /// The backing buffer only grows; shrinking keeps the allocation.
    pub fn resize(&mut self, width: u32, height: u32) {
        let len = width as usize * height as usize;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, PackedRgba::TRANSPARENT);
    }

    /// Release the backing buffer. The surface becomes 0x0.
    pub fn release(&mut self) {
        self.width = 0;
        self.height = 0;
        self.pixels = Vec::new();
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<PackedRgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite one pixel. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Blend one pixel. Out-of-bounds writes are dropped.
    #[inline]
    pub fn blend(&mut self, x: i32, y: i32, color: PackedRgba, mode: BlendMode) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = mode.blend(color, self.pixels[i]);
        }
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: PackedRgba) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.fill(PackedRgba::TRANSPARENT);
    }

    /// Fade every pixel toward transparent by `amount` of its alpha.
    ///
    /// Any visible pixel loses at least one alpha step, so trails always
    /// vanish in a bounded number of calls.
    pub fn fade(&mut self, amount: f32) {
        let amount = if amount.is_nan() {
            0.0
        } else {
            amount.clamp(0.0, 1.0)
        };
        if amount == 0.0 {
            return;
        }
        for px in &mut self.pixels {
            let a = px.a();
            if a == 0 {
                continue;
            }
            let drop = ((f32::from(a) * amount).round() as u8).max(1);
            *px = px.with_alpha(a.saturating_sub(drop));
        }
    }

    /// Composite `other` onto this surface with `mode`. Sizes must match;
    /// otherwise only the overlapping region is drawn.
    pub fn composite(&mut self, other: &Surface, mode: BlendMode) {
        let w = self.width.min(other.width) as usize;
        let h = self.height.min(other.height) as usize;
        for y in 0..h {
            let dst_row = y * self.width as usize;
            let src_row = y * other.width as usize;
            for x in 0..w {
                let dst = &mut self.pixels[dst_row + x];
                *dst = mode.blend(other.pixels[src_row + x], *dst);
            }
        }
    }

    /// Count of pixels with non-zero alpha.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.a() > 0).count()
    }
}
