#![forbid(unsafe_code)]

//! Rasterization primitives: gradients, soft points, line segments, and
//! gradient-filled spans.
//!
//! Everything here clips against the surface; callers may pass coordinates
//! far outside it (projected particles often are).

use crate::blend::BlendMode;
use crate::color::PackedRgba;
use crate::surface::Surface;

/// Color stop at `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stop {
    pub offset: f32,
    pub color: PackedRgba,
}

impl Stop {
    #[inline]
    pub const fn new(offset: f32, color: PackedRgba) -> Self {
        Self { offset, color }
    }
}

/// Piecewise-linear color ramp.
///
/// Stops must be sorted by offset. Samples before the first stop take the
/// first color; samples past the last take the last.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    stops: Vec<Stop>,
}

impl Gradient {
    pub fn new(stops: impl Into<Vec<Stop>>) -> Self {
        Self {
            stops: stops.into(),
        }
    }

    #[inline]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Replace the stops in place, reusing the allocation.
    pub fn set_stops(&mut self, stops: &[Stop]) {
        self.stops.clear();
        self.stops.extend_from_slice(stops);
    }

    /// Copy of this ramp with every stop's alpha scaled by `opacity`.
    pub fn with_opacity(&self, opacity: f32) -> Self {
        Self {
            stops: self
                .stops
                .iter()
                .map(|s| Stop::new(s.offset, s.color.with_opacity(opacity)))
                .collect(),
        }
    }

    /// Color at `t`.
    pub fn sample(&self, t: f32) -> PackedRgba {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return PackedRgba::TRANSPARENT,
        };
        if t.is_nan() || t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        last.color
    }
}

/// Soft round point centered at `(cx, cy)`.
///
/// `falloff` maps normalized distance from the center (0 at the center,
/// 1 at `radius`) to a color; alpha from the ramp fades the point's edge.
pub fn soft_point(
    surface: &mut Surface,
    cx: f32,
    cy: f32,
    radius: f32,
    falloff: &Gradient,
    mode: BlendMode,
) {
    if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) || radius <= 0.0 {
        return;
    }
    let w = surface.width() as f32;
    let h = surface.height() as f32;
    if cx + radius < 0.0 || cy + radius < 0.0 || cx - radius >= w || cy - radius >= h {
        return;
    }

    // Sub-pixel points still light the pixel they land on.
    if radius < 1.0 {
        let color = falloff.sample(0.0);
        let a = (f32::from(color.a()) * radius).round() as u8;
        surface.blend(cx as i32, cy as i32, color.with_alpha(a), mode);
        return;
    }

    let x0 = (cx - radius).floor().max(0.0) as i32;
    let x1 = (cx + radius).ceil().min(w - 1.0) as i32;
    let y0 = (cy - radius).floor().max(0.0) as i32;
    let y1 = (cy + radius).ceil().min(h - 1.0) as i32;
    let inv_r = 1.0 / radius;
    for y in y0..=y1 {
        let dy = (y as f32 + 0.5 - cy) * inv_r;
        for x in x0..=x1 {
            let dx = (x as f32 + 0.5 - cx) * inv_r;
            let d = (dx * dx + dy * dy).sqrt();
            if d > 1.0 {
                continue;
            }
            surface.blend(x, y, falloff.sample(d), mode);
        }
    }
}

/// Bresenham line from `(x0, y0)` to `(x1, y1)`, both endpoints inclusive.
///
/// The segment is clipped to the surface first, so only on-surface pixels
/// are walked however far the endpoints lie outside.
pub fn line(
    surface: &mut Surface,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: PackedRgba,
    mode: BlendMode,
) {
    let Some((x0, y0, x1, y1)) = clip_segment(
        (f64::from(x0), f64::from(y0)),
        (f64::from(x1), f64::from(y1)),
        f64::from(surface.width()) - 1.0,
        f64::from(surface.height()) - 1.0,
    ) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        surface.blend(x, y, color, mode);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

// Cohen-Sutherland outcodes.
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(x: f64, y: f64, x_max: f64, y_max: f64) -> u8 {
    let mut code = INSIDE;
    if x < 0.0 {
        code |= LEFT;
    } else if x > x_max {
        code |= RIGHT;
    }
    if y < 0.0 {
        code |= TOP;
    } else if y > y_max {
        code |= BOTTOM;
    }
    code
}

/// Clip a segment to `[0, x_max] x [0, y_max]` and round the result to pixels.
/// `None` if nothing of it is visible.
fn clip_segment(
    (mut x0, mut y0): (f64, f64),
    (mut x1, mut y1): (f64, f64),
    x_max: f64,
    y_max: f64,
) -> Option<(i32, i32, i32, i32)> {
    if x_max < 0.0 || y_max < 0.0 {
        return None;
    }
    let mut c0 = outcode(x0, y0, x_max, y_max);
    let mut c1 = outcode(x1, y1, x_max, y_max);
    // Each pass pins one endpoint to one edge; four passes always suffice.
    for _ in 0..4 {
        if c0 | c1 == INSIDE {
            break;
        }
        if c0 & c1 != INSIDE {
            return None;
        }
        let out = if c0 != INSIDE { c0 } else { c1 };
        let (x, y) = if out & TOP != 0 {
            (x0 + (x1 - x0) * (0.0 - y0) / (y1 - y0), 0.0)
        } else if out & BOTTOM != 0 {
            (x0 + (x1 - x0) * (y_max - y0) / (y1 - y0), y_max)
        } else if out & RIGHT != 0 {
            (x_max, y0 + (y1 - y0) * (x_max - x0) / (x1 - x0))
        } else {
            (0.0, y0 + (y1 - y0) * (0.0 - x0) / (x1 - x0))
        };
        if out == c0 {
            (x0, y0) = (x, y);
            c0 = outcode(x0, y0, x_max, y_max);
        } else {
            (x1, y1) = (x, y);
            c1 = outcode(x1, y1, x_max, y_max);
        }
    }
    let px = |v: f64, max: f64| v.round().clamp(0.0, max) as i32;
    Some((px(x0, x_max), px(y0, y_max), px(x1, x_max), px(y1, y_max)))
}

/// Fill column `x` from `y_top` (inclusive) to `y_bottom` (exclusive).
///
/// Color comes from `gradient` evaluated over `[grad_y0, grad_y1]` in
/// surface coordinates, so neighbouring columns share one ramp.
#[allow(clippy::too_many_arguments)]
pub fn vertical_span(
    surface: &mut Surface,
    x: i32,
    y_top: f32,
    y_bottom: f32,
    gradient: &Gradient,
    grad_y0: f32,
    grad_y1: f32,
    mode: BlendMode,
) {
    if x < 0 || x >= surface.width() as i32 || !(y_top.is_finite() && y_bottom.is_finite()) {
        return;
    }
    let y0 = y_top.round().max(0.0) as i32;
    let y1 = y_bottom.round().min(surface.height() as f32) as i32;
    let range = grad_y1 - grad_y0;
    for y in y0..y1 {
        let t = if range.abs() <= f32::EPSILON {
            0.0
        } else {
            (y as f32 + 0.5 - grad_y0) / range
        };
        surface.blend(x, y, gradient.sample(t), mode);
    }
}

/// Horizontal edges of a trapezoid row: `(left, right)` in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub left: f32,
    pub right: f32,
}

impl Edge {
    #[inline]
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }
}

/// Fill a trapezoid whose top edge sits at `y_top` and bottom at `y_bottom`,
/// with a vertical gradient running from top (t = 0) to bottom (t = 1).
pub fn trapezoid(
    surface: &mut Surface,
    top: Edge,
    bottom: Edge,
    y_top: f32,
    y_bottom: f32,
    gradient: &Gradient,
    mode: BlendMode,
) {
    let height = y_bottom - y_top;
    if !height.is_finite() || height <= 0.0 {
        return;
    }
    let y0 = y_top.round().max(0.0) as i32;
    let y1 = y_bottom.round().min(surface.height() as f32) as i32;
    let w = surface.width() as f32;
    for y in y0..y1 {
        let t = ((y as f32 + 0.5 - y_top) / height).clamp(0.0, 1.0);
        let left = top.left + (bottom.left - top.left) * t;
        let right = top.right + (bottom.right - top.right) * t;
        let color = gradient.sample(t);
        let x0 = left.round().max(0.0) as i32;
        let x1 = right.round().min(w) as i32;
        for x in x0..x1 {
            surface.blend(x, y, color, mode);
        }
    }
}

/// Fill the whole surface with `color` using `mode`.
pub fn wash(surface: &mut Surface, color: PackedRgba, mode: BlendMode) {
    if color.a() == 0 {
        return;
    }
    let (w, h) = (surface.width() as i32, surface.height() as i32);
    for y in 0..h {
        for x in 0..w {
            surface.blend(x, y, color, mode);
        }
    }
}
