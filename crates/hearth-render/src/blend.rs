#![forbid(unsafe_code)]

//! Per-pixel blend modes.

use crate::color::PackedRgba;

/// How a drawn color combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Alpha-over (the layer paints on top).
    #[default]
    Over,
    /// Colors add; overlapping particles brighten instead of occluding.
    Additive,
    /// Inverse multiply; lightens without blowing out as quickly as additive.
    Screen,
}

impl BlendMode {
    /// Blend `top` onto `bottom`.
    ///
    /// `top`'s alpha weights its contribution in every mode.
    #[inline]
    pub fn blend(self, top: PackedRgba, bottom: PackedRgba) -> PackedRgba {
        if top.a() == 0 {
            return bottom;
        }
        match self {
            Self::Over => top.over(bottom),
            Self::Additive => additive(top, bottom),
            Self::Screen => screen(top, bottom),
        }
    }
}

#[inline]
fn additive(top: PackedRgba, bottom: PackedRgba) -> PackedRgba {
    let ta = f32::from(top.a()) / 255.0;
    let add = |t: u8, b: u8| (f32::from(b) + f32::from(t) * ta).round().min(255.0) as u8;
    PackedRgba::rgba(
        add(top.r(), bottom.r()),
        add(top.g(), bottom.g()),
        add(top.b(), bottom.b()),
        bottom.a().saturating_add(top.a()),
    )
}

#[inline]
fn screen(top: PackedRgba, bottom: PackedRgba) -> PackedRgba {
    let ta = f32::from(top.a()) / 255.0;
    let mix = |t: u8, b: u8| {
        let screened = 255 - ((255 - u16::from(t)) * (255 - u16::from(b)) / 255);
        (f32::from(b) * (1.0 - ta) + f32::from(screened) * ta).round() as u8
    };
    PackedRgba::rgba(
        mix(top.r(), bottom.r()),
        mix(top.g(), bottom.g()),
        mix(top.b(), bottom.b()),
        bottom.a().max(top.a()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_top_is_identity() {
        let bottom = PackedRgba::rgba(9, 8, 7, 6);
        for mode in [BlendMode::Over, BlendMode::Additive, BlendMode::Screen] {
            assert_eq!(mode.blend(PackedRgba::TRANSPARENT, bottom), bottom);
        }
    }

    #[test]
    fn additive_brightens_and_saturates() {
        let top = PackedRgba::rgb(200, 200, 200);
        let once = BlendMode::Additive.blend(top, PackedRgba::TRANSPARENT);
        let twice = BlendMode::Additive.blend(top, once);
        assert_eq!(once.r(), 200);
        assert_eq!(twice.r(), 255);
        assert_eq!(twice.a(), 255);
    }

    #[test]
    fn additive_weights_by_alpha() {
        let top = PackedRgba::rgba(200, 100, 0, 128);
        let out = BlendMode::Additive.blend(top, PackedRgba::rgba(10, 10, 10, 0));
        assert_eq!(out.r(), 110);
        assert_eq!(out.g(), 60);
        assert_eq!(out.b(), 10);
        assert_eq!(out.a(), 128);
    }

    #[test]
    fn screen_never_darkens() {
        let bottom = PackedRgba::rgb(100, 150, 200);
        let out = BlendMode::Screen.blend(PackedRgba::rgba(50, 50, 50, 200), bottom);
        assert!(out.r() >= bottom.r());
        assert!(out.g() >= bottom.g());
        assert!(out.b() >= bottom.b());
    }

    #[test]
    fn screen_with_black_is_identity() {
        let bottom = PackedRgba::rgb(100, 150, 200);
        assert_eq!(BlendMode::Screen.blend(PackedRgba::BLACK, bottom), bottom);
    }
}
