//! Colours and ARGB8888 packing.
//!
//! The framebuffer stores pixels as packed `0xAARRGGBB` words, the layout
//! SDL2's `ARGB8888` streaming texture expects.

pub const BACKGROUND: u32 = 0xFFFFFFFF;

/// An sRGB colour with straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREEN: Self = Self::rgb(0, 200, 0);

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packs into `0xAARRGGBB`.
    pub fn to_argb(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::GREEN
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Colour {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::rgba(r, g, b, a)
    }
}

/// Composites `src` over the packed pixel `dst` and returns the packed result.
///
/// The destination is treated as opaque, which holds for every framebuffer
/// this crate draws into.
#[inline]
pub fn blend_over(dst: u32, src: Colour) -> u32 {
    match src.a {
        255 => src.to_argb(),
        0 => dst,
        alpha => {
            let dst = Colour::from_argb(dst);
            let t = alpha as f32 / 255.0;
            let (r, g, b) = lerp_color(
                (dst.r as f32, dst.g as f32, dst.b as f32),
                (src.r as f32, src.g as f32, src.b as f32),
                t,
            );
            Colour::rgb(r.round() as u8, g.round() as u8, b.round() as u8).to_argb()
        }
    }
}

/// Linear interpolation between two colours given as float channels.
#[inline]
pub fn lerp_color(from: (f32, f32, f32), to: (f32, f32, f32), t: f32) -> (f32, f32, f32) {
    (
        from.0 + (to.0 - from.0) * t,
        from.1 + (to.1 - from.1) * t,
        from.2 + (to.2 - from.2) * t,
    )
}
