//! # Color
//!
//! 8-bit straight-alpha pixels and the blending math the raster module is
//! built on. Stroke colors come from an opaque [`Rgb8`] plus the session's
//! opacity percentage, baked into the alpha channel at gesture start.

/// A straight (non-premultiplied) RGBA pixel, 8 bits per channel.
#[repr(transparent)]
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Default, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
    pub const TRANSPARENT: Self = Self([0; 4]);
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255; 4]);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }
    #[must_use]
    pub const fn a(self) -> u8 {
        self.0[3]
    }
    /// Paint `self` onto `dst`, source-over.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let sa = u32::from(self.a());
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        // Weights of the two colors in the result, both scaled by 255.
        let da = u32::from(dst.a()) * (255 - sa) / 255;
        let out_a = sa + da;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }
        let channel =
            |s: u8, d: u8| ((u32::from(s) * sa + u32::from(d) * da + out_a / 2) / out_a) as u8;
        Self([
            channel(self.0[0], dst.0[0]),
            channel(self.0[1], dst.0[1]),
            channel(self.0[2], dst.0[2]),
            out_a as u8,
        ])
    }
    /// Knock `self`'s alpha out of `dst`, destination-out. The eraser.
    #[must_use]
    pub fn erase(self, dst: Self) -> Self {
        let keep = 255 - u32::from(self.a());
        let out_a = (u32::from(dst.a()) * keep / 255) as u8;
        if out_a == 0 {
            // Normalize fully erased pixels to transparent black.
            Self::TRANSPARENT
        } else {
            Self([dst.0[0], dst.0[1], dst.0[2], out_a])
        }
    }
}

/// An opaque RGB color, as picked in a color well.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgb8(pub [u8; 3]);

impl Rgb8 {
    pub const BLACK: Self = Self([0; 3]);
    pub const WHITE: Self = Self([255; 3]);

    /// Parse a `#rrggbb` hex color. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError::Malformed);
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError::Malformed)
        };
        Ok(Self([parse(0..2)?, parse(2..4)?, parse(4..6)?]))
    }
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8([self.0[0], self.0[1], self.0[2], a])
    }
    /// Bake a 1..=100 opacity percentage into the alpha channel, rounding the
    /// same way the toolbar's `opacity * 2.55` did.
    #[must_use]
    pub fn with_opacity(self, percent: u8) -> Rgba8 {
        let alpha = (u32::from(percent) * 255 + 50) / 100;
        self.with_alpha(alpha.min(255) as u8)
    }
}
impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorParseError {
    #[error("expected a #rrggbb hex color")]
    Malformed,
}
