//! # Session
//!
//! The toolbar as the engine sees it: current tool, color, brush size,
//! opacity, filter, and the text tool's font settings. Lives as long as the
//! drawing session; sliders clamp on the way in.

use crate::color::{Rgb8, Rgba8};
use crate::filter::Filter;

#[derive(
    strum::AsRefStr,
    strum::EnumIter,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Default,
)]
#[repr(u8)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Line,
    Text,
}

pub const BRUSH_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=50;
pub const OPACITY_RANGE: std::ops::RangeInclusive<u8> = 1..=100;
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 8..=72;

#[derive(Clone, PartialEq, Debug)]
pub struct Session {
    pub tool: Tool,
    pub color: Rgb8,
    pub filter: Filter,
    pub font_family: String,
    brush_size: u32,
    opacity: u8,
    font_size: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: Rgb8::BLACK,
            filter: Filter::default(),
            font_family: "Arial".into(),
            brush_size: 5,
            opacity: 100,
            font_size: 16,
        }
    }
}

impl Session {
    #[must_use]
    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }
    pub fn set_brush_size(&mut self, px: u32) {
        self.brush_size = px.clamp(*BRUSH_SIZE_RANGE.start(), *BRUSH_SIZE_RANGE.end());
    }
    #[must_use]
    pub fn opacity(&self) -> u8 {
        self.opacity
    }
    pub fn set_opacity(&mut self, percent: u8) {
        self.opacity = percent.clamp(*OPACITY_RANGE.start(), *OPACITY_RANGE.end());
    }
    #[must_use]
    pub fn font_size(&self) -> u32 {
        self.font_size
    }
    pub fn set_font_size(&mut self, px: u32) {
        self.font_size = px.clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end());
    }
    /// The color strokes are actually laid down with: the picked color with
    /// the opacity percentage baked into alpha.
    #[must_use]
    pub fn stroke_color(&self) -> Rgba8 {
        self.color.with_opacity(self.opacity)
    }
}

#[cfg(test)]
mod test {
    use super::Session;

    #[test]
    fn sliders_clamp() {
        let mut session = Session::default();
        session.set_brush_size(0);
        assert_eq!(session.brush_size(), 1);
        session.set_brush_size(500);
        assert_eq!(session.brush_size(), 50);
        session.set_opacity(0);
        assert_eq!(session.opacity(), 1);
        session.set_opacity(101);
        assert_eq!(session.opacity(), 100);
        session.set_font_size(1);
        assert_eq!(session.font_size(), 8);
        session.set_font_size(1000);
        assert_eq!(session.font_size(), 72);
    }
    #[test]
    fn stroke_color_bakes_opacity() {
        let mut session = Session::default();
        session.set_opacity(50);
        assert_eq!(session.stroke_color().a(), 128);
    }
}
