//! # Text
//!
//! Click-to-place text insertion. Families are resolved with `fontdb`,
//! shaped with `rustybuzz`, and rasterized with `swash`; glyphs land on the
//! target raster as alpha masks of the stroke color. The click point is the
//! top-left of the entry box, so the baseline sits one em below it.

use crate::blend::BlendOp;
use crate::color::Rgba8;
use crate::raster::Raster;

#[derive(thiserror::Error, Debug)]
pub enum TextError {
    #[error("no installed face matches the requested family")]
    FaceNotFound,
    #[error("face data could not be parsed")]
    UnreadableFace,
}

pub struct TextPainter {
    db: fontdb::Database,
    // Caches scaling state between paints.
    scale: swash::scale::ScaleContext,
}

impl TextPainter {
    /// A painter over the system font set.
    #[must_use]
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self {
            db,
            scale: swash::scale::ScaleContext::new(),
        }
    }
    /// A painter with no faces at all. Every paint fails with
    /// [`TextError::FaceNotFound`] — for hosts and tests that never use the
    /// text tool and don't want the system-font scan.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            db: fontdb::Database::new(),
            scale: swash::scale::ScaleContext::new(),
        }
    }
    /// Number of loadable faces. A shell may warn when zero.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Render `content` onto `raster` with its top-left at `origin`.
    /// Falls back to the default sans-serif when `family` is not installed.
    pub fn paint(
        &mut self,
        raster: &mut Raster,
        origin: [f32; 2],
        content: &str,
        family: &str,
        size: f32,
        color: Rgba8,
    ) -> Result<(), TextError> {
        if content.is_empty() {
            return Ok(());
        }
        let Self { db, scale } = self;
        let query = fontdb::Query {
            families: &[fontdb::Family::Name(family), fontdb::Family::SansSerif],
            ..fontdb::Query::default()
        };
        let id = db.query(&query).ok_or(TextError::FaceNotFound)?;
        db.with_face_data(id, |data, index| {
            let face =
                rustybuzz::Face::from_slice(data, index).ok_or(TextError::UnreadableFace)?;
            let font = swash::FontRef::from_index(data, index as usize)
                .ok_or(TextError::UnreadableFace)?;
            let to_px = size / face.units_per_em() as f32;

            let mut buffer = rustybuzz::UnicodeBuffer::new();
            buffer.push_str(content);
            let glyphs = rustybuzz::shape(&face, &[], buffer);

            let mut scaler = scale.builder(font).size(size).build();
            let mut render = swash::scale::Render::new(&[
                swash::scale::Source::ColorOutline(0),
                swash::scale::Source::ColorBitmap(swash::scale::StrikeWith::BestFit),
                swash::scale::Source::Outline,
            ]);
            render.format(swash::zeno::Format::Alpha);

            let mut pen_x = origin[0];
            let baseline = origin[1] + size;
            for (info, pos) in glyphs.glyph_infos().iter().zip(glyphs.glyph_positions()) {
                let gx = pen_x + pos.x_offset as f32 * to_px;
                let gy = baseline - pos.y_offset as f32 * to_px;
                if let Some(image) = render.render(&mut scaler, info.glyph_id as u16) {
                    blit_glyph(raster, &image, gx, gy, color);
                }
                pen_x += pos.x_advance as f32 * to_px;
            }
            Ok(())
        })
        // The queried ID vanishing from the database counts as not found.
        .ok_or(TextError::FaceNotFound)?
    }
}

impl Default for TextPainter {
    fn default() -> Self {
        Self::new()
    }
}

fn blit_glyph(
    raster: &mut Raster,
    image: &swash::scale::image::Image,
    gx: f32,
    gy: f32,
    color: Rgba8,
) {
    let left = gx.round() as i32 + image.placement.left;
    let top = gy.round() as i32 - image.placement.top;
    let width = image.placement.width as usize;
    let height = image.placement.height as usize;
    if width == 0 || height == 0 {
        // Whitespace glyphs carry an advance but no bitmap.
        return;
    }
    match image.content {
        swash::scale::image::Content::Mask => {
            for row in 0..height {
                for col in 0..width {
                    let coverage = u32::from(image.data[row * width + col]);
                    if coverage == 0 {
                        continue;
                    }
                    let alpha = (u32::from(color.a()) * coverage + 127) / 255;
                    let src = Rgba8([color.0[0], color.0[1], color.0[2], alpha as u8]);
                    raster.blend_pixel(
                        left + col as i32,
                        top + row as i32,
                        src,
                        BlendOp::SourceOver,
                    );
                }
            }
        }
        swash::scale::image::Content::Color => {
            // Color-emoji strikes arrive as straight RGBA.
            for row in 0..height {
                for col in 0..width {
                    let at = (row * width + col) * 4;
                    let Some(&[r, g, b, a]) = image.data.get(at..at + 4).and_then(|px| {
                        <&[u8; 4]>::try_from(px).ok()
                    }) else {
                        return;
                    };
                    raster.blend_pixel(
                        left + col as i32,
                        top + row as i32,
                        Rgba8([r, g, b, a]),
                        BlendOp::SourceOver,
                    );
                }
            }
        }
        swash::scale::image::Content::SubpixelMask => {
            // Never requested; Format::Alpha is set above.
        }
    }
}
