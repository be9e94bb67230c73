//! # Export
//!
//! Flatten-to-PNG for the shell's download button. The composite is already
//! a straight-alpha RGBA8 buffer, which is exactly what PNG wants.

use crate::raster::Raster;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("png encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Encode the raster as an RGBA8 PNG.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut bytes, raster.width(), raster.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(raster.as_bytes())?;
    writer.finish()?;
    Ok(bytes)
}

#[cfg(test)]
mod test {
    use super::encode_png;
    use crate::blend::BlendOp;
    use crate::color::Rgba8;
    use crate::raster::Raster;

    #[test]
    fn encodes_a_well_formed_png() {
        let mut raster = Raster::new(16, 9);
        raster.fill_disc([8.0, 4.0], 6.0, Rgba8::new(30, 90, 200, 255), BlendOp::SourceOver);
        let bytes = encode_png(&raster).unwrap();
        // PNG signature.
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert!(bytes.len() > 8);
    }
}
