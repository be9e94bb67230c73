//! # Filters
//!
//! Whole-composite pixel filters. They run on the flattened output, never on
//! individual layers, and every one of them is a pure function of the pixel
//! data.

use crate::raster::Raster;

/// Radius of the softening blur.
const BLUR_RADIUS: i32 = 4;

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
pub enum Filter {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    Blur,
}

impl Filter {
    pub fn apply(self, raster: &mut Raster) {
        match self {
            Self::None => {}
            Self::Grayscale => grayscale(raster),
            Self::Sepia => sepia(raster),
            Self::Invert => invert(raster),
            Self::Blur => box_blur(raster, BLUR_RADIUS),
        }
    }
}

fn grayscale(raster: &mut Raster) {
    for px in raster.pixels_mut() {
        let [r, g, b, _] = px.0;
        let avg = ((u32::from(r) + u32::from(g) + u32::from(b)) / 3) as u8;
        px.0[0] = avg;
        px.0[1] = avg;
        px.0[2] = avg;
    }
}

fn sepia(raster: &mut Raster) {
    for px in raster.pixels_mut() {
        let [r, g, b, _] = px.0;
        let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
        let tone = |x: f32| x.round().min(255.0) as u8;
        px.0[0] = tone(r * 0.393 + g * 0.769 + b * 0.189);
        px.0[1] = tone(r * 0.349 + g * 0.686 + b * 0.168);
        px.0[2] = tone(r * 0.272 + g * 0.534 + b * 0.131);
    }
}

fn invert(raster: &mut Raster) {
    for px in raster.pixels_mut() {
        px.0[0] = 255 - px.0[0];
        px.0[1] = 255 - px.0[1];
        px.0[2] = 255 - px.0[2];
    }
}

/// Separable box blur over all four channels. Edge windows clamp to the
/// canvas and renormalize, so borders do not darken.
fn box_blur(raster: &mut Raster, radius: i32) {
    let [width, height] = raster.extent();
    let (w, h) = (width as i32, height as i32);
    if w == 0 || h == 0 {
        return;
    }
    // Mean of `count` pixels starting at `start`, stepping by `stride`.
    let average = |pixels: &[crate::color::Rgba8], start: usize, stride: usize, count: u32| {
        let mut sum = [0u32; 4];
        for step in 0..count as usize {
            let px = pixels[start + step * stride];
            for (acc, &channel) in sum.iter_mut().zip(px.0.iter()) {
                *acc += u32::from(channel);
            }
        }
        crate::color::Rgba8(sum.map(|total| ((total + count / 2) / count) as u8))
    };

    // Horizontal pass.
    let src = raster.pixels().to_vec();
    for y in 0..h {
        let row = (y * w) as usize;
        for x in 0..w {
            let x0 = (x - radius).max(0);
            let x1 = (x + radius).min(w - 1);
            raster.pixels_mut()[row + x as usize] =
                average(&src, row + x0 as usize, 1, (x1 - x0 + 1) as u32);
        }
    }
    // Vertical pass.
    let src = raster.pixels().to_vec();
    for x in 0..w {
        for y in 0..h {
            let y0 = (y - radius).max(0);
            let y1 = (y + radius).min(h - 1);
            raster.pixels_mut()[(y * w + x) as usize] =
                average(&src, (y0 * w + x) as usize, w as usize, (y1 - y0 + 1) as u32);
        }
    }
}

#[cfg(test)]
mod test {
    use super::Filter;
    use crate::blend::BlendOp;
    use crate::color::Rgba8;
    use crate::raster::Raster;

    fn sample() -> Raster {
        let mut raster = Raster::new(9, 9);
        raster.fill_disc([4.5, 4.5], 5.0, Rgba8::new(200, 40, 90, 255), BlendOp::SourceOver);
        raster
    }

    #[test]
    fn invert_is_an_involution() {
        let original = sample();
        let mut twice = original.clone();
        Filter::Invert.apply(&mut twice);
        assert_ne!(twice, original);
        Filter::Invert.apply(&mut twice);
        assert_eq!(twice, original);
    }
    #[test]
    fn grayscale_is_idempotent() {
        let mut once = sample();
        Filter::Grayscale.apply(&mut once);
        let mut twice = once.clone();
        Filter::Grayscale.apply(&mut twice);
        assert_eq!(once, twice);
        // And it actually flattened the channels.
        let px = once.pixel(4, 4).unwrap();
        assert_eq!(px.0[0], px.0[1]);
        assert_eq!(px.0[1], px.0[2]);
    }
    #[test]
    fn sepia_clamps_bright_pixels() {
        let mut raster = Raster::new(1, 1);
        raster.blend_pixel(0, 0, Rgba8::WHITE, BlendOp::SourceOver);
        Filter::Sepia.apply(&mut raster);
        let px = raster.pixel(0, 0).unwrap();
        // 0.393+0.769+0.189 > 1, so red saturates.
        assert_eq!(px.0[0], 255);
        assert!(px.0[1] < 255 && px.0[2] < 255);
        assert_eq!(px.a(), 255);
    }
    #[test]
    fn none_is_a_no_op() {
        let original = sample();
        let mut filtered = original.clone();
        Filter::None.apply(&mut filtered);
        assert_eq!(filtered, original);
    }
    #[test]
    fn blur_softens_edges() {
        let mut raster = Raster::new(16, 16);
        // Hard-edged opaque square in the middle.
        for y in 6..10 {
            for x in 6..10 {
                raster.blend_pixel(x, y, Rgba8::BLACK, BlendOp::SourceOver);
            }
        }
        Filter::Blur.apply(&mut raster);
        // A pixel just outside the square picked up some alpha...
        let fringe = raster.pixel(11, 8).unwrap();
        assert!(fringe.a() > 0 && fringe.a() < 255);
        // ...and the center lost some.
        let center = raster.pixel(8, 8).unwrap();
        assert!(center.a() < 255);
    }
}
