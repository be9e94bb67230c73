//! # Compositing
//!
//! Flattens the visible layers into the single displayed raster — painter's
//! algorithm, bottom layer first — with the transient shape preview blitted
//! above all of them, then the session filter applied to the whole image.
//! Recomputed synchronously on every mutation; no dirty-rect tracking.

use crate::filter::Filter;
use crate::raster::Raster;
use crate::state::layers::LayerStack;

#[must_use]
pub fn render(layers: &LayerStack, preview: Option<&Raster>, filter: Filter) -> Raster {
    let [width, height] = layers.extent();
    let mut out = Raster::new(width, height);
    for layer in layers.iter().filter(|layer| layer.visible) {
        out.blit_over(&layer.raster);
    }
    if let Some(preview) = preview {
        out.blit_over(preview);
    }
    filter.apply(&mut out);
    out
}
