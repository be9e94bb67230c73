//! # Tools
//!
//! The vocabulary of the drawing gestures. Pointer input arrives as explicit
//! [`PointerEvent`] commands and a single owner of the rasters (the editor)
//! applies them — no handler ever holds its own reference to a layer across
//! events. This module also carries the display-to-raster coordinate mapping
//! and the shape rasterization shared by preview and commit.

use crate::blend::BlendOp;
use crate::color::Rgba8;
use crate::raster::Raster;

/// One step of a gesture, in display (on-screen element) coordinates.
///
/// `Up` carries no position: releasing outside the canvas must still end the
/// gesture, and the last mapped `Move` position is already known.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PointerEvent {
    Down([f32; 2]),
    Move([f32; 2]),
    Up,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
}

/// An in-flight gesture. One exists from `Down` to `Up`, at most.
#[derive(Copy, Clone, PartialEq, Debug)]
pub(crate) enum Gesture {
    /// Brush or eraser: paint lands on the active layer as the pointer moves.
    Stroke { op: BlendOp, last: [f32; 2] },
    /// Shape drag: paint lands on the preview raster until release.
    Shape {
        kind: ShapeKind,
        anchor: [f32; 2],
        cursor: [f32; 2],
    },
}

/// Map a display-space position into raster pixel space, scaling each axis
/// independently so hits stay accurate when layout stretches the canvas.
#[must_use]
pub fn map_pointer(pos: [f32; 2], display: [f32; 2], raster: [u32; 2]) -> [f32; 2] {
    let scale = |v: f32, shown: f32, actual: u32| {
        if shown <= 0.0 {
            0.0
        } else {
            v * actual as f32 / shown
        }
    };
    [
        scale(pos[0], display[0], raster[0]),
        scale(pos[1], display[1], raster[1]),
    ]
}

/// Stroke a shape outline between anchor and cursor with the brush width.
/// Used both for the live preview and for the final commit.
pub(crate) fn paint_shape(
    raster: &mut Raster,
    kind: ShapeKind,
    anchor: [f32; 2],
    cursor: [f32; 2],
    width: f32,
    color: Rgba8,
) {
    let op = BlendOp::SourceOver;
    match kind {
        ShapeKind::Line => raster.dab_line(anchor, cursor, width, color, op),
        ShapeKind::Rectangle => {
            let opposite_x = [cursor[0], anchor[1]];
            let opposite_y = [anchor[0], cursor[1]];
            raster.dab_line(anchor, opposite_x, width, color, op);
            raster.dab_line(opposite_x, cursor, width, color, op);
            raster.dab_line(cursor, opposite_y, width, color, op);
            raster.dab_line(opposite_y, anchor, width, color, op);
        }
        ShapeKind::Circle => {
            // Center at the anchor, radius out to the cursor.
            let dx = cursor[0] - anchor[0];
            let dy = cursor[1] - anchor[1];
            let radius = (dx * dx + dy * dy).sqrt();
            if radius < 0.5 {
                raster.fill_disc(anchor, width, color, op);
                return;
            }
            let spacing = (width * 0.25).max(0.5);
            let dabs = ((std::f32::consts::TAU * radius / spacing).ceil() as u32).max(8);
            for dab in 0..dabs {
                let theta = dab as f32 / dabs as f32 * std::f32::consts::TAU;
                raster.fill_disc(
                    [
                        anchor[0] + radius * theta.cos(),
                        anchor[1] + radius * theta.sin(),
                    ],
                    width,
                    color,
                    op,
                );
            }
        }
    }
}
