//! # Editor
//!
//! The single owner of all drawing state. Pointer input arrives as
//! [`PointerEvent`] commands; the editor maps them into raster space,
//! mutates the active layer (or the shape preview), recomposites the
//! display synchronously, and snapshots history once per completed gesture.
//! Nothing else holds a reference to a layer buffer across events.

use crate::blend::BlendOp;
use crate::composite;
use crate::export::{self, ExportError};
use crate::history::History;
use crate::raster::Raster;
use crate::state::layers::{LayerID, LayerStack};
use crate::state::session::{Session, Tool};
use crate::text::TextPainter;
use crate::tools::{self, Gesture, PointerEvent, ShapeKind};

pub struct Editor {
    pub session: Session,
    layers: LayerStack,
    history: History,
    /// What the shell shows. Equals the composite after any edit, or the
    /// restored snapshot right after undo/redo.
    display: Raster,
    /// Present only while a shape gesture is in flight.
    preview: Option<Raster>,
    gesture: Option<Gesture>,
    /// Where a text entry box is currently open, in raster space.
    pending_text: Option<[f32; 2]>,
    text: TextPainter,
    /// On-screen size of the canvas element, for pointer mapping.
    display_size: [f32; 2],
}

impl Editor {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_fonts(width, height, TextPainter::new())
    }
    /// Construct with a caller-supplied font set (or [`TextPainter::empty`]).
    #[must_use]
    pub fn with_fonts(width: u32, height: u32, text: TextPainter) -> Self {
        let session = Session::default();
        let layers = LayerStack::new(width, height);
        let display = composite::render(&layers, None, session.filter);
        let history = History::new(display.clone());
        Self {
            session,
            layers,
            history,
            display,
            preview: None,
            gesture: None,
            pending_text: None,
            text,
            display_size: [width as f32, height as f32],
        }
    }

    /// Tell the editor how large the canvas is drawn on screen, so pointer
    /// positions can be mapped back into pixels.
    pub fn set_display_size(&mut self, size: [f32; 2]) {
        self.display_size = size;
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(self.map(pos)),
            PointerEvent::Move(pos) => self.pointer_move(self.map(pos)),
            PointerEvent::Up => self.pointer_up(),
        }
    }

    fn map(&self, pos: [f32; 2]) -> [f32; 2] {
        tools::map_pointer(pos, self.display_size, self.layers.extent())
    }

    fn pointer_down(&mut self, pos: [f32; 2]) {
        if self.gesture.is_some() {
            // A second button press mid-gesture changes nothing.
            return;
        }
        match self.session.tool {
            Tool::Brush => {
                self.gesture = Some(Gesture::Stroke {
                    op: BlendOp::SourceOver,
                    last: pos,
                });
            }
            Tool::Eraser => {
                self.gesture = Some(Gesture::Stroke {
                    op: BlendOp::DestinationOut,
                    last: pos,
                });
            }
            Tool::Rectangle | Tool::Circle | Tool::Line => {
                let [width, height] = self.layers.extent();
                self.preview = Some(Raster::new(width, height));
                self.gesture = Some(Gesture::Shape {
                    kind: shape_of(self.session.tool),
                    anchor: pos,
                    cursor: pos,
                });
            }
            Tool::Text => {
                // Open (or move) the entry box; the shell calls back with
                // `commit_text` on Enter or blur.
                self.pending_text = Some(pos);
            }
        }
    }

    fn pointer_move(&mut self, pos: [f32; 2]) {
        match &mut self.gesture {
            Some(Gesture::Stroke { op, last }) => {
                let (op, from) = (*op, *last);
                *last = pos;
                let color = self.session.stroke_color();
                let width = self.session.brush_size() as f32;
                let Some(layer) = self.layers.active_layer_mut() else {
                    return;
                };
                layer.raster.dab_line(from, pos, width, color, op);
                self.recomposite();
            }
            Some(Gesture::Shape {
                kind,
                anchor,
                cursor,
            }) => {
                *cursor = pos;
                let (kind, anchor) = (*kind, *anchor);
                let color = self.session.stroke_color();
                let width = self.session.brush_size() as f32;
                if let Some(preview) = &mut self.preview {
                    preview.clear();
                    tools::paint_shape(preview, kind, anchor, pos, width, color);
                }
                self.recomposite();
            }
            None => {}
        }
    }

    fn pointer_up(&mut self) {
        match self.gesture.take() {
            Some(Gesture::Stroke { .. }) => {
                // The paint is already down; this just seals the gesture.
                self.commit();
            }
            Some(Gesture::Shape {
                kind,
                anchor,
                cursor,
            }) => {
                let color = self.session.stroke_color();
                let width = self.session.brush_size() as f32;
                if let Some(layer) = self.layers.active_layer_mut() {
                    tools::paint_shape(&mut layer.raster, kind, anchor, cursor, width, color);
                }
                self.preview = None;
                self.commit();
            }
            None => {}
        }
    }

    /// Commit the open text entry. Empty content just dismisses the box.
    pub fn commit_text(&mut self, content: &str) {
        let Some(origin) = self.pending_text.take() else {
            return;
        };
        if content.is_empty() {
            return;
        }
        let color = self.session.stroke_color();
        let family = self.session.font_family.clone();
        let size = self.session.font_size() as f32;
        let Some(layer) = self.layers.active_layer_mut() else {
            return;
        };
        match self
            .text
            .paint(&mut layer.raster, origin, content, &family, size, color)
        {
            Ok(()) => self.commit(),
            // Degrade to a no-op; the canvas is untouched so there is
            // nothing to snapshot.
            Err(err) => log::warn!("text insertion skipped: {err}"),
        }
    }
    pub fn cancel_text(&mut self) {
        self.pending_text = None;
    }
    /// Raster-space position of the open text entry box, if any.
    #[must_use]
    pub fn pending_text(&self) -> Option<[f32; 2]> {
        self.pending_text
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.display = snapshot.clone();
        }
    }
    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.display = snapshot.clone();
        }
    }
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
    /// Wipe every layer and record the blank canvas as an edit, so clearing
    /// itself can be undone.
    pub fn clear(&mut self) {
        self.layers.clear_all();
        self.gesture = None;
        self.preview = None;
        self.commit();
    }

    pub fn add_layer(&mut self) -> LayerID {
        // The fresh layer is transparent; the composite is unchanged.
        self.layers.add_auto()
    }
    pub fn remove_layer(&mut self, id: LayerID) -> bool {
        let removed = self.layers.remove(id);
        if removed {
            self.recomposite();
        }
        removed
    }
    pub fn set_layer_visible(&mut self, id: LayerID, visible: bool) {
        self.layers.set_visible(id, visible);
        self.recomposite();
    }
    pub fn set_active_layer(&mut self, id: LayerID) -> bool {
        self.layers.set_active(id)
    }
    #[must_use]
    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }
    pub fn set_filter(&mut self, filter: crate::filter::Filter) {
        self.session.filter = filter;
        self.recomposite();
    }
    /// Viewport resize: every layer keeps its content anchored top-left.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.layers.resize(width, height);
        if let Some(preview) = &mut self.preview {
            preview.resize_preserving(width, height);
        }
        self.recomposite();
    }

    #[must_use]
    pub fn display(&self) -> &Raster {
        &self.display
    }
    /// Flatten to a PNG for download.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        export::encode_png(&self.display)
    }

    fn recomposite(&mut self) {
        self.display = composite::render(&self.layers, self.preview.as_ref(), self.session.filter);
    }
    fn commit(&mut self) {
        self.recomposite();
        self.history.record(self.display.clone());
    }
}

fn shape_of(tool: Tool) -> ShapeKind {
    match tool {
        Tool::Rectangle => ShapeKind::Rectangle,
        Tool::Circle => ShapeKind::Circle,
        Tool::Line => ShapeKind::Line,
        // Callers only ask for shape tools.
        Tool::Brush | Tool::Eraser | Tool::Text => unreachable!(),
    }
}
