//! Session-lifetime drawing state: the layer stack and the toolbar settings.

pub mod layers;
pub mod session;

pub use layers::{Layer, LayerID, LayerStack};
pub use session::{Session, Tool};
