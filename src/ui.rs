//! Terminal UI for trek.
//!
//! [render] is the entry point called by the event loop each frame. [panes] draws the file
//! list and the preview, [widgets] the header and footer lines.

pub mod panes;
pub mod render;
pub mod widgets;

pub use render::render;
