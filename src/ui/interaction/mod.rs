//! Mouse interaction: hit areas registered during render, and drag state.

pub mod drag;
pub mod hit_area;

pub use drag::{DragState, DropEvent, CLICK_GUARD};
pub use hit_area::{Button, ClickAction, DropTarget, HitArea, HitAreaRegistry};
