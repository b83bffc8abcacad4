//! Widgets shared by the screens.

mod button_bar;
mod dialog_frame;
mod list;
mod status_indicator;
mod tab_selector;

pub use button_bar::{render_button_bar, ButtonSpec};
pub use dialog_frame::render_dialog_frame;
pub use list::{render_list, window_start, ListSpec};
pub use status_indicator::{loadable_status, spinner_char};
pub use tab_selector::{render_tab_selector, TabItem};
