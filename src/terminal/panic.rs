//! Panic hook that gives the shell back before the panic report prints.

use std::panic;

use super::setup::emergency_restore;

/// Chain a terminal restore in front of the current hook (color-eyre's, when
/// installed first).
pub fn setup_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        emergency_restore();
        previous(info);
    }));
}
