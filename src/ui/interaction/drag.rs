//! Pointer-captured drag and drop for the recipe grid.
//!
//! A press on a palette item captures the pointer. While captured, every
//! move is hit-tested against drop targets; the release drops onto the
//! target under the pointer, if any. Terminals often report a stray click
//! right after the release, so clicks within [`CLICK_GUARD`] of a drop are
//! ignored.

use std::time::{Duration, Instant};

use super::hit_area::DropTarget;

pub const CLICK_GUARD: Duration = Duration::from_millis(50);

/// A completed drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
    pub palette_index: usize,
    pub target: DropTarget,
}

#[derive(Debug, Default)]
pub struct DragState {
    captured: Option<usize>,
    hover: Option<DropTarget>,
    pointer: Option<(u16, u16)>,
    last_drop: Option<Instant>,
}

impl DragState {
    pub fn capture(&mut self, palette_index: usize, x: u16, y: u16) {
        self.captured = Some(palette_index);
        self.pointer = Some((x, y));
        self.hover = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.captured.is_some()
    }

    pub fn dragged(&self) -> Option<usize> {
        self.captured
    }

    pub fn hover(&self) -> Option<DropTarget> {
        self.hover
    }

    pub fn pointer(&self) -> Option<(u16, u16)> {
        self.pointer
    }

    /// Track the pointer. Returns true when the hovered target changed.
    pub fn move_to(&mut self, x: u16, y: u16, target: Option<DropTarget>) -> bool {
        if self.captured.is_none() {
            return false;
        }
        self.pointer = Some((x, y));
        let changed = self.hover != target;
        self.hover = target;
        changed
    }

    /// End the capture. Yields a drop if the release landed on a target.
    pub fn release(&mut self, target: Option<DropTarget>, now: Instant) -> Option<DropEvent> {
        let palette_index = self.captured.take()?;
        self.hover = None;
        self.pointer = None;
        self.last_drop = Some(now);
        target.map(|target| DropEvent {
            palette_index,
            target,
        })
    }

    pub fn cancel(&mut self) {
        self.captured = None;
        self.hover = None;
        self.pointer = None;
    }

    /// Whether a click at `now` is the echo of a drop.
    pub fn suppresses_click(&self, now: Instant) -> bool {
        self.last_drop
            .is_some_and(|at| now.saturating_duration_since(at) < CLICK_GUARD)
    }
}
