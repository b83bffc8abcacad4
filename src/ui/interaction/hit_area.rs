//! Clickable regions.
//!
//! Widgets register their rectangles while rendering; the event loop asks
//! the registry what lies under the pointer. The registry is cleared at the
//! start of every frame, so it always describes what is on screen.

use ratatui::layout::Rect;

use crate::app::{Screen, SettingsSection};

/// Grid slot or output cell that accepts a dragged palette item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    GridSlot(usize),
    Output,
}

/// Buttons drawn in screen toolbars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    Refresh,
    ToggleInstance,
    PreviousPage,
    NextPage,
    ToggleSource,
    InstallMod,
    ToggleResourceType,
    ToggleMonitoring,
    CancelOperation(String),
    ClearFinished,
    CycleRecipeKind,
    CycleFormat,
    ClearGrid,
    PreviewPatch,
    ApplyPatch,
    PreviewSync,
    ExecuteSync,
    StartImport,
    StartExport,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    SwitchScreen(Screen),
    SelectSection(SettingsSection),
    /// Row of the screen's main list.
    SelectRow(usize),
    /// Row of a screen's second list (launcher instances, translation
    /// entries).
    SelectDetailRow(usize),
    Press(Button),
    /// Pressing starts a drag of this palette item.
    PaletteItem(usize),
    /// Grid slot; a click clears it.
    GridSlot(usize),
    OutputSlot,
    DismissToast(u64),
}

#[derive(Debug, Clone)]
pub struct HitArea {
    pub rect: Rect,
    pub action: ClickAction,
    pub drop_target: Option<DropTarget>,
}

impl HitArea {
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.rect.x
            && x < self.rect.x.saturating_add(self.rect.width)
            && y >= self.rect.y
            && y < self.rect.y.saturating_add(self.rect.height)
    }
}

#[derive(Debug, Default)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.areas.clear();
    }

    /// Later registrations sit on top of earlier ones.
    pub fn register(&mut self, rect: Rect, action: ClickAction) {
        self.areas.push(HitArea {
            rect,
            action,
            drop_target: None,
        });
    }

    /// Register an area that is also a drop target.
    pub fn register_drop_target(&mut self, rect: Rect, action: ClickAction, target: DropTarget) {
        self.areas.push(HitArea {
            rect,
            action,
            drop_target: Some(target),
        });
    }

    /// Topmost action under the point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ClickAction> {
        self.areas
            .iter()
            .rev()
            .find(|area| area.contains(x, y))
            .map(|area| area.action.clone())
    }

    /// Topmost drop target under the point, ignoring plain areas.
    pub fn drop_target_at(&self, x: u16, y: u16) -> Option<DropTarget> {
        self.areas
            .iter()
            .rev()
            .filter(|area| area.contains(x, y))
            .find_map(|area| area.drop_target)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: u16, y: u16, width: u16, height: u16) -> Rect {
        Rect::new(x, y, width, height)
    }

    #[test]
    fn test_contains_edges() {
        let area = HitArea {
            rect: rect(10, 5, 4, 2),
            action: ClickAction::SelectRow(0),
            drop_target: None,
        };
        assert!(area.contains(10, 5));
        assert!(area.contains(13, 6));
        assert!(!area.contains(14, 5));
        assert!(!area.contains(10, 7));
        assert!(!area.contains(9, 5));
    }

    #[test]
    fn test_zero_size_area_never_hits() {
        let mut registry = HitAreaRegistry::new();
        registry.register(rect(3, 3, 0, 0), ClickAction::OutputSlot);
        assert_eq!(registry.hit_test(3, 3), None);
    }

    #[test]
    fn test_topmost_wins() {
        let mut registry = HitAreaRegistry::new();
        registry.register(rect(0, 0, 20, 10), ClickAction::SelectRow(0));
        registry.register(rect(5, 5, 2, 1), ClickAction::Press(Button::Save));
        assert_eq!(registry.hit_test(5, 5), Some(ClickAction::Press(Button::Save)));
        assert_eq!(registry.hit_test(1, 1), Some(ClickAction::SelectRow(0)));
    }

    #[test]
    fn test_drop_target_lookup_skips_plain_areas() {
        let mut registry = HitAreaRegistry::new();
        registry.register_drop_target(rect(0, 0, 5, 3), ClickAction::GridSlot(4), DropTarget::GridSlot(4));
        registry.register(rect(0, 0, 5, 1), ClickAction::Press(Button::ClearGrid));
        assert_eq!(registry.drop_target_at(1, 0), Some(DropTarget::GridSlot(4)));
        assert_eq!(registry.drop_target_at(9, 9), None);
    }

    #[test]
    fn test_clear() {
        let mut registry = HitAreaRegistry::new();
        registry.register(rect(0, 0, 1, 1), ClickAction::OutputSlot);
        assert_eq!(registry.len(), 1);
        registry.clear();
        assert!(registry.is_empty());
    }
}
