//! Action definitions for keybindings
//!
//! This module defines all bindable actions in folio.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// All bindable actions in folio
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum Action {
    // === Navigation ===
    /// Move to next sidebar row (or scroll content down when focused)
    Next,
    /// Move to previous sidebar row (or scroll content up when focused)
    Previous,
    /// Jump to first sidebar row
    First,
    /// Jump to last sidebar row
    Last,
    /// Scroll content down by page
    PageDown,
    /// Scroll content up by page
    PageUp,

    // === Sidebar ===
    /// Activate the selected row: toggle a book or chapter, open a section
    Activate,
    /// Collapse every expanded chapter across the sidebar
    CollapseAll,
    /// Toggle sidebar visibility (persisted)
    ToggleSidebar,
    /// Toggle focus between sidebar and content
    ToggleFocus,

    // === View ===
    /// Toggle help popup
    ToggleHelp,

    // === Application ===
    /// Quit folio
    Quit,
}

impl Action {
    /// Short human-readable description for the help popup
    pub fn description(&self) -> &'static str {
        match self {
            Action::Next => "Next row / scroll down",
            Action::Previous => "Previous row / scroll up",
            Action::First => "Jump to first row",
            Action::Last => "Jump to last row",
            Action::PageDown => "Page down",
            Action::PageUp => "Page up",
            Action::Activate => "Toggle book/chapter, open section",
            Action::CollapseAll => "Collapse all chapters",
            Action::ToggleSidebar => "Show/hide sidebar",
            Action::ToggleFocus => "Switch pane focus",
            Action::ToggleHelp => "Toggle this help",
            Action::Quit => "Quit",
        }
    }
}
