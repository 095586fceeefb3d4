//! Color theme for the TUI panes.

use ratatui::style::{Color, Modifier, Style};

/// Fixed color palette for the reader.
#[derive(Debug, Clone)]
pub struct Theme {
    pub title_bar_fg: Color,
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Sidebar
    pub book_fg: Color,
    pub chapter_fg: Color,
    pub chapter_num_fg: Color,
    pub section_fg: Color,
    pub section_marker_fg: Color,
    pub active_fg: Color,

    // Content
    pub heading_fg: Color,
    pub note_fg: Color,
    pub note_border_fg: Color,
    pub solution_fg: Color,
    pub equation_fg: Color,
    pub equation_tag_fg: Color,
    pub figure_fg: Color,
    pub caption_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,
    pub hint_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title_bar_fg: Color::Cyan,
            border_focused: Color::Cyan,
            border_unfocused: Color::DarkGray,
            selection_bg: Color::Rgb(40, 70, 100),
            selection_fg: Color::White,

            book_fg: Color::LightYellow,
            chapter_fg: Color::White,
            chapter_num_fg: Color::DarkGray,
            section_fg: Color::Gray,
            section_marker_fg: Color::LightBlue,
            active_fg: Color::LightCyan,

            heading_fg: Color::LightYellow,
            note_fg: Color::LightCyan,
            note_border_fg: Color::Cyan,
            solution_fg: Color::LightGreen,
            equation_fg: Color::LightMagenta,
            equation_tag_fg: Color::DarkGray,
            figure_fg: Color::LightBlue,
            caption_fg: Color::DarkGray,

            status_bg: Color::Rgb(0, 80, 120),
            status_fg: Color::White,
            hint_fg: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Border style for a pane depending on focus.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border_unfocused)
        }
    }

    /// Highlight style for the selected sidebar row.
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }
}
