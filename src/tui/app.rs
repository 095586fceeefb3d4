use crate::assets::AssetPaths;
use crate::config::Config;
use crate::content;
use crate::keybindings::Keybindings;
use crate::library::{Library, section_heading};
use crate::render::{self, Element};
use crate::tui::theme::Theme;
use ratatui::widgets::{ListState, ScrollbarState};
use std::collections::{HashMap, HashSet};

/// Notice shown when a selected section has no content file mapped yet.
/// Kept in the content locale, matching the library data.
pub const MISSING_CONTENT_NOTICE: &str = "Энэ хэсгийн агуулга одоогоор бэлэн болоогүй байна.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// The single active selection, overwritten on each navigation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub chapter_id: Option<String>,
    pub section_id: Option<String>,
}

/// What a flattened sidebar row points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowKind {
    Book {
        book: usize,
    },
    Chapter {
        book: usize,
        chapter: usize,
    },
    Section {
        book: usize,
        chapter: usize,
        section: usize,
    },
}

/// One visible row of the sidebar menu.
#[derive(Debug, Clone)]
pub struct SidebarRow {
    pub kind: RowKind,
    pub text: String,
    /// Section label column (`§ n.m`, `?`, or none).
    pub marker: Option<String>,
    pub expanded: bool,
    pub expandable: bool,
    pub active: bool,
}

pub struct App {
    pub library: Library,
    pub assets: AssetPaths,
    pub theme: Theme,
    pub keybindings: Keybindings,

    pub focus: Focus,
    pub sidebar_visible: bool,
    pub sidebar_rows: Vec<SidebarRow>,
    pub sidebar_state: ListState,
    pub sidebar_scroll_state: ScrollbarState,

    pub selection: SelectionState,
    pub document_title: String,
    pub elements: Vec<Element>,
    pub content_scroll: u16,
    pub content_height: u16,
    pub content_scroll_state: ScrollbarState,

    pub show_help: bool,
    pub status_message: Option<String>,
    /// Last chapter-load failure. Kept for inspection only; a failed load
    /// leaves the displayed content and selection untouched.
    pub last_load_error: Option<String>,

    // Expansion state. Books expand independently; chapters follow accordion
    // semantics, at most one open per book.
    expanded_books: HashSet<usize>,
    open_chapters: HashMap<usize, usize>,

    config: Config,
}

impl App {
    pub fn new(library: Library, assets: AssetPaths, config: Config) -> Self {
        let keybindings = config.keybindings();

        // First book starts expanded, all others collapsed.
        let mut expanded_books = HashSet::new();
        if !library.books.is_empty() {
            expanded_books.insert(0);
        }

        let mut app = Self {
            library,
            assets,
            theme: Theme::default(),
            keybindings,
            focus: Focus::Sidebar,
            sidebar_visible: !config.ui.sidebar_collapsed,
            sidebar_rows: Vec::new(),
            sidebar_state: ListState::default(),
            sidebar_scroll_state: ScrollbarState::default(),
            selection: SelectionState::default(),
            document_title: String::new(),
            elements: Vec::new(),
            content_scroll: 0,
            content_height: 0,
            content_scroll_state: ScrollbarState::default(),
            show_help: false,
            status_message: None,
            last_load_error: None,
            expanded_books,
            open_chapters: HashMap::new(),
            config,
        };

        app.rebuild_sidebar();
        if !app.sidebar_rows.is_empty() {
            app.sidebar_state.select(Some(0));
        }
        app
    }

    pub fn sidebar_width(&self) -> u16 {
        self.config.ui.sidebar_width
    }

    /// Load the first book's first chapter, if the library has one.
    pub fn load_initial_chapter(&mut self) {
        let Some(chapter_id) = self
            .library
            .books
            .first()
            .and_then(|book| book.chapters.first())
            .map(|chapter| chapter.id.clone())
        else {
            return;
        };
        self.navigate(0, &chapter_id, None);
    }

    // === Sidebar construction ===

    /// Flatten the library into visible rows according to the current
    /// expansion and selection state. Active markers are derived from
    /// [`SelectionState`] on every rebuild, which makes the
    /// clear-then-set reflection idempotent by construction.
    pub fn rebuild_sidebar(&mut self) {
        let mut rows = Vec::new();

        for (book_idx, book) in self.library.books.iter().enumerate() {
            let book_expanded = self.expanded_books.contains(&book_idx);
            rows.push(SidebarRow {
                kind: RowKind::Book { book: book_idx },
                text: book.title.clone(),
                marker: None,
                expanded: book_expanded,
                expandable: !book.chapters.is_empty(),
                active: false,
            });
            if !book_expanded {
                continue;
            }

            for (chapter_idx, chapter) in book.chapters.iter().enumerate() {
                let chapter_open = self.open_chapters.get(&book_idx) == Some(&chapter_idx);
                let chapter_active = self.selection.chapter_id.as_deref() == Some(&chapter.id);
                rows.push(SidebarRow {
                    kind: RowKind::Chapter {
                        book: book_idx,
                        chapter: chapter_idx,
                    },
                    // Chapters are auto-numbered by position, not by a stored field.
                    text: format!("{}. {}", chapter_idx + 1, chapter.title),
                    marker: None,
                    expanded: chapter_open,
                    expandable: !chapter.sections.is_empty(),
                    active: chapter_active,
                });
                if !chapter_open {
                    continue;
                }

                for (section_idx, section) in chapter.sections.iter().enumerate() {
                    let heading = section_heading(&section.title, &section.id);
                    let section_active = chapter_active
                        && self.selection.section_id.as_deref() == Some(&section.id);
                    rows.push(SidebarRow {
                        kind: RowKind::Section {
                            book: book_idx,
                            chapter: chapter_idx,
                            section: section_idx,
                        },
                        text: heading.title,
                        marker: heading.marker,
                        expanded: false,
                        expandable: false,
                        active: section_active,
                    });
                }
            }
        }

        self.sidebar_rows = rows;
        self.sidebar_scroll_state = ScrollbarState::new(self.sidebar_rows.len());

        // Collapsing rows above the cursor can leave it past the end.
        if let Some(selected) = self.sidebar_state.selected() {
            if selected >= self.sidebar_rows.len() {
                let last = self.sidebar_rows.len().checked_sub(1);
                self.sidebar_state.select(last);
            }
        }
    }

    fn selected_row(&self) -> Option<&SidebarRow> {
        self.sidebar_state
            .selected()
            .and_then(|idx| self.sidebar_rows.get(idx))
    }

    /// Whether the given chapter is the open one within its book.
    pub fn is_chapter_open(&self, book: usize, chapter: usize) -> bool {
        self.open_chapters.get(&book) == Some(&chapter)
    }

    // === Sidebar state transitions ===

    pub fn toggle_book(&mut self, book: usize) {
        if !self.expanded_books.remove(&book) {
            self.expanded_books.insert(book);
        }
        self.rebuild_sidebar();
    }

    /// Accordion semantics: opening a chapter closes every other chapter in
    /// the same book; toggling the open chapter closes it.
    pub fn toggle_chapter(&mut self, book: usize, chapter: usize) {
        if self.open_chapters.get(&book) == Some(&chapter) {
            self.open_chapters.remove(&book);
        } else {
            self.open_chapters.insert(book, chapter);
        }
        self.rebuild_sidebar();
    }

    /// Close every expanded chapter across the sidebar. Book-level expansion
    /// is left untouched.
    pub fn collapse_all(&mut self) {
        self.open_chapters.clear();
        self.rebuild_sidebar();
    }

    /// Toggle sidebar visibility and persist the preference.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
        if let Err(e) = self.config.set_sidebar_collapsed(!self.sidebar_visible) {
            self.status_message = Some(format!("✗ Failed to save preference: {}", e));
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar if !self.elements.is_empty() => Focus::Content,
            Focus::Sidebar => Focus::Sidebar,
            Focus::Content => Focus::Sidebar,
        };
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Activate the selected sidebar row: books and chapters toggle their
    /// expansion, sections request navigation.
    pub fn activate(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        match row.kind {
            RowKind::Book { book } => self.toggle_book(book),
            RowKind::Chapter { book, chapter } => self.toggle_chapter(book, chapter),
            RowKind::Section {
                book,
                chapter,
                section,
            } => {
                let Some(chapter) = self
                    .library
                    .books
                    .get(book)
                    .and_then(|b| b.chapters.get(chapter))
                else {
                    return;
                };
                let chapter_id = chapter.id.clone();
                let section_id = chapter.sections.get(section).map(|s| s.id.clone());
                self.navigate(book, &chapter_id, section_id.as_deref());
            }
        }
    }

    // === Chapter loading ===

    /// Resolve a (book, chapter, section) selection to its content file,
    /// load and render it, and reflect the new active selection in the
    /// sidebar.
    ///
    /// An unmapped target shows a notice and leaves content and selection
    /// untouched. A load failure is recorded on `last_load_error` only; the
    /// previously displayed content stays on screen.
    pub fn navigate(&mut self, book: usize, chapter_id: &str, section_id: Option<&str>) {
        let Some((chapter_idx, chapter)) = self
            .library
            .books
            .get(book)
            .and_then(|b| {
                b.chapters
                    .iter()
                    .enumerate()
                    .find(|(_, c)| c.id == chapter_id)
            })
            .map(|(idx, chapter)| (idx, chapter.clone()))
        else {
            return;
        };

        let Some(target) = chapter.resolve(section_id) else {
            if section_id.is_some() {
                self.status_message = Some(MISSING_CONTENT_NOTICE.to_string());
            }
            return;
        };

        let path = self.assets.data(&target.path);
        let doc = match content::load_document(&path) {
            Ok(doc) => doc,
            Err(e) => {
                self.last_load_error = Some(format!("{e:#}"));
                return;
            }
        };

        self.elements = render::render_document(&doc, &self.assets);
        self.document_title = doc.title;
        self.selection = SelectionState {
            chapter_id: Some(chapter.id.clone()),
            section_id: target.section_id,
        };
        self.content_scroll = 0;
        self.content_scroll_state = ScrollbarState::default();
        self.last_load_error = None;
        self.status_message = None;

        // Reveal the loaded chapter even if a prior action collapsed it.
        self.expanded_books.insert(book);
        self.open_chapters.insert(book, chapter_idx);
        self.rebuild_sidebar();
    }

    // === Movement ===

    pub fn next(&mut self) {
        match self.focus {
            Focus::Sidebar => self.select_offset(1),
            Focus::Content => self.scroll_content(1),
        }
    }

    pub fn previous(&mut self) {
        match self.focus {
            Focus::Sidebar => self.select_offset(-1),
            Focus::Content => self.scroll_content(-1),
        }
    }

    pub fn first(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                if !self.sidebar_rows.is_empty() {
                    self.sidebar_state.select(Some(0));
                    self.sidebar_scroll_state = self.sidebar_scroll_state.position(0);
                }
            }
            Focus::Content => {
                self.content_scroll = 0;
                self.content_scroll_state = self.content_scroll_state.position(0);
            }
        }
    }

    pub fn last(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                if let Some(last) = self.sidebar_rows.len().checked_sub(1) {
                    self.sidebar_state.select(Some(last));
                    self.sidebar_scroll_state = self.sidebar_scroll_state.position(last);
                }
            }
            Focus::Content => self.scroll_content(i32::MAX),
        }
    }

    pub fn scroll_page_down(&mut self) {
        self.scroll_content(10);
    }

    pub fn scroll_page_up(&mut self) {
        self.scroll_content(-10);
    }

    fn select_offset(&mut self, delta: i32) {
        if self.sidebar_rows.is_empty() {
            return;
        }
        let current = self.sidebar_state.selected().unwrap_or(0) as i32;
        let last = (self.sidebar_rows.len() - 1) as i32;
        let next = (current + delta).clamp(0, last) as usize;
        self.sidebar_state.select(Some(next));
        self.sidebar_scroll_state = self.sidebar_scroll_state.position(next);
    }

    fn scroll_content(&mut self, delta: i32) {
        let max = self.content_height.saturating_sub(1);
        let next = i32::from(self.content_scroll)
            .saturating_add(delta)
            .clamp(0, i32::from(max));
        self.content_scroll = next as u16;
        self.content_scroll_state = self.content_scroll_state.position(self.content_scroll as usize);
    }

    /// Called by the UI after laying out content, so scrolling can clamp to
    /// the real rendered height.
    pub fn set_content_height(&mut self, lines: usize) {
        self.content_height = lines as u16;
        self.content_scroll = self.content_scroll.min(self.content_height.saturating_sub(1));
        self.content_scroll_state =
            ScrollbarState::new(lines).position(self.content_scroll as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Book, Chapter, Section};
    use std::fs;

    fn section(id: &str, title: &str, file: Option<&str>) -> Section {
        Section {
            id: id.to_string(),
            title: title.to_string(),
            file: file.map(str::to_string),
        }
    }

    fn chapter(id: &str, title: &str, folder: &str, sections: Vec<Section>) -> Chapter {
        Chapter {
            id: id.to_string(),
            title: title.to_string(),
            file: None,
            folder: Some(folder.to_string()),
            sections,
        }
    }

    fn two_book_library() -> Library {
        Library {
            books: vec![
                Book {
                    title: "Mechanics".to_string(),
                    chapters: vec![
                        chapter(
                            "ch1",
                            "Kinematics",
                            "ch1",
                            vec![section("ch1-s1", "§ 1.1 Motion", Some("s1.json"))],
                        ),
                        chapter(
                            "ch2",
                            "Dynamics",
                            "ch2",
                            vec![
                                section("ch2-s1", "§ 2.1 Forces", Some("s1.json")),
                                section("ch2-problems", "Problems", None),
                            ],
                        ),
                        chapter("ch3", "Statics", "ch3", vec![]),
                    ],
                },
                Book {
                    title: "Waves".to_string(),
                    chapters: vec![chapter("ch4", "Oscillations", "ch4", vec![])],
                },
            ],
        }
    }

    fn test_app() -> App {
        App::new(
            two_book_library(),
            AssetPaths::new("/nonexistent"),
            Config::default(),
        )
    }

    fn open_chapters(app: &App) -> Vec<RowKind> {
        app.sidebar_rows
            .iter()
            .filter(|row| matches!(row.kind, RowKind::Chapter { .. }) && row.expanded)
            .map(|row| row.kind)
            .collect()
    }

    #[test]
    fn test_first_book_starts_expanded() {
        let app = test_app();

        // Book 0 expanded: its 3 chapters are visible. Book 1 collapsed.
        let chapter_rows = app
            .sidebar_rows
            .iter()
            .filter(|row| matches!(row.kind, RowKind::Chapter { .. }))
            .count();
        assert_eq!(chapter_rows, 3);
        assert!(app.sidebar_rows[0].expanded);
        let book1 = app
            .sidebar_rows
            .iter()
            .find(|row| row.kind == RowKind::Book { book: 1 })
            .unwrap();
        assert!(!book1.expanded);
    }

    #[test]
    fn test_chapter_accordion_single_open() {
        let mut app = test_app();

        app.toggle_chapter(0, 0);
        assert!(app.is_chapter_open(0, 0));

        // Opening chapter 2 closes chapter 1.
        app.toggle_chapter(0, 1);
        assert!(!app.is_chapter_open(0, 0));
        assert!(app.is_chapter_open(0, 1));
        assert_eq!(
            open_chapters(&app),
            vec![RowKind::Chapter {
                book: 0,
                chapter: 1
            }]
        );

        // Toggling the open chapter closes it.
        app.toggle_chapter(0, 1);
        assert!(open_chapters(&app).is_empty());
    }

    #[test]
    fn test_collapse_all_leaves_books_open() {
        let mut app = test_app();
        app.toggle_chapter(0, 1);
        app.toggle_book(1);

        app.collapse_all();
        assert!(open_chapters(&app).is_empty());
        // Both books still expanded.
        assert!(app.sidebar_rows[0].expanded);
        let book1 = app
            .sidebar_rows
            .iter()
            .find(|row| row.kind == RowKind::Book { book: 1 })
            .unwrap();
        assert!(book1.expanded);
    }

    #[test]
    fn test_section_rows_carry_markers() {
        let mut app = test_app();
        app.toggle_chapter(0, 1);

        let markers: Vec<Option<String>> = app
            .sidebar_rows
            .iter()
            .filter(|row| matches!(row.kind, RowKind::Section { .. }))
            .map(|row| row.marker.clone())
            .collect();
        assert_eq!(
            markers,
            vec![Some("§ 2.1".to_string()), Some("?".to_string())]
        );
    }

    #[test]
    fn test_navigate_marks_and_reveals_selection() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data/ch2")).unwrap();
        fs::write(
            dir.path().join("data/ch2/s1.json"),
            r#"{"title": "§ 2.1 Forces", "body": [{"type": "text", "value": "A force $F$."}]}"#,
        )
        .unwrap();

        let mut app = App::new(
            two_book_library(),
            AssetPaths::new(dir.path()),
            Config::default(),
        );
        app.collapse_all();
        app.navigate(0, "ch2", Some("ch2-s1"));

        assert_eq!(app.document_title, "§ 2.1 Forces");
        assert_eq!(app.elements.len(), 1);
        assert_eq!(app.selection.chapter_id.as_deref(), Some("ch2"));
        assert_eq!(app.selection.section_id.as_deref(), Some("ch2-s1"));

        // The loaded chapter is marked active and re-expanded.
        assert!(app.is_chapter_open(0, 1));
        let active_chapters: Vec<_> = app
            .sidebar_rows
            .iter()
            .filter(|row| matches!(row.kind, RowKind::Chapter { .. }) && row.active)
            .collect();
        assert_eq!(active_chapters.len(), 1);
        let active_sections: Vec<_> = app
            .sidebar_rows
            .iter()
            .filter(|row| matches!(row.kind, RowKind::Section { .. }) && row.active)
            .collect();
        assert_eq!(active_sections.len(), 1);

        // Repeating the identical navigation is idempotent.
        let rows_before: Vec<String> = app.sidebar_rows.iter().map(|r| r.text.clone()).collect();
        let selection_before = app.selection.clone();
        app.navigate(0, "ch2", Some("ch2-s1"));
        let rows_after: Vec<String> = app.sidebar_rows.iter().map(|r| r.text.clone()).collect();
        assert_eq!(rows_before, rows_after);
        assert_eq!(selection_before, app.selection);
    }

    #[test]
    fn test_navigate_unmapped_section_shows_notice() {
        let mut app = test_app();
        let elements_before = app.elements.clone();
        let selection_before = app.selection.clone();

        app.navigate(0, "ch2", Some("ch2-problems"));

        assert_eq!(app.status_message.as_deref(), Some(MISSING_CONTENT_NOTICE));
        assert_eq!(app.elements, elements_before);
        assert_eq!(app.selection, selection_before);
    }

    #[test]
    fn test_navigate_load_failure_is_silent() {
        // Target resolves but the file doesn't exist on disk.
        let mut app = test_app();
        app.navigate(0, "ch1", Some("ch1-s1"));

        assert!(app.last_load_error.is_some());
        assert_eq!(app.status_message, None);
        assert!(app.elements.is_empty());
        assert_eq!(app.selection, SelectionState::default());
    }
}
