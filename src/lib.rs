//! # folio
//!
//! A library for reading structured JSON books: a hierarchical library index
//! (books, chapters, sections), per-chapter content documents over a small
//! recursive schema, and a renderer that converts content trees into an
//! abstract element tree suitable for terminal display.
//!
//! The crate powers the `folio` TUI but the core — content model, math
//! formatting, rendering, and navigation index — is display-agnostic and
//! usable programmatically.
//!
//! ## Example
//!
//! ```rust
//! use folio::assets::AssetPaths;
//! use folio::content::ContentDocument;
//! use folio::render::{Element, render_document};
//!
//! let json = r#"{
//!     "title": "§ 1.1 Kinematics",
//!     "body": [
//!         {"type": "header", "value": "Kinematics"},
//!         {"type": "text", "value": "A point moves with velocity $v$."}
//!     ]
//! }"#;
//!
//! let doc: ContentDocument = serde_json::from_str(json).unwrap();
//! let assets = AssetPaths::new("/srv/book");
//! let elements = render_document(&doc, &assets);
//!
//! assert_eq!(elements.len(), 2);
//! assert!(matches!(&elements[1], Element::Paragraph { text, .. } if text.contains(r"\(v\)")));
//! ```

/// Asset path resolution for a library root directory.
///
/// Resolves content resources under `data/` and normalizes image references
/// under `images/`.
pub mod assets;

/// Configuration module for persisting user preferences.
///
/// Provides configuration management for UI settings such as the persisted
/// sidebar-collapsed flag.
pub mod config;

/// Content document model: the recursive content-node schema and its loader.
pub mod content;

/// Keybindings module for customizable keyboard shortcuts.
///
/// Provides a flexible keybinding system that allows users to customize
/// keyboard shortcuts via configuration files.
pub mod keybindings;

/// The library index: books, chapters, sections, and navigation resolution.
pub mod library;

/// Content rendering to an abstract, display-agnostic element tree.
pub mod render;

/// TUI module for the interactive terminal interface.
///
/// Provides the App and UI rendering functionality for the sidebar and
/// content panes.
pub mod tui;

// Re-export commonly used types for convenience
pub use assets::AssetPaths;
pub use config::Config;
pub use content::{ContentDocument, ContentNode, load_document};
pub use library::{Book, Chapter, Library, Section};
pub use render::{Element, render_document, render_node};
pub use tui::App;
