//! The library index: books, chapters, and sections.
//!
//! This module provides the serde model for `data/library.json`, the
//! section-title label parser, and the resolution of a (chapter, section)
//! selection to the content file that backs it.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// The top-level table of contents for the whole library.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub books: Vec<Book>,
}

/// One book: a title and its ordered chapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// One chapter entry in the index.
///
/// A chapter is addressed either by a single content `file` (resolved under
/// `data/chapters/`) or by a `folder` holding one file per section. Exactly
/// one addressing mode applies when resolving; see [`Chapter::resolve`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
}

/// One selectable section within a folder-addressed chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// A resolved navigation target: the content file (relative to `data/`)
/// and the section that ends up selected, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTarget {
    pub path: PathBuf,
    pub section_id: Option<String>,
}

impl Library {
    /// Load and parse the library index from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read library index {}", path.display()))?;
        serde_json::from_str(&contents)
            .wrap_err_with(|| format!("failed to parse library index {}", path.display()))
    }
}

impl Chapter {
    /// Resolve this chapter (and optionally a section within it) to the
    /// content file backing it.
    ///
    /// Resolution order follows the index semantics: a folder-addressed
    /// chapter with an explicit section wins, then a file-addressed chapter,
    /// then a folder-addressed chapter defaulting to its first section.
    /// Returns `None` when no content file is mapped, e.g. a section entry
    /// whose file is not yet written.
    pub fn resolve(&self, section_id: Option<&str>) -> Option<ContentTarget> {
        if let (Some(folder), Some(section_id)) = (&self.folder, section_id) {
            let section = self.sections.iter().find(|s| s.id == section_id)?;
            let file = section.file.as_ref()?;
            return Some(ContentTarget {
                path: Path::new(folder).join(file),
                section_id: Some(section.id.clone()),
            });
        }

        if let Some(file) = &self.file {
            return Some(ContentTarget {
                path: Path::new("chapters").join(file),
                section_id: None,
            });
        }

        if let Some(folder) = &self.folder {
            let first = self.sections.first()?;
            let file = first.file.as_ref()?;
            return Some(ContentTarget {
                path: Path::new(folder).join(file),
                section_id: Some(first.id.clone()),
            });
        }

        None
    }
}

/// A section title split into an optional sidebar marker and the display
/// title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeading {
    /// `§ <major>.<minor>` label, the `?` placeholder, or nothing.
    pub marker: Option<String>,
    pub title: String,
}

/// Marker shown for "problems" groupings that carry no numeric label.
pub const PROBLEMS_MARKER: &str = "?";

fn section_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(§\s*\d+\.\d+\.?)\s*(.*)$").unwrap())
}

/// Split a section title into its `§ <major>.<minor>` label and the rest.
///
/// Titles that don't match the pattern keep their full text; among those,
/// sections whose id denotes a problems grouping get the `?` placeholder
/// marker instead of a number.
pub fn section_heading(title: &str, id: &str) -> SectionHeading {
    if let Some(caps) = section_label_re().captures(title) {
        return SectionHeading {
            marker: Some(caps[1].to_string()),
            title: caps[2].to_string(),
        };
    }

    let marker = id.contains("problems").then(|| PROBLEMS_MARKER.to_string());
    SectionHeading {
        marker,
        title: title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, file: Option<&str>) -> Section {
        Section {
            id: id.to_string(),
            title: format!("§ 1.1 {id}"),
            file: file.map(str::to_string),
        }
    }

    #[test]
    fn test_section_heading_labelled() {
        let heading = section_heading("§ 2.3 Kinematics", "ch2-sec3");
        assert_eq!(heading.marker.as_deref(), Some("§ 2.3"));
        assert_eq!(heading.title, "Kinematics");
    }

    #[test]
    fn test_section_heading_trailing_dot() {
        let heading = section_heading("§ 1.4. Work and Energy", "ch1-sec4");
        assert_eq!(heading.marker.as_deref(), Some("§ 1.4."));
        assert_eq!(heading.title, "Work and Energy");
    }

    #[test]
    fn test_section_heading_problems_placeholder() {
        let heading = section_heading("Problems", "ch2-problems");
        assert_eq!(heading.marker.as_deref(), Some(PROBLEMS_MARKER));
        assert_eq!(heading.title, "Problems");
    }

    #[test]
    fn test_section_heading_plain_title() {
        let heading = section_heading("Appendix", "ch9-appendix");
        assert_eq!(heading.marker, None);
        assert_eq!(heading.title, "Appendix");
    }

    #[test]
    fn test_resolve_file_chapter() {
        let chapter = Chapter {
            id: "ch1".to_string(),
            title: "Introduction".to_string(),
            file: Some("ch1.json".to_string()),
            folder: None,
            sections: Vec::new(),
        };

        let target = chapter.resolve(None).unwrap();
        assert_eq!(target.path, PathBuf::from("chapters/ch1.json"));
        assert_eq!(target.section_id, None);
    }

    #[test]
    fn test_resolve_folder_with_section() {
        let chapter = Chapter {
            id: "ch2".to_string(),
            title: "Dynamics".to_string(),
            file: None,
            folder: Some("ch2".to_string()),
            sections: vec![section("s1", Some("s1.json")), section("s2", Some("s2.json"))],
        };

        let target = chapter.resolve(Some("s2")).unwrap();
        assert_eq!(target.path, PathBuf::from("ch2/s2.json"));
        assert_eq!(target.section_id.as_deref(), Some("s2"));
    }

    #[test]
    fn test_resolve_folder_defaults_to_first_section() {
        let chapter = Chapter {
            id: "ch2".to_string(),
            title: "Dynamics".to_string(),
            file: None,
            folder: Some("ch2".to_string()),
            sections: vec![section("s1", Some("s1.json")), section("s2", Some("s2.json"))],
        };

        let target = chapter.resolve(None).unwrap();
        assert_eq!(target.path, PathBuf::from("ch2/s1.json"));
        assert_eq!(target.section_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_resolve_unmapped_section_is_none() {
        let chapter = Chapter {
            id: "ch2".to_string(),
            title: "Dynamics".to_string(),
            file: None,
            folder: Some("ch2".to_string()),
            sections: vec![section("s1", None)],
        };

        assert_eq!(chapter.resolve(Some("s1")), None);
        assert_eq!(chapter.resolve(Some("missing")), None);
        // Default-to-first also has no file to fall back on.
        assert_eq!(chapter.resolve(None), None);
    }

    #[test]
    fn test_parse_library_index() {
        let json = r#"{
            "books": [{
                "title": "Problems in General Physics",
                "chapters": [
                    {"id": "ch1", "title": "Physical Fundamentals", "folder": "ch1",
                     "sections": [{"id": "ch1-sec1", "title": "§ 1.1 Kinematics", "file": "sec1.json"}]},
                    {"id": "appendix", "title": "Appendix", "file": "appendix.json"}
                ]
            }]
        }"#;

        let library: Library = serde_json::from_str(json).unwrap();
        assert_eq!(library.books.len(), 1);
        let book = &library.books[0];
        assert_eq!(book.chapters.len(), 2);
        assert_eq!(book.chapters[0].sections.len(), 1);
        assert_eq!(book.chapters[1].file.as_deref(), Some("appendix.json"));
    }
}
