//! Content document model.
//!
//! A content document is `{title, body: [node...]}` where each node is a
//! tagged variant over the content schema (text, header, note, problem,
//! image, equation, section, subsection). Section and subsection nodes own
//! child nodes recursively; documents arrive as trees, never graphs.
//!
//! Parsing is deliberately lenient: every content field defaults when
//! absent, so malformed input degrades to empty or partial content instead
//! of failing the whole document, and unknown `type` values map to
//! [`ContentNode::Unknown`] which renders to nothing (ignore and continue,
//! not an error).

pub mod format;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// One fetched chapter/section document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Vec<ContentNode>,
}

/// One renderable unit of book content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentNode {
    Text {
        #[serde(default)]
        value: String,
    },
    Header {
        #[serde(default)]
        value: String,
        /// Anchor id for deep-linking.
        #[serde(default)]
        id: Option<String>,
    },
    Note {
        #[serde(default)]
        value: String,
    },
    Problem {
        #[serde(default)]
        number: Option<Label>,
        #[serde(default)]
        title: String,
        #[serde(default)]
        statement: String,
        #[serde(default)]
        image: Option<ImageRef>,
        #[serde(default)]
        solution: Option<String>,
    },
    Equation {
        #[serde(default)]
        value: String,
        /// Trailing tag label, e.g. an equation number.
        #[serde(default)]
        tag: Option<String>,
    },
    Image {
        #[serde(default)]
        src: String,
        #[serde(default)]
        caption: Option<String>,
    },
    Section {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        title: String,
        #[serde(default)]
        body: Vec<ContentNode>,
    },
    Subsection {
        #[serde(default)]
        title: String,
        #[serde(default)]
        body: Vec<ContentNode>,
    },
    /// Any `type` this reader doesn't know about.
    #[serde(other)]
    Unknown,
}

/// An image reference embedded in a problem node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// A label that upstream data writes either as a number or a string
/// (problem numbers such as `42` or `"3.17a"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(i64),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) => write!(f, "{n}"),
            Label::Text(s) => f.write_str(s),
        }
    }
}

/// Load and parse a content document from disk.
pub fn load_document(path: &Path) -> Result<ContentDocument> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read content document {}", path.display()))?;
    serde_json::from_str(&contents)
        .wrap_err_with(|| format!("failed to parse content document {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let json = r#"{
            "title": "§ 1.1 Kinematics",
            "body": [
                {"type": "header", "value": "Kinematics", "id": "kinematics"},
                {"type": "text", "value": "A point moves along $x$."},
                {"type": "equation", "value": "v = dx/dt", "tag": "1.1a"}
            ]
        }"#;

        let doc: ContentDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.title, "§ 1.1 Kinematics");
        assert_eq!(doc.body.len(), 3);
        assert!(matches!(&doc.body[0], ContentNode::Header { id: Some(id), .. } if id == "kinematics"));
        assert!(matches!(&doc.body[2], ContentNode::Equation { tag: Some(t), .. } if t == "1.1a"));
    }

    #[test]
    fn test_unknown_type_parses_to_unknown() {
        let json = r#"{"body": [{"type": "video", "src": "clip.mp4"}, {"type": "text", "value": "after"}]}"#;
        let doc: ContentDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.body.len(), 2);
        assert_eq!(doc.body[0], ContentNode::Unknown);
        assert!(matches!(&doc.body[1], ContentNode::Text { value } if value == "after"));
    }

    #[test]
    fn test_missing_fields_default() {
        // No title, a problem with nothing but its statement.
        let json = r#"{"body": [{"type": "problem", "statement": "Find $v$."}]}"#;
        let doc: ContentDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.title, "");
        match &doc.body[0] {
            ContentNode::Problem {
                number,
                title,
                statement,
                image,
                solution,
            } => {
                assert_eq!(*number, None);
                assert_eq!(title, "");
                assert_eq!(statement, "Find $v$.");
                assert_eq!(*image, None);
                assert_eq!(*solution, None);
            }
            other => panic!("expected Problem, got {other:?}"),
        }
    }

    #[test]
    fn test_problem_number_accepts_int_and_string() {
        let json = r#"{"body": [
            {"type": "problem", "number": 42, "statement": "a"},
            {"type": "problem", "number": "3.17a", "statement": "b"}
        ]}"#;
        let doc: ContentDocument = serde_json::from_str(json).unwrap();

        let numbers: Vec<String> = doc
            .body
            .iter()
            .filter_map(|node| match node {
                ContentNode::Problem { number, .. } => number.as_ref().map(Label::to_string),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, ["42", "3.17a"]);
    }

    #[test]
    fn test_nested_sections() {
        let json = r#"{"body": [
            {"type": "section", "id": "s1", "title": "Outer", "body": [
                {"type": "subsection", "title": "Inner", "body": [
                    {"type": "text", "value": "deep"}
                ]}
            ]}
        ]}"#;
        let doc: ContentDocument = serde_json::from_str(json).unwrap();

        let ContentNode::Section { body, .. } = &doc.body[0] else {
            panic!("expected Section");
        };
        let ContentNode::Subsection { body, .. } = &body[0] else {
            panic!("expected Subsection");
        };
        assert!(matches!(&body[0], ContentNode::Text { value } if value == "deep"));
    }
}
