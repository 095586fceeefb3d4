//! Content rendering: from content nodes to an abstract element tree.
//!
//! The renderer never touches the terminal. It converts each [`ContentNode`]
//! into an [`Element`] value describing what to display; the TUI layer
//! materializes elements into ratatui text. This keeps the recursive
//! tree-walk testable without a display environment.

use crate::assets::AssetPaths;
use crate::content::format::format_math;
use crate::content::{ContentDocument, ContentNode};
use std::path::PathBuf;

/// Fixed label prefixed to rendered solution blocks.
pub const SOLUTION_LABEL: &str = "Бодолт:";

/// Marker substrings that identify worked-solution paragraphs.
const SOLUTION_MARKERS: [&str; 2] = ["Бодолт", "Шийдэл"];

/// An abstract displayable element. One content node maps to at most one
/// element; containers hold their rendered children.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Paragraph {
        text: String,
        /// Tagged as a worked solution by [`is_solution_text`].
        solution: bool,
    },
    Heading {
        text: String,
        /// Anchor id for deep-linking.
        anchor: Option<String>,
    },
    Note {
        text: String,
    },
    Problem {
        /// Combined problem number and title, e.g. `17. Projectile range`.
        heading: String,
        statement: String,
        figure: Option<Figure>,
        solution: Option<String>,
    },
    Equation {
        /// Equation source wrapped in display-math brackets.
        math: String,
        tag: Option<String>,
    },
    Figure(Figure),
    Container {
        title: String,
        anchor: Option<String>,
        /// 0 for sections, 1 for subsections (and deeper nestings).
        depth: u8,
        children: Vec<Element>,
    },
}

/// A resolved image with its optional caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub path: PathBuf,
    pub caption: Option<String>,
}

/// Whether a paragraph is a worked solution.
///
/// This is a heuristic string match over fixed content-locale markers, not
/// structural metadata: the marker may appear anywhere in the text, or the
/// text may open with it behind a bold-markup wrapper.
pub fn is_solution_text(text: &str) -> bool {
    let trimmed = text.trim_start();
    let unwrapped = trimmed.strip_prefix("<b>").unwrap_or(trimmed);
    SOLUTION_MARKERS
        .iter()
        .any(|marker| text.contains(marker) || unwrapped.starts_with(marker))
}

/// Render a whole document body, skipping nodes that produce no element.
pub fn render_document(doc: &ContentDocument, assets: &AssetPaths) -> Vec<Element> {
    doc.body
        .iter()
        .filter_map(|node| render_node(node, assets))
        .collect()
}

/// Render one content node. Unknown node types produce `None`; callers skip
/// them without error.
pub fn render_node(node: &ContentNode, assets: &AssetPaths) -> Option<Element> {
    render_at(node, assets, 0)
}

fn render_at(node: &ContentNode, assets: &AssetPaths, depth: u8) -> Option<Element> {
    match node {
        ContentNode::Text { value } => {
            let text = format_math(value);
            let solution = is_solution_text(&text);
            Some(Element::Paragraph { text, solution })
        }
        ContentNode::Header { value, id } => Some(Element::Heading {
            text: value.clone(),
            anchor: id.clone(),
        }),
        ContentNode::Note { value } => Some(Element::Note {
            text: format_math(value),
        }),
        ContentNode::Problem {
            number,
            title,
            statement,
            image,
            solution,
        } => {
            let heading = match number {
                Some(number) => format!("{number}. {title}"),
                None => title.clone(),
            };
            Some(Element::Problem {
                heading,
                statement: format_math(statement),
                figure: image.as_ref().map(|image| Figure {
                    path: assets.image(&image.src),
                    caption: image.caption.clone(),
                }),
                solution: solution.as_deref().map(format_math),
            })
        }
        ContentNode::Equation { value, tag } => Some(Element::Equation {
            math: format!(r"\[ {value} \]"),
            tag: tag.clone(),
        }),
        ContentNode::Image { src, caption } => Some(Element::Figure(Figure {
            path: assets.image(src),
            caption: caption.clone(),
        })),
        ContentNode::Section { id, title, body } => Some(Element::Container {
            title: title.clone(),
            anchor: id.clone(),
            depth,
            children: render_children(body, assets, depth),
        }),
        ContentNode::Subsection { title, body } => Some(Element::Container {
            title: title.clone(),
            anchor: None,
            depth: depth.saturating_add(1),
            children: render_children(body, assets, depth.saturating_add(1)),
        }),
        ContentNode::Unknown => None,
    }
}

fn render_children(body: &[ContentNode], assets: &AssetPaths, depth: u8) -> Vec<Element> {
    body.iter()
        .filter_map(|child| render_at(child, assets, depth.saturating_add(1)))
        .collect()
}
