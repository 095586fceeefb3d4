//! Math delimiter rewriting.
//!
//! Content text uses dollar-sign delimiters for mathematics. The typesetting
//! engine expects bracket notation instead: `\[...\]` for display math and
//! `\(...\)` for inline math. Rewriting is two ordered substitutions; block
//! delimiters must be resolved before inline ones so a `$$...$$` span is
//! never mis-split into two `$...$` spans.
//!
//! Literal dollar signs cannot be escaped. That is a known limitation of the
//! content format, not something this pass tries to repair.

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn display_math_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // (?s): display spans may cross newlines
    RE.get_or_init(|| Regex::new(r"(?s)\$\$(.+?)\$\$").unwrap())
}

fn inline_math_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$([^$]+)\$").unwrap())
}

/// Rewrite `$$...$$` spans to display-math brackets, then `$...$` spans to
/// inline-math brackets with surrounding whitespace trimmed.
pub fn format_math(raw: &str) -> String {
    let formatted = display_math_re().replace_all(raw, |caps: &Captures| {
        format!(r"\[{}\]", &caps[1])
    });
    inline_math_re()
        .replace_all(&formatted, |caps: &Captures| {
            format!(r"\({}\)", caps[1].trim())
        })
        .into_owned()
}
