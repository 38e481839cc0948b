//! Final cleanup: strip the leading front-matter block, drop degenerate
//! admonition header lines, and collapse runs of blank lines.

use regex::Regex;
use std::sync::LazyLock;
use wikibridge_core::split_front_matter;

/// Admonition markers left without a kind after earlier rewriting.
static EMPTY_ADMONITION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*>\s*\[!\s*\]\s*$\n?").unwrap());

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Run the cleanup pass.
pub fn cleanup(text: &str) -> String {
    let (_, body) = split_front_matter(text);
    let body = EMPTY_ADMONITION_HEADER.replace_all(body, "");
    EXCESS_NEWLINES.replace_all(&body, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_matter_stripped() {
        assert_eq!(cleanup("---\ntitle: x\n---\nbody"), "body");
    }

    #[test]
    fn test_newlines_collapsed() {
        assert_eq!(cleanup("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(cleanup("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_empty_admonition_header_removed() {
        assert_eq!(cleanup("> [! ]\ntext"), "text");
    }

    #[test]
    fn test_plain_text_identity() {
        assert_eq!(cleanup("plain text\nwith lines"), "plain text\nwith lines");
    }
}
