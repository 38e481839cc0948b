//! Rewrite stages of the conversion pipeline.
//!
//! Each stage is a pure text → text function; the pipeline composes them
//! in a fixed order. Ordering matters: embeds are rewritten before
//! wikilinks so an image target is never mistaken for a page link, and
//! cleanup runs last.

pub mod admonitions;
pub mod cleanup;
pub mod embeds;
pub mod images;
pub mod links;
pub mod tags;
pub mod wikilinks;

/// Is this target external (carries a URL scheme or is a data URI)?
///
/// Rust regex has no look-behind, so stages that need "not preceded by
/// `!`" filter matches manually the same way the parsers they are modeled
/// on do.
pub(crate) fn is_external_target(target: &str) -> bool {
    let mut chars = target.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    // scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
    for c in chars {
        if c == ':' {
            return true;
        }
        if !(c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external_target() {
        assert!(is_external_target("https://example.com/pic.png"));
        assert!(is_external_target("http://x"));
        assert!(is_external_target("data:image/png;base64,AAAA"));
        assert!(is_external_target("mailto:x@y.z"));
        assert!(!is_external_target("pic.png"));
        assert!(!is_external_target("folder/pic.png"));
        assert!(!is_external_target("./pic.png"));
        assert!(!is_external_target("/abs/pic.png"));
    }
}
