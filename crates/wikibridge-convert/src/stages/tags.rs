//! Inline tag rewriting: `#tag` to `` `#tag` ``.
//!
//! The target dialect has no first-class inline tags; wrapping in inline
//! code keeps them visible without the remote renderer mangling them.

use regex::Regex;
use std::sync::LazyLock;

/// Same token rule as the extractor: `#` preceded by start-of-line or
/// whitespace, followed by `[A-Za-z0-9_/-]+`.
static INLINE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?P<lead>^|\s)#(?P<tag>[A-Za-z0-9_/-]+)").unwrap());

/// Wrap inline tags in inline code.
pub fn rewrite_tags(text: &str) -> String {
    INLINE_TAG
        .replace_all(text, |caps: &regex::Captures<'_>| {
            format!("{}`#{}`", &caps["lead"], &caps["tag"])
        })
        .into_owned()
}
