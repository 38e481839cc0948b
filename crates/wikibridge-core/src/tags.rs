//! Tag extraction: front-matter `tags:` keys plus inline `#tag` markers.
//!
//! Front-matter tags come first, then inline tags in document order.
//! The combined list is de-duplicated case-sensitively, preserving
//! insertion order.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a leading YAML front-matter block: `---\n ... \n---`
static FRONTMATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s*\n([\s\S]*?)\n---\s*(?:\n|$)").unwrap());

/// Matches inline `#tag` tokens preceded by start-of-line or whitespace.
static INLINE_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^|\s)#([A-Za-z0-9_/-]+)").unwrap());

/// Split the leading front-matter block off, if present.
///
/// Returns `(front_matter, body)` where `body` is the full text when no
/// block exists.
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    match FRONTMATTER_PATTERN.captures(text) {
        Some(caps) => {
            let fm = caps.get(1).map(|m| m.as_str());
            let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
            (fm, &text[end..])
        }
        None => (None, text),
    }
}

/// Tags declared in a front-matter `tags:` key.
///
/// Accepts inline-array syntax (`tags: [a, b]`) and comma-separated scalar
/// syntax (`tags: a, b`).
fn front_matter_tags(front_matter: &str) -> Vec<String> {
    for line in front_matter.lines() {
        let trimmed = line.trim_start();
        let Some(value) = trimmed.strip_prefix("tags:") else {
            continue;
        };
        let value = value.trim();
        let value = value
            .strip_prefix('[')
            .and_then(|v| v.strip_suffix(']'))
            .unwrap_or(value);

        return value
            .split(',')
            .map(|t| t.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
    Vec::new()
}

/// Extract the ordered, de-duplicated tag set of a note.
///
/// # Example
/// ```
/// use wikibridge_core::tags::extract_tags;
///
/// let tags = extract_tags("---\ntags: [a, b]\n---\n#c body");
/// assert_eq!(tags, vec!["a", "b", "c"]);
/// ```
pub fn extract_tags(text: &str) -> Vec<String> {
    let (front_matter, body) = split_front_matter(text);

    let mut tags: Vec<String> = Vec::new();
    if let Some(fm) = front_matter {
        for tag in front_matter_tags(fm) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }

    for caps in INLINE_TAG_PATTERN.captures_iter(body) {
        let tag = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if tag.is_empty() {
            continue;
        }
        let tag = tag.to_string();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    tags
}
