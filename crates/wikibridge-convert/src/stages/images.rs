//! Embedded-image extraction.
//!
//! Runs against the *original* text, before any rewriting, so later
//! stages cannot interfere with the patterns. Four notations are
//! recognized: markdown image syntax, `![[embed]]`, `![[embed|caption]]`,
//! and raw `<img src>` tags. External targets (URL schemes, data URIs)
//! are skipped.

use crate::stages::is_external_target;
use regex::Regex;
use std::sync::LazyLock;
use wikibridge_core::{is_image_target, ImageRef};

/// Matches `![alt](target)` and `![alt](<target with spaces>)`
static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[[^\[\]]*\]\((?:<(?P<angle>[^>]+)>|(?P<url>[^()\s"]+))(?:\s+"[^"]*")?\)"#)
        .unwrap()
});

/// Matches `[[target]]`, `![[target]]`, and the captioned variants.
/// The optional `!` lets a bare `[[pic.png]]` count as an image too,
/// matching the conversion rule that an image-extension target is always
/// an embed.
static BRACKET_EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[\[(?P<target>[^\]\|]+)(?:\|[^\]]*)?\]\]").unwrap());

/// Matches raw `<img src="...">` tags
static HTML_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img[^>]*\ssrc\s*=\s*["'](?P<src>[^"']+)["']"#).unwrap());

/// Normalize a reference path for de-duplication: strip query/fragment,
/// backslashes to forward slashes, strip a leading `/` and a leading `./`.
pub fn normalize_reference(raw: &str) -> String {
    let raw = raw.split(['?', '#']).next().unwrap_or(raw);
    let unified = raw.replace('\\', "/");
    let trimmed = unified.trim_start_matches('/');
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    trimmed.to_string()
}

/// Collect every embedded image reference in the text, in document order,
/// de-duplicated by normalized path.
pub fn extract_images(text: &str) -> Vec<ImageRef> {
    let mut seen: Vec<String> = Vec::new();
    let mut images = Vec::new();

    let mut push = |raw: &str| {
        let raw = raw.trim();
        if raw.is_empty() || is_external_target(raw) {
            return;
        }
        let key = normalize_reference(raw);
        if key.is_empty() || seen.contains(&key) {
            return;
        }
        seen.push(key);
        images.push(ImageRef::new(raw));
    };

    // Ordered by position within each notation; notation order follows
    // the original conversion order (markdown images, bracket embeds,
    // raw img tags).
    for caps in MARKDOWN_IMAGE.captures_iter(text) {
        if let Some(m) = caps.name("angle").or_else(|| caps.name("url")) {
            push(m.as_str());
        }
    }

    for caps in BRACKET_EMBED.captures_iter(text) {
        let target = caps.name("target").map(|m| m.as_str()).unwrap_or("");
        // Bracket syntax also embeds whole notes; only image targets are
        // upload candidates.
        if is_image_target(target) {
            push(target);
        }
    }

    for caps in HTML_IMAGE.captures_iter(text) {
        if let Some(m) = caps.name("src") {
            push(m.as_str());
        }
    }

    images
}
