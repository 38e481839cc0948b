//! Wikilink rewriting: `[[Target]]` / `[[Target|Label]]` to standard
//! links.
//!
//! A target ending in an image extension always takes the image rule,
//! never the link rule, no matter how it is bracketed. Embeds (`![[`)
//! were rewritten by the previous stage; whatever still starts with `!`
//! here is a note transclusion and is skipped.

use regex::Regex;
use std::sync::LazyLock;
use wikibridge_core::{asset_url, is_image_target};

static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(?P<inner>[^\]]+)\]\]").unwrap());

/// Lowercase a link target and hyphenate its internal whitespace runs,
/// keeping slashes so folder-qualified targets stay hierarchical.
fn link_url(target: &str) -> String {
    let mut url = String::with_capacity(target.len() + 1);
    url.push('/');
    let mut in_space = false;
    for c in target.trim().chars() {
        if c.is_whitespace() {
            in_space = true;
            continue;
        }
        if in_space {
            url.push('-');
            in_space = false;
        }
        for lower in c.to_lowercase() {
            url.push(lower);
        }
    }
    url
}

/// Rewrite wikilinks to standard markdown links.
pub fn rewrite_wikilinks(text: &str, page_path: Option<&str>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;

    for caps in WIKILINK_PATTERN.captures_iter(text) {
        let full = caps.get(0).unwrap();
        let start = full.start();

        // No look-behind in Rust regex: filter embeds manually.
        if start > 0 && text.as_bytes().get(start - 1) == Some(&b'!') {
            continue;
        }

        let inner = caps.name("inner").unwrap().as_str();
        let (target, label) = match inner.find('|') {
            Some(idx) => (inner[..idx].trim(), Some(inner[idx + 1..].trim())),
            None => (inner.trim(), None),
        };

        out.push_str(&text[last_end..start]);
        if is_image_target(target) {
            // Image-extension targets are embeds even without the `!`.
            let name = target.replace('\\', "/");
            let name = name.rsplit('/').next().unwrap_or(target);
            let alt = label.filter(|l| !l.is_empty()).unwrap_or(name);
            out.push_str(&format!("![{}]({})", alt, asset_url(target, page_path)));
        } else {
            let label = label.filter(|l| !l.is_empty()).unwrap_or(target);
            out.push_str(&format!("[{}]({})", label, link_url(target)));
        }
        last_end = full.end();
    }

    out.push_str(&text[last_end..]);
    out
}
