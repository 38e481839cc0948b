//! Embed rewriting: `![[pic.png]]` / `![[pic.png|caption]]` to standard
//! image markup.
//!
//! The generated URL mirrors the remote store's own filename
//! normalization (see `wikibridge_core::paths::asset_url`) so the markup
//! points at where the upload will actually land. Runs before the
//! wikilink stage.

use regex::Regex;
use std::sync::LazyLock;
use wikibridge_core::{asset_url, is_image_target};

static EMBED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[(?P<target>[^\]\|]+)(?:\|(?P<caption>[^\]]*))?\]\]").unwrap());

/// Rewrite image embeds. Non-image embeds (whole-note transclusions) are
/// left untouched.
pub fn rewrite_embeds(text: &str, page_path: Option<&str>) -> String {
    EMBED_PATTERN
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let target = caps.name("target").map(|m| m.as_str().trim()).unwrap_or("");
            if !is_image_target(target) {
                return caps.get(0).unwrap().as_str().to_string();
            }

            let name = target.replace('\\', "/");
            let name = name.rsplit('/').next().unwrap_or(target);
            let alt = caps
                .name("caption")
                .map(|m| m.as_str().trim())
                .filter(|c| !c.is_empty())
                .unwrap_or(name);

            format!("![{}]({})", alt, asset_url(target, page_path))
        })
        .into_owned()
}
