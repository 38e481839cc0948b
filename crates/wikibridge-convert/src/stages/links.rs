//! Relative-link rewriting: prefix non-absolute, non-external markdown
//! link targets with `/` so they resolve from the wiki root.

use crate::stages::is_external_target;
use regex::Regex;
use std::sync::LazyLock;

static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[(?P<text>[^\[\]]*)\]\((?P<url>[^()\s"]+)(?P<title>\s+"[^"]*")?\)"#).unwrap()
});

fn needs_prefix(url: &str) -> bool {
    !url.starts_with('/') && !url.starts_with('#') && !is_external_target(url)
}

/// Rewrite relative link targets to root-relative ones. Images (targets
/// preceded by `!`) were already given root-relative URLs by earlier
/// stages and are skipped.
pub fn rewrite_relative_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last_end = 0;

    for caps in MARKDOWN_LINK.captures_iter(text) {
        let full = caps.get(0).unwrap();
        let start = full.start();

        if start > 0 && text.as_bytes().get(start - 1) == Some(&b'!') {
            continue;
        }

        let url = caps.name("url").unwrap().as_str();
        if !needs_prefix(url) {
            continue;
        }

        out.push_str(&text[last_end..start]);
        out.push_str(&format!(
            "[{}](/{}{})",
            caps.name("text").unwrap().as_str(),
            url,
            caps.name("title").map(|m| m.as_str()).unwrap_or(""),
        ));
        last_end = full.end();
    }

    out.push_str(&text[last_end..]);
    out
}
