//! The conversion pipeline: an explicit ordered list of rewrite stages.
//!
//! Conversion is a pure function of (text, target page path, options).
//! Callers typically convert twice, once without a page path for preview
//! and once with the confirmed path; the two outputs differ only in
//! image URLs.

use crate::stages::{admonitions, cleanup, embeds, images, links, tags, wikilinks};
use regex::Regex;
use std::sync::LazyLock;
use wikibridge_core::{split_front_matter, Conversion};

/// First level-1 heading in the body.
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+?)\s*$").unwrap());

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}-").unwrap());

/// Conversion behavior flags.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Leave wiki-style syntax (wikilinks, embeds, tags, admonitions)
    /// untouched
    pub preserve_wiki_syntax: bool,
    /// Prefix relative markdown link targets with `/`
    pub auto_convert_links: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            preserve_wiki_syntax: false,
            auto_convert_links: true,
        }
    }
}

/// Derive the page title: first `# ` heading, else the file name with
/// extension and date prefix stripped.
fn extract_title(text: &str, file_name: &str) -> String {
    let (_, body) = split_front_matter(text);
    if let Some(caps) = TITLE_PATTERN.captures(body) {
        return caps[1].to_string();
    }

    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    DATE_PREFIX.replace(stem, "").into_owned()
}

/// Convert source-dialect markup into the target dialect.
///
/// Stage order matters and is fixed:
/// 1. title extraction and image collection against the original text
/// 2. embed rewriting, then wikilinks (image-before-link disambiguation),
///    tags, admonitions - unless `preserve_wiki_syntax`
/// 3. relative-link rewriting when `auto_convert_links`
/// 4. cleanup (front-matter strip, newline collapsing)
pub fn convert(
    text: &str,
    file_name: &str,
    page_path: Option<&str>,
    options: ConvertOptions,
) -> Conversion {
    let title = extract_title(text, file_name);
    let found_images = images::extract_images(text);

    let mut content = text.to_string();
    if !options.preserve_wiki_syntax {
        content = embeds::rewrite_embeds(&content, page_path);
        content = wikilinks::rewrite_wikilinks(&content, page_path);
        content = tags::rewrite_tags(&content);
        content = admonitions::rewrite_admonitions(&content);
    }
    if options.auto_convert_links {
        content = links::rewrite_relative_links(&content);
    }
    content = cleanup::cleanup(&content);

    Conversion {
        content,
        title,
        images: found_images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ConvertOptions {
        ConvertOptions::default()
    }

    #[test]
    fn test_title_from_heading() {
        let conv = convert("# The Title\n\nbody", "note.md", None, opts());
        assert_eq!(conv.title, "The Title");
    }

    #[test]
    fn test_title_from_file_name() {
        let conv = convert("no heading here", "2024-01-01-My Note.md", None, opts());
        assert_eq!(conv.title, "My Note");
    }

    #[test]
    fn test_plain_text_is_identity_modulo_cleanup() {
        let text = "---\ntitle: x\n---\nplain paragraph\n\n\n\nsecond paragraph";
        let conv = convert(text, "note.md", None, opts());
        assert_eq!(conv.content, "plain paragraph\n\nsecond paragraph");
        assert!(conv.images.is_empty());
    }

    #[test]
    fn test_pure_repeated_calls_identical() {
        let text = "# T\n\n![[pic.png]] and [[Note]] #tag";
        let a = convert(text, "note.md", Some("docs/guide"), opts());
        let b = convert(text, "note.md", Some("docs/guide"), opts());
        assert_eq!(a.content, b.content);
        assert_eq!(a.images, b.images);
    }

    #[test]
    fn test_preview_and_final_differ_only_in_image_urls() {
        let text = "![[pic.png]]\n\ntext [[Note]]";
        let preview = convert(text, "note.md", None, opts());
        let fin = convert(text, "note.md", Some("docs/guide"), opts());
        assert!(preview.content.contains("(/pic.png)"));
        assert!(fin.content.contains("(/docs/guide/pic.png)"));
        assert_eq!(
            preview.content.replace("(/pic.png)", "(/docs/guide/pic.png)"),
            fin.content
        );
    }

    #[test]
    fn test_image_before_link_disambiguation() {
        let conv = convert("[[pic.png]] vs [[Page]]", "n.md", Some("d"), opts());
        assert_eq!(conv.content, "![pic.png](/d/pic.png) vs [Page](/page)");
    }

    #[test]
    fn test_uppercase_extension_embed() {
        let conv = convert("![[pic.PNG]]", "n.md", Some("docs/guide"), opts());
        assert!(conv.content.contains("(/docs/guide/pic.png)"));
        assert_eq!(conv.images.len(), 1);
        assert_eq!(conv.images[0].raw_path, "pic.PNG");
    }

    #[test]
    fn test_preserve_wiki_syntax() {
        let text = "![[pic.png]] [[Note]] #tag\n> [!note] T";
        let conv = convert(
            text,
            "n.md",
            None,
            ConvertOptions {
                preserve_wiki_syntax: true,
                auto_convert_links: false,
            },
        );
        assert_eq!(conv.content, text);
        // Image collection still happens for upload planning.
        assert_eq!(conv.images.len(), 1);
    }

    #[test]
    fn test_full_pipeline_composition() {
        let text = "---\ntags: [a]\n---\n# Guide\n\n> [!warning] Careful\n> details\n\n![[Shot 1.png]]\n\nSee [[Other Note|other]] and #todo\n\n[rel](sibling)";
        let conv = convert(text, "guide.md", Some("docs/guide"), opts());

        assert_eq!(conv.title, "Guide");
        assert!(conv.content.starts_with("# Guide"));
        assert!(conv.content.contains("> **Careful**\n> details"));
        assert!(conv.content.contains("![Shot 1.png](/docs/guide/shot_1.png)"));
        assert!(conv.content.contains("[other](/other-note)"));
        assert!(conv.content.contains("`#todo`"));
        assert!(conv.content.contains("[rel](/sibling)"));
        assert_eq!(conv.images.len(), 1);
    }
}
