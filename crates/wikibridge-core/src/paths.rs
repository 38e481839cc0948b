//! Page path and asset filename normalization.
//!
//! The remote wiki normalizes uploaded filenames on its own (lowercase,
//! spaces to underscores). [`asset_file_name`] replicates that rule set
//! exactly so that the URLs the converter writes into page markup agree
//! with the names the upload endpoint actually stores, without a second
//! round of rewriting.

use regex::Regex;
use std::sync::LazyLock;

/// Extensions treated as image targets throughout the pipeline.
///
/// Shared by the converter (embed-vs-link decision) and the resolver
/// (extension probing for bare references).
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "avif",
];

/// Matches a leading `YYYY-MM-DD-` journal prefix after hyphenation.
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}-").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Does a link target name an image file?
///
/// The comparison is case-insensitive and ignores a `#fragment` suffix.
pub fn is_image_target(target: &str) -> bool {
    let target = target.split('#').next().unwrap_or(target);
    let lower = target.trim().to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Normalize a single path segment: lowercase, whitespace runs to a single
/// hyphen, then drop anything outside `[a-z0-9-_]`.
fn slug_segment(segment: &str) -> String {
    let lower = segment.trim().to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lower, "-");
    hyphenated
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_')
        .collect()
}

/// Strip a trailing `.ext` from a filename, leaving dotfiles alone.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

/// Derive the canonical remote page path for a note.
///
/// Strips the extension and a leading `YYYY-MM-DD-` date prefix, lowercases,
/// hyphenates whitespace, and filters to `[a-z0-9-_]`. A non-root
/// `folder_path` is normalized segment-wise with the same rules and
/// prefixed, joined by `/`.
///
/// # Example
/// ```
/// use wikibridge_core::paths::page_path;
///
/// assert_eq!(page_path("2024-01-01-My Note.md", Some("Folder A")), "folder-a/my-note");
/// assert_eq!(page_path("Note.md", None), "note");
/// ```
pub fn page_path(file_name: &str, folder_path: Option<&str>) -> String {
    let stem = strip_extension(file_name);
    let slug = slug_segment(stem);
    let name = DATE_PREFIX.replace(&slug, "").into_owned();

    let prefix = folder_path
        .map(|f| f.trim_matches('/'))
        .filter(|f| !f.is_empty())
        .map(|f| {
            f.split('/')
                .map(slug_segment)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default();

    if prefix.is_empty() {
        name
    } else {
        format!("{prefix}/{name}")
    }
}

/// Normalize an image reference to the filename the remote store will keep:
/// bare filename (last path segment), whitespace to underscores, lowercased.
///
/// # Example
/// ```
/// use wikibridge_core::paths::asset_file_name;
///
/// assert_eq!(asset_file_name("folder/My Pic.PNG"), "my_pic.png");
/// ```
pub fn asset_file_name(reference: &str) -> String {
    let name = reference
        .replace('\\', "/")
        .rsplit('/')
        .next()
        .unwrap_or(reference)
        .to_string();
    name.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// The root-relative URL an embedded image resolves to once uploaded.
///
/// With a page path the asset lands in the page's own folder; without one
/// (preview conversion) the reference is root-relative only.
pub fn asset_url(reference: &str, page_path: Option<&str>) -> String {
    let name = asset_file_name(reference);
    match page_path.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        Some(path) => format!("/{path}/{name}"),
        None => format!("/{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_path_with_folder_and_date() {
        assert_eq!(
            page_path("2024-01-01-My Note.md", Some("Folder A")),
            "folder-a/my-note"
        );
    }

    #[test]
    fn test_page_path_simple() {
        assert_eq!(page_path("My Note.md", None), "my-note");
        assert_eq!(page_path("note.md", None), "note");
    }

    #[test]
    fn test_page_path_special_characters() {
        assert_eq!(page_path("Q&A: Rust (2024).md", None), "qa-rust-2024");
    }

    #[test]
    fn test_page_path_collapses_whitespace() {
        assert_eq!(page_path("My   Spaced\tNote.md", None), "my-spaced-note");
    }

    #[test]
    fn test_page_path_root_folder_is_ignored() {
        assert_eq!(page_path("note.md", Some("/")), "note");
        assert_eq!(page_path("note.md", Some("")), "note");
    }

    #[test]
    fn test_page_path_nested_folder() {
        assert_eq!(
            page_path("note.md", Some("Area 51/Sub Topic")),
            "area-51/sub-topic/note"
        );
    }

    #[test]
    fn test_page_path_folder_slash_trimming() {
        assert_eq!(page_path("note.md", Some("/docs/")), "docs/note");
    }

    #[test]
    fn test_asset_file_name() {
        assert_eq!(asset_file_name("pic.PNG"), "pic.png");
        assert_eq!(asset_file_name("My Pic.png"), "my_pic.png");
        assert_eq!(asset_file_name("folder/sub/Diagram 1.svg"), "diagram_1.svg");
        assert_eq!(asset_file_name(r"windows\path\Img.jpg"), "img.jpg");
    }

    #[test]
    fn test_asset_url() {
        assert_eq!(asset_url("pic.PNG", Some("docs/guide")), "/docs/guide/pic.png");
        assert_eq!(asset_url("pic.png", None), "/pic.png");
    }

    #[test]
    fn test_is_image_target() {
        assert!(is_image_target("pic.png"));
        assert!(is_image_target("PIC.JPG"));
        assert!(is_image_target("dir/shot.webp"));
        assert!(is_image_target("shot.png#center"));
        assert!(!is_image_target("Some Note"));
        assert!(!is_image_target("archive.tar.gz"));
    }

    #[test]
    fn test_strip_extension_keeps_dotfiles() {
        assert_eq!(page_path(".hidden", None), "hidden");
    }
}
