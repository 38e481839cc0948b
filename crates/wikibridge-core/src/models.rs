//! Canonical data models shared across the pipeline.

use serde::{Deserialize, Serialize};

/// A source note as read from the vault. Immutable input; the pipeline
/// only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Raw markdown text
    pub content: String,
    /// Source file name, extension included
    pub file_name: String,
    /// Vault-relative folder containing the note ("" for the vault root)
    pub folder: String,
}

impl Document {
    pub fn new(
        content: impl Into<String>,
        file_name: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            file_name: file_name.into(),
            folder: folder.into(),
        }
    }
}

/// One embedded image reference found during conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Bare filename (last path segment of the reference)
    pub name: String,
    /// The reference exactly as written in the source markup
    pub raw_path: String,
}

impl ImageRef {
    pub fn new(raw_path: impl Into<String>) -> Self {
        let raw_path = raw_path.into();
        let name = raw_path
            .replace('\\', "/")
            .rsplit('/')
            .next()
            .unwrap_or(&raw_path)
            .to_string();
        Self { name, raw_path }
    }
}

/// Output of one conversion call. Produced fresh per call; the same
/// document may be converted twice with different target paths (preview
/// then final) and the results are never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    /// Rewritten markup in the target dialect
    pub content: String,
    /// Extracted or derived page title
    pub title: String,
    /// Embedded image references, de-duplicated by normalized path
    pub images: Vec<ImageRef>,
}

/// A node of the remote asset-folder tree. Identifier 0 is the root.
/// Slug uniqueness is enforced per parent, not globally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFolder {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub parent_id: u64,
}

/// A page as known to the remote store. At most one page exists per path;
/// the remote enforces this, so "already exists" is an expected outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePage {
    pub id: u64,
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Per-image upload outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResult {
    /// Reference as written in the source note
    pub reference: String,
    /// Remote path the asset landed at, when the upload succeeded
    pub remote_path: Option<String>,
    pub success: bool,
    pub message: String,
}

impl ImageUploadResult {
    pub fn uploaded(reference: impl Into<String>, remote_path: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            remote_path: Some(remote_path.into()),
            success: true,
            message: "uploaded".to_string(),
        }
    }

    pub fn failed(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            remote_path: None,
            success: false,
            message: message.into(),
        }
    }
}

/// Page-level outcome of an upload attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub success: bool,
    pub message: String,
    pub page_id: Option<u64>,
    pub page_url: Option<String>,
    /// True when the attempt stopped because a page already exists at the
    /// target path and the caller has not confirmed the update.
    #[serde(default)]
    pub needs_confirmation: bool,
}

impl PageResult {
    pub fn ok(message: impl Into<String>, page_id: u64, page_url: Option<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            page_id: Some(page_id),
            page_url,
            needs_confirmation: false,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            page_id: None,
            page_url: None,
            needs_confirmation: false,
        }
    }

    pub fn conflict(path: &str) -> Self {
        Self {
            success: false,
            message: format!("A page already exists at '{path}'; confirm the update to proceed"),
            page_id: None,
            page_url: None,
            needs_confirmation: true,
        }
    }
}

/// Full result of one upload attempt: per-image outcomes plus one
/// page-level outcome. Consumed by the caller for feedback, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub images: Vec<ImageUploadResult>,
    pub page: PageResult,
}

impl UploadOutcome {
    /// Overall success is page-mutation success; image failures are
    /// reported separately.
    pub fn success(&self) -> bool {
        self.page.success
    }
}
