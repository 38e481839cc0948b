//! Collaborator traits decoupling the pipeline from the HTTP transport.
//!
//! The materializer and the orchestrator only ever see these traits;
//! tests inject in-memory fakes, production injects [`crate::WikiClient`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wikibridge_core::{RemoteFolder, RemotePage, Result};

/// Everything needed to create or update a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDraft {
    pub path: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Folder query/create channel.
///
/// `create_folder` intentionally returns no identifier: the remote
/// protocol does not report one, so callers re-query after creating.
#[async_trait]
pub trait FolderStore: Send + Sync {
    /// Child folders of `parent_id` (0 is the root).
    async fn list_folders(&self, parent_id: u64) -> Result<Vec<RemoteFolder>>;

    /// Create a child folder. May fail because a concurrent actor
    /// created the same slug first; callers handle that by re-querying.
    async fn create_folder(&self, parent_id: u64, slug: &str) -> Result<()>;
}

/// Page query/mutation channel.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// The page at `path`, if one exists. "No page here" is an expected
    /// outcome, not an error.
    async fn page_by_path(&self, path: &str) -> Result<Option<RemotePage>>;

    async fn create_page(&self, draft: &PageDraft) -> Result<RemotePage>;

    async fn update_page(&self, id: u64, draft: &PageDraft) -> Result<RemotePage>;
}

/// Binary upload channel.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload `bytes` as `file_name` into the folder `folder_id`,
    /// returning the remote location.
    async fn upload_asset(&self, folder_id: u64, file_name: &str, bytes: Vec<u8>)
        -> Result<String>;
}
