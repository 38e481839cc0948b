//! The file-lookup collaborator the resolver depends on.
//!
//! Paths handed across this seam are always vault-relative with forward
//! slashes; the implementation owns the mapping to real filesystem
//! locations.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use wikibridge_core::Result;

/// Host-side file access: exact lookup, link resolution, enumeration,
/// and binary reads.
#[async_trait]
pub trait FileLookup: Send + Sync {
    /// Exact vault-relative path lookup.
    fn get_file(&self, path: &str) -> Option<PathBuf>;

    /// Resolve a note-link target the way the host application would
    /// (basename matching, shortest path wins), relative to the folder
    /// containing the source note.
    fn resolve_link(&self, link: &str, from_folder: &str) -> Option<PathBuf>;

    /// All files in the vault, vault-relative, in stable order.
    fn all_files(&self) -> Vec<PathBuf>;

    /// Read a file's binary content.
    async fn read_binary(&self, path: &Path) -> Result<Vec<u8>>;
}
