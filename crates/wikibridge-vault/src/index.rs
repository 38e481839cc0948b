//! Vault file index: a scan of the vault tree with link-resolution
//! semantics matching the host note application.

use crate::lookup::FileLookup;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use wikibridge_core::{Error, Result};

/// Directories never scanned.
const EXCLUDED_DIRS: &[&str] = &[".obsidian", ".git", ".trash", "node_modules"];

/// An in-memory listing of a vault directory.
///
/// Built once per upload attempt; the scan is cheap relative to the
/// network work and a fresh index avoids staleness between attempts.
pub struct VaultIndex {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl VaultIndex {
    /// Scan `root` and build the index.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::invalid_path(format!(
                "Vault root is not a directory: {}",
                root.display()
            )));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root).into_iter().filter_entry(|e| {
            // depth 0 is the root itself; never filter it
            e.depth() == 0
                || e.file_name()
                    .to_str()
                    .map(|name| !EXCLUDED_DIRS.contains(&name) && !name.starts_with('.'))
                    .unwrap_or(false)
        });

        for entry in walker {
            let entry = entry.map_err(|e| Error::other(format!("Vault scan failed: {e}")))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&root) {
                files.push(rel.to_path_buf());
            }
        }

        files.sort();
        log::debug!("Indexed {} files under {}", files.len(), root.display());
        Ok(Self { root, files })
    }

    /// The vault root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Vault-relative folder of a note given its relative path.
    pub fn folder_of(path: &Path) -> String {
        path.parent()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default()
    }

    fn rel_str(path: &Path) -> String {
        path.to_string_lossy().replace('\\', "/")
    }
}

#[async_trait]
impl FileLookup for VaultIndex {
    fn get_file(&self, path: &str) -> Option<PathBuf> {
        let wanted = path.trim_start_matches('/');
        self.files
            .iter()
            .find(|f| Self::rel_str(f) == wanted)
            .cloned()
    }

    fn resolve_link(&self, link: &str, from_folder: &str) -> Option<PathBuf> {
        let link = link.trim().trim_start_matches('/');
        if link.is_empty() {
            return None;
        }

        // A folder-qualified link resolves against the full relative path.
        if link.contains('/') {
            return self
                .files
                .iter()
                .find(|f| Self::rel_str(f).ends_with(link))
                .cloned();
        }

        // Bare-name link: collect basename matches, prefer the source
        // folder, then the fewest path segments (the host's shortest-path
        // rule).
        let mut candidates: Vec<&PathBuf> = self
            .files
            .iter()
            .filter(|f| {
                f.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n == link)
                    .unwrap_or(false)
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }

        if let Some(near) = candidates
            .iter()
            .find(|f| Self::folder_of(f) == from_folder)
        {
            return Some((*near).clone());
        }

        candidates.sort_by_key(|f| f.components().count());
        candidates.first().map(|f| (*f).clone())
    }

    fn all_files(&self) -> Vec<PathBuf> {
        self.files.clone()
    }

    async fn read_binary(&self, path: &Path) -> Result<Vec<u8>> {
        let full = self.root.join(path);
        tokio::fs::read(&full)
            .await
            .map_err(|_| Error::file_not_found(full))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault_with(files: &[&str]) -> (TempDir, VaultIndex) {
        let temp = TempDir::new().unwrap();
        for f in files {
            let path = temp.path().join(f);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, b"x").unwrap();
        }
        let index = VaultIndex::open(temp.path()).unwrap();
        (temp, index)
    }

    #[test]
    fn test_scan_excludes_hidden_dirs() {
        let (_t, index) = vault_with(&["note.md", ".obsidian/config", ".git/HEAD"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_get_file_exact() {
        let (_t, index) = vault_with(&["docs/pic.png"]);
        assert_eq!(index.get_file("docs/pic.png"), Some(PathBuf::from("docs/pic.png")));
        assert_eq!(index.get_file("/docs/pic.png"), Some(PathBuf::from("docs/pic.png")));
        assert!(index.get_file("pic.png").is_none());
    }

    #[test]
    fn test_resolve_link_prefers_source_folder() {
        let (_t, index) = vault_with(&["a/pic.png", "b/pic.png"]);
        assert_eq!(
            index.resolve_link("pic.png", "b"),
            Some(PathBuf::from("b/pic.png"))
        );
    }

    #[test]
    fn test_resolve_link_shortest_path() {
        let (_t, index) = vault_with(&["deep/nested/pic.png", "shallow/pic.png"]);
        assert_eq!(
            index.resolve_link("pic.png", "elsewhere"),
            Some(PathBuf::from("shallow/pic.png"))
        );
    }

    #[test]
    fn test_resolve_link_folder_qualified() {
        let (_t, index) = vault_with(&["x/assets/pic.png"]);
        assert_eq!(
            index.resolve_link("assets/pic.png", ""),
            Some(PathBuf::from("x/assets/pic.png"))
        );
    }

    #[tokio::test]
    async fn test_read_binary() {
        let (_t, index) = vault_with(&["pic.png"]);
        let bytes = index.read_binary(Path::new("pic.png")).await.unwrap();
        assert_eq!(bytes, b"x");

        assert!(index.read_binary(Path::new("missing.png")).await.is_err());
    }

    #[test]
    fn test_folder_of() {
        assert_eq!(VaultIndex::folder_of(Path::new("a/b/c.md")), "a/b");
        assert_eq!(VaultIndex::folder_of(Path::new("c.md")), "");
    }
}
