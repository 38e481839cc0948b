//! Image reference resolution: mapping a markup-level reference back to a
//! concrete vault file.
//!
//! References are ambiguous by design in the source dialect (bare names,
//! partial paths, attachment-folder conventions), so resolution is an
//! ordered chain of strategies; the first hit wins. One reference failing
//! never aborts the batch - unresolved references are reported alongside
//! the mapping.

use crate::lookup::FileLookup;
use std::collections::HashMap;
use std::path::PathBuf;
use wikibridge_core::{ImageRef, IMAGE_EXTENSIONS};

/// Strip query/fragment, unify separators, drop leading `/` and `./`.
fn normalize(raw: &str) -> String {
    let raw = raw.split(['?', '#']).next().unwrap_or(raw);
    let unified = raw.replace('\\', "/");
    let trimmed = unified.trim_start_matches('/');
    trimmed.strip_prefix("./").unwrap_or(trimmed).to_string()
}

/// Result of resolving a batch of image references.
#[derive(Debug, Default)]
pub struct ResolvedImages {
    /// raw reference path → vault-relative file
    pub files: HashMap<String, PathBuf>,
    /// references no strategy could place
    pub unresolved: Vec<String>,
}

/// The resolver: a lookup collaborator plus the conventional attachment
/// folder names to probe.
pub struct ImageResolver<'a, L: FileLookup + ?Sized> {
    lookup: &'a L,
    attachment_dirs: &'a [String],
}

impl<'a, L: FileLookup + ?Sized> ImageResolver<'a, L> {
    pub fn new(lookup: &'a L, attachment_dirs: &'a [String]) -> Self {
        Self {
            lookup,
            attachment_dirs,
        }
    }

    /// Resolve every reference in `images`, relative to the folder of the
    /// source note.
    pub fn resolve_images(&self, images: &[ImageRef], source_folder: &str) -> ResolvedImages {
        let mut resolved = ResolvedImages::default();
        for image in images {
            match self.resolve_one(&image.raw_path, source_folder) {
                Some(file) => {
                    log::debug!("Resolved '{}' -> {}", image.raw_path, file.display());
                    resolved.files.insert(image.raw_path.clone(), file);
                }
                None => {
                    log::warn!("Could not resolve image reference '{}'", image.raw_path);
                    resolved.unresolved.push(image.raw_path.clone());
                }
            }
        }
        resolved
    }

    /// Run the strategy chain for one reference.
    pub fn resolve_one(&self, raw: &str, source_folder: &str) -> Option<PathBuf> {
        let reference = normalize(raw);
        if reference.is_empty() {
            return None;
        }

        let strategies: [(&str, fn(&Self, &str, &str) -> Option<PathBuf>); 5] = [
            ("link-resolution", Self::by_link_resolution),
            ("direct-path", Self::by_direct_path),
            ("source-relative", Self::by_source_relative),
            ("attachment-folder", Self::by_attachment_folder),
            ("filename-search", Self::by_filename_search),
        ];

        for (name, strategy) in strategies {
            if let Some(file) = strategy(self, &reference, source_folder) {
                log::debug!("Strategy '{name}' matched '{reference}'");
                return Some(file);
            }
        }
        None
    }

    /// (a) the host's own link-resolution semantics, relative to the
    /// source note.
    fn by_link_resolution(&self, reference: &str, source_folder: &str) -> Option<PathBuf> {
        self.lookup.resolve_link(reference, source_folder)
    }

    /// (b) the normalized reference taken as a vault-absolute path.
    fn by_direct_path(&self, reference: &str, _source_folder: &str) -> Option<PathBuf> {
        self.lookup.get_file(reference)
    }

    /// (c) relative to the source folder, walking `./` and `../`
    /// segments by ascending to the parent.
    fn by_source_relative(&self, reference: &str, source_folder: &str) -> Option<PathBuf> {
        let mut parts: Vec<&str> = source_folder.split('/').filter(|s| !s.is_empty()).collect();
        for segment in reference.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    parts.pop()?;
                }
                other => parts.push(other),
            }
        }
        self.lookup.get_file(&parts.join("/"))
    }

    /// (d) conventional attachment folders: under the source folder
    /// first, then at the vault root.
    fn by_attachment_folder(&self, reference: &str, source_folder: &str) -> Option<PathBuf> {
        let name = reference.rsplit('/').next()?;

        if !source_folder.is_empty() {
            for dir in self.attachment_dirs {
                if let Some(file) = self.lookup.get_file(&format!("{source_folder}/{dir}/{name}")) {
                    return Some(file);
                }
            }
        }
        for dir in self.attachment_dirs {
            if let Some(file) = self.lookup.get_file(&format!("{dir}/{name}")) {
                return Some(file);
            }
        }
        None
    }

    /// (e) filename-only search across the whole vault: same-folder match
    /// preferred, a missing extension probed against the known image
    /// extensions, then the first match anywhere.
    fn by_filename_search(&self, reference: &str, source_folder: &str) -> Option<PathBuf> {
        let name = reference.rsplit('/').next()?;
        let mut wanted: Vec<String> = vec![name.to_string()];
        if !name.contains('.') {
            wanted.extend(IMAGE_EXTENSIONS.iter().map(|ext| format!("{name}.{ext}")));
        }

        let files = self.lookup.all_files();
        let matches = |f: &PathBuf| {
            f.file_name()
                .and_then(|n| n.to_str())
                .map(|n| wanted.iter().any(|w| w == n))
                .unwrap_or(false)
        };

        if let Some(near) = files.iter().find(|f| {
            matches(f)
                && f.parent()
                    .map(|p| p.to_string_lossy().replace('\\', "/") == source_folder)
                    .unwrap_or(source_folder.is_empty())
        }) {
            return Some(near.clone());
        }

        files.iter().find(|f| matches(f)).cloned()
    }
}
