//! Asset folder materialization.
//!
//! Walks a page path segment by segment, reusing remote folders where
//! they exist and creating the missing ones. The remote's create
//! mutation does not return the new id, so every create is followed by
//! a fresh listing.

use crate::store::FolderStore;
use wikibridge_core::Result;

/// Root folder id on the remote.
pub const ROOT_FOLDER_ID: u64 = 0;

/// Outcome of materializing a folder chain.
#[derive(Debug, Clone)]
pub struct FolderPath {
    /// Id of the deepest folder reached.
    pub folder_id: u64,
    /// Non-fatal problems hit along the way. When any are present some
    /// segments are missing from the materialized chain, so the returned
    /// id sits shallower than requested.
    pub warnings: Vec<String>,
}

/// Materialize the folder chain for a page path.
///
/// The last path segment is the page name, not a folder; only the
/// segments before it are materialized. A page at the root yields the
/// root folder id.
///
/// Creation races with other publishers: if our create fails but a
/// re-listing shows the folder, someone else won the race and we take
/// their folder. If a segment can neither be found nor created, the
/// walk records a warning and continues from the nearest materialized
/// ancestor, so later segments still land under a valid, if shallower,
/// parent.
pub async fn ensure_folder_path<S: FolderStore + ?Sized>(
    store: &S,
    page_path: &str,
) -> Result<FolderPath> {
    let segments: Vec<&str> = page_path.split('/').filter(|s| !s.is_empty()).collect();

    let mut folder_id = ROOT_FOLDER_ID;
    let mut warnings = Vec::new();

    // Drop the page segment; empty or single-segment paths stay at root.
    let folder_segments = match segments.split_last() {
        Some((_, rest)) => rest,
        None => return Ok(FolderPath { folder_id, warnings }),
    };

    for segment in folder_segments {
        match descend(store, folder_id, segment).await? {
            Some(id) => folder_id = id,
            None => {
                let warning = format!(
                    "Could not create asset folder '{segment}', continuing from its parent folder"
                );
                log::warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    Ok(FolderPath { folder_id, warnings })
}

/// Find or create one child folder under `parent_id`.
async fn descend<S: FolderStore + ?Sized>(
    store: &S,
    parent_id: u64,
    slug: &str,
) -> Result<Option<u64>> {
    if let Some(id) = find_child(store, parent_id, slug).await? {
        return Ok(Some(id));
    }

    if let Err(e) = store.create_folder(parent_id, slug).await {
        log::debug!("Folder create for '{slug}' failed, re-listing: {e}");
    }

    // Either our create succeeded or a concurrent publisher's did; the
    // listing is the only way to learn the id in both cases. A failed
    // re-query counts as a failed segment, not a fatal error.
    match find_child(store, parent_id, slug).await {
        Ok(found) => Ok(found),
        Err(e) => {
            log::debug!("Re-query for '{slug}' failed: {e}");
            Ok(None)
        }
    }
}

async fn find_child<S: FolderStore + ?Sized>(
    store: &S,
    parent_id: u64,
    slug: &str,
) -> Result<Option<u64>> {
    let folders = store.list_folders(parent_id).await?;
    Ok(folders.into_iter().find(|f| f.slug == slug).map(|f| f.id))
}
