//! Publishing orchestration.
//!
//! Drives one note through the full pipeline: path derivation, conflict
//! check, conversion, tag extraction, image resolution, asset folder
//! materialization, uploads, and the final page mutation. Image
//! failures are reported per image and never abort the page; a page
//! conflict without confirmation aborts before anything is uploaded.

use tracing::instrument;
use wikibridge_convert::{convert, ConvertOptions};
use wikibridge_core::{
    asset_file_name, extract_tags, page_path, Conversion, Document, ImageUploadResult, PageResult,
    Result, UploadOutcome, WikiConfig,
};
use wikibridge_remote::store::{AssetStore, FolderStore, PageDraft, PageStore};
use wikibridge_remote::{ensure_folder_path, FolderPath};
use wikibridge_vault::{FileLookup, ImageResolver};

/// Everything the remote side of publishing needs.
pub trait Remote: FolderStore + PageStore + AssetStore {}
impl<T: FolderStore + PageStore + AssetStore> Remote for T {}

/// Per-call knobs.
#[derive(Debug, Clone, Default)]
pub struct PublishRequest {
    /// Folder prefix overriding both the note's vault folder and the
    /// configured default
    pub folder: Option<String>,
    /// Proceed when a page already exists at the target path
    pub allow_update: bool,
}

/// One vault wired to one remote.
pub struct Publisher<'a, L: FileLookup + ?Sized, R: Remote + ?Sized> {
    lookup: &'a L,
    remote: &'a R,
    config: &'a WikiConfig,
}

impl<'a, L: FileLookup + ?Sized, R: Remote + ?Sized> Publisher<'a, L, R> {
    pub fn new(lookup: &'a L, remote: &'a R, config: &'a WikiConfig) -> Self {
        Self {
            lookup,
            remote,
            config,
        }
    }

    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            preserve_wiki_syntax: self.config.preserve_wiki_syntax,
            auto_convert_links: self.config.auto_convert_links,
        }
    }

    fn target_folder<'b>(&'b self, document: &'b Document, request: &'b PublishRequest) -> &'b str {
        request
            .folder
            .as_deref()
            .or(self.config.default_folder.as_deref())
            .unwrap_or(&document.folder)
    }

    /// The wiki path this document would publish to.
    pub fn target_path(&self, document: &Document, request: &PublishRequest) -> String {
        let folder = self.target_folder(document, request);
        let folder = (!folder.is_empty()).then_some(folder);
        page_path(&document.file_name, folder)
    }

    /// Convert without touching the remote. Used for previews; the
    /// output for the same inputs is identical to what publishing sends.
    pub fn preview(&self, document: &Document, request: &PublishRequest) -> Conversion {
        let path = self.target_path(document, request);
        convert(
            &document.content,
            &document.file_name,
            Some(&path),
            self.options(),
        )
    }

    /// Publish one document end to end.
    #[instrument(skip(self, document, request), fields(file = %document.file_name))]
    pub async fn publish(
        &self,
        document: &Document,
        request: &PublishRequest,
    ) -> Result<UploadOutcome> {
        let path = self.target_path(document, request);

        let existing = self.remote.page_by_path(&path).await?;
        if existing.is_some() && !request.allow_update {
            return Ok(UploadOutcome {
                images: Vec::new(),
                page: PageResult::conflict(&path),
            });
        }

        let conversion = convert(
            &document.content,
            &document.file_name,
            Some(&path),
            self.options(),
        );
        let tags = extract_tags(&document.content);

        let (images, folder_warnings) = self.upload_images(document, &conversion, &path).await?;

        let draft = PageDraft {
            path: path.clone(),
            title: conversion.title,
            description: String::new(),
            content: conversion.content,
            tags,
        };

        let updating = existing.is_some();
        let page = match existing {
            Some(remote_page) => {
                log::info!("Updating page {} at {path}", remote_page.id);
                self.remote.update_page(remote_page.id, &draft).await
            }
            None => {
                log::info!("Creating page at {path}");
                self.remote.create_page(&draft).await
            }
        };

        let page = match page {
            Ok(remote_page) => {
                let verb = if updating { "Updated" } else { "Created" };
                let mut message = format!("{verb} page '{}'", draft.title);
                for warning in &folder_warnings {
                    message.push_str("; ");
                    message.push_str(warning);
                }
                PageResult::ok(message, remote_page.id, Some(self.page_url(&remote_page.path)))
            }
            Err(e) => PageResult::failed(e.to_string()),
        };

        Ok(UploadOutcome { images, page })
    }

    /// Resolve and upload every image the conversion found. Each image
    /// fails independently and is reported in its own result; only a
    /// failure to query the asset folder tree at all aborts the attempt.
    async fn upload_images(
        &self,
        document: &Document,
        conversion: &Conversion,
        path: &str,
    ) -> Result<(Vec<ImageUploadResult>, Vec<String>)> {
        if conversion.images.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let resolver = ImageResolver::new(self.lookup, &self.config.attachment_dirs);
        let resolved = resolver.resolve_images(&conversion.images, &document.folder);

        let FolderPath {
            folder_id,
            warnings,
        } = ensure_folder_path(self.remote, path).await?;

        let mut results = Vec::with_capacity(conversion.images.len());
        for image in &conversion.images {
            let Some(file) = resolved.files.get(&image.raw_path) else {
                results.push(ImageUploadResult::failed(
                    &image.raw_path,
                    "Could not locate the image in the vault",
                ));
                continue;
            };

            let bytes = match self.lookup.read_binary(file).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    results.push(ImageUploadResult::failed(&image.raw_path, e.to_string()));
                    continue;
                }
            };

            let file_name = asset_file_name(&image.raw_path);
            match self.remote.upload_asset(folder_id, &file_name, bytes).await {
                Ok(location) => {
                    log::debug!("Uploaded {} to {location}", image.raw_path);
                    results.push(ImageUploadResult::uploaded(&image.raw_path, location));
                }
                Err(e) => {
                    log::warn!("Upload of {} failed: {e}", image.raw_path);
                    results.push(ImageUploadResult::failed(&image.raw_path, e.to_string()));
                }
            }
        }

        Ok((results, warnings))
    }

    fn page_url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }
}
