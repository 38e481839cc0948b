//! End-to-end publishing against a temp-dir vault and an in-memory
//! remote.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;
use wikibridge::{PublishRequest, Publisher};
use wikibridge_core::{Document, Error, RemoteFolder, RemotePage, Result, WikiConfig};
use wikibridge_remote::store::{AssetStore, FolderStore, PageDraft, PageStore};
use wikibridge_vault::VaultIndex;

#[derive(Default)]
struct FakeRemote {
    folders: Mutex<Vec<RemoteFolder>>,
    pages: Mutex<Vec<RemotePage>>,
    page_content: Mutex<HashMap<u64, String>>,
    uploads: Mutex<Vec<(u64, String, usize)>>,
    next_id: Mutex<u64>,
}

impl FakeRemote {
    fn take_id(&self) -> u64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }

    fn seed_page(&self, path: &str, title: &str) -> u64 {
        let id = self.take_id();
        self.pages.lock().unwrap().push(RemotePage {
            id,
            path: path.to_string(),
            title: title.to_string(),
            description: String::new(),
            tags: Vec::new(),
        });
        id
    }
}

#[async_trait]
impl FolderStore for FakeRemote {
    async fn list_folders(&self, parent_id: u64) -> Result<Vec<RemoteFolder>> {
        Ok(self
            .folders
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.parent_id == parent_id)
            .cloned()
            .collect())
    }

    async fn create_folder(&self, parent_id: u64, slug: &str) -> Result<()> {
        let id = self.take_id();
        self.folders.lock().unwrap().push(RemoteFolder {
            id,
            slug: slug.to_string(),
            parent_id,
        });
        Ok(())
    }
}

#[async_trait]
impl PageStore for FakeRemote {
    async fn page_by_path(&self, path: &str) -> Result<Option<RemotePage>> {
        Ok(self
            .pages
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.path == path)
            .cloned())
    }

    async fn create_page(&self, draft: &PageDraft) -> Result<RemotePage> {
        if self.pages.lock().unwrap().iter().any(|p| p.path == draft.path) {
            return Err(Error::remote("Page already exists"));
        }
        let id = self.take_id();
        let page = RemotePage {
            id,
            path: draft.path.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            tags: draft.tags.clone(),
        };
        self.pages.lock().unwrap().push(page.clone());
        self.page_content
            .lock()
            .unwrap()
            .insert(id, draft.content.clone());
        Ok(page)
    }

    async fn update_page(&self, id: u64, draft: &PageDraft) -> Result<RemotePage> {
        let mut pages = self.pages.lock().unwrap();
        let page = pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::remote("No such page"))?;
        page.title = draft.title.clone();
        page.tags = draft.tags.clone();
        self.page_content
            .lock()
            .unwrap()
            .insert(id, draft.content.clone());
        Ok(page.clone())
    }
}

#[async_trait]
impl AssetStore for FakeRemote {
    async fn upload_asset(&self, folder_id: u64, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        self.uploads
            .lock()
            .unwrap()
            .push((folder_id, file_name.to_string(), bytes.len()));
        Ok(format!("/{file_name}"))
    }
}

fn config() -> WikiConfig {
    WikiConfig::builder("https://wiki.example.com")
        .api_token("secret")
        .build()
        .unwrap()
}

fn vault_with(files: &[(&str, &[u8])]) -> (TempDir, VaultIndex) {
    let temp = TempDir::new().unwrap();
    for (path, bytes) in files {
        let full = temp.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, bytes).unwrap();
    }
    let index = VaultIndex::open(temp.path()).unwrap();
    (temp, index)
}

#[tokio::test]
async fn test_publish_creates_page_with_tags() {
    let (_temp, vault) = vault_with(&[("docs/Note.md", b"# My Note\n\nBody #rust\n")]);
    let remote = FakeRemote::default();
    let config = config();
    let publisher = Publisher::new(&vault, &remote, &config);

    let document = Document::new("# My Note\n\nBody #rust\n", "Note.md", "docs");
    let outcome = publisher
        .publish(&document, &PublishRequest::default())
        .await
        .unwrap();

    assert!(outcome.success());
    assert_eq!(outcome.page.page_url.as_deref(), Some("https://wiki.example.com/docs/note"));

    let pages = remote.pages.lock().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].path, "docs/note");
    assert_eq!(pages[0].title, "My Note");
    assert_eq!(pages[0].tags, vec!["rust"]);
}

#[tokio::test]
async fn test_publish_uploads_images_into_page_folder() {
    let content = "# Pic Note\n\n![[shot.png]]\n";
    let (_temp, vault) = vault_with(&[
        ("docs/Pic Note.md", content.as_bytes()),
        ("docs/attachments/shot.png", b"\x89PNG fake"),
    ]);
    let remote = FakeRemote::default();
    let config = config();
    let publisher = Publisher::new(&vault, &remote, &config);

    let document = Document::new(content, "Pic Note.md", "docs");
    let outcome = publisher
        .publish(&document, &PublishRequest::default())
        .await
        .unwrap();

    assert!(outcome.success());
    assert_eq!(outcome.images.len(), 1);
    assert!(outcome.images[0].success);

    // The upload landed in the materialized "docs" folder, not the root.
    let folders = remote.folders.lock().unwrap();
    let docs = folders.iter().find(|f| f.slug == "docs").unwrap();
    let uploads = remote.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, docs.id);
    assert_eq!(uploads[0].1, "shot.png");

    // The page body references the rewritten asset URL, rooted at the
    // full page path.
    let pages = remote.pages.lock().unwrap();
    let body = remote.page_content.lock().unwrap()[&pages[0].id].clone();
    assert!(
        body.contains("![shot.png](/docs/pic-note/shot.png)"),
        "body: {body}"
    );
}

#[tokio::test]
async fn test_conflict_without_update_flag() {
    let (_temp, vault) = vault_with(&[("Note.md", b"# Note\n")]);
    let remote = FakeRemote::default();
    remote.seed_page("note", "Old Note");
    let config = config();
    let publisher = Publisher::new(&vault, &remote, &config);

    let document = Document::new("# Note\n", "Note.md", "");
    let outcome = publisher
        .publish(&document, &PublishRequest::default())
        .await
        .unwrap();

    assert!(!outcome.success());
    assert!(outcome.page.needs_confirmation);
    assert!(outcome.images.is_empty());
    // Nothing was mutated.
    assert_eq!(remote.pages.lock().unwrap()[0].title, "Old Note");
}

#[tokio::test]
async fn test_update_with_flag_overwrites() {
    let (_temp, vault) = vault_with(&[("Note.md", b"# Fresh Title\n")]);
    let remote = FakeRemote::default();
    let id = remote.seed_page("note", "Old Note");
    let config = config();
    let publisher = Publisher::new(&vault, &remote, &config);

    let document = Document::new("# Fresh Title\n", "Note.md", "");
    let request = PublishRequest {
        allow_update: true,
        ..Default::default()
    };
    let outcome = publisher.publish(&document, &request).await.unwrap();

    assert!(outcome.success());
    assert_eq!(outcome.page.page_id, Some(id));
    assert_eq!(remote.pages.lock().unwrap()[0].title, "Fresh Title");
}

#[tokio::test]
async fn test_unresolved_image_does_not_block_page() {
    let content = "# Note\n\n![[missing.png]]\n";
    let (_temp, vault) = vault_with(&[("Note.md", content.as_bytes())]);
    let remote = FakeRemote::default();
    let config = config();
    let publisher = Publisher::new(&vault, &remote, &config);

    let document = Document::new(content, "Note.md", "");
    let outcome = publisher
        .publish(&document, &PublishRequest::default())
        .await
        .unwrap();

    assert!(outcome.success());
    assert_eq!(outcome.images.len(), 1);
    assert!(!outcome.images[0].success);
    assert!(remote.uploads.lock().unwrap().is_empty());
    assert_eq!(remote.pages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_folder_override_beats_vault_folder() {
    let (_temp, vault) = vault_with(&[("docs/Note.md", b"# Note\n")]);
    let remote = FakeRemote::default();
    let config = config();
    let publisher = Publisher::new(&vault, &remote, &config);

    let document = Document::new("# Note\n", "Note.md", "docs");
    let request = PublishRequest {
        folder: Some("Published Stuff".to_string()),
        allow_update: false,
    };
    let outcome = publisher.publish(&document, &request).await.unwrap();

    assert!(outcome.success());
    assert_eq!(remote.pages.lock().unwrap()[0].path, "published-stuff/note");
}

#[tokio::test]
async fn test_preview_matches_published_content() {
    let content = "---\ntags: [a]\n---\n# Note\n\n[[Other Note]]\n";
    let (_temp, vault) = vault_with(&[("Note.md", content.as_bytes())]);
    let remote = FakeRemote::default();
    let config = config();
    let publisher = Publisher::new(&vault, &remote, &config);

    let document = Document::new(content, "Note.md", "");
    let preview = publisher.preview(&document, &PublishRequest::default());
    let outcome = publisher
        .publish(&document, &PublishRequest::default())
        .await
        .unwrap();

    let pages = remote.pages.lock().unwrap();
    let published = remote.page_content.lock().unwrap()[&pages[0].id].clone();
    assert_eq!(preview.content, published);
    assert!(outcome.success());
}
