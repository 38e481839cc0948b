//! HTTP implementation of the remote store traits.
//!
//! One RPC endpoint (`/graphql`) carries all queries and mutations; a
//! separate multipart endpoint (`/u`) carries binary uploads. Transport
//! failures surface with status and raw body; remote-reported failures
//! surface with the remote's own message and are never retried here.

use crate::api::{ResponseResult, RpcRequest, RpcResponse, UploadResponse};
use crate::store::{AssetStore, FolderStore, PageDraft, PageStore};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::json;
use tracing::instrument;
use url::Url;
use wikibridge_core::{Error, RemoteFolder, RemotePage, Result, WikiConfig};

const FOLDER_LIST_QUERY: &str = r#"
query ($parentFolderId: Int!) {
  assets {
    folders(parentFolderId: $parentFolderId) {
      id
      slug
    }
  }
}"#;

const FOLDER_CREATE_MUTATION: &str = r#"
mutation ($parentFolderId: Int!, $slug: String!, $name: String!) {
  assets {
    createFolder(parentFolderId: $parentFolderId, slug: $slug, name: $name) {
      responseResult {
        succeeded
        message
      }
    }
  }
}"#;

const PAGE_BY_PATH_QUERY: &str = r#"
query ($path: String!, $locale: String!) {
  pages {
    singleByPath(path: $path, locale: $locale) {
      id
      path
      title
      description
    }
  }
}"#;

const PAGE_CREATE_MUTATION: &str = r#"
mutation ($content: String!, $description: String!, $editor: String!, $isPublished: Boolean!, $isPrivate: Boolean!, $locale: String!, $path: String!, $tags: [String]!, $title: String!) {
  pages {
    create(content: $content, description: $description, editor: $editor, isPublished: $isPublished, isPrivate: $isPrivate, locale: $locale, path: $path, tags: $tags, title: $title) {
      responseResult {
        succeeded
        message
      }
      page {
        id
        path
      }
    }
  }
}"#;

const PAGE_UPDATE_MUTATION: &str = r#"
mutation ($id: Int!, $content: String!, $description: String!, $editor: String!, $isPublished: Boolean!, $locale: String!, $tags: [String]!, $title: String!) {
  pages {
    update(id: $id, content: $content, description: $description, editor: $editor, isPublished: $isPublished, locale: $locale, tags: $tags, title: $title) {
      responseResult {
        succeeded
        message
      }
      page {
        id
        path
      }
    }
  }
}"#;

/// Client for one wiki instance.
pub struct WikiClient {
    http: Client,
    rpc_endpoint: Url,
    upload_endpoint: Url,
    token: String,
    locale: String,
    editor: String,
}

impl WikiClient {
    /// Build a client from configuration, resolving the API token.
    pub fn new(config: &WikiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| Error::config_error(format!("Invalid wiki URL: {e}")))?;
        let rpc_endpoint = base
            .join("graphql")
            .map_err(|e| Error::config_error(format!("Invalid wiki URL: {e}")))?;
        let upload_endpoint = base
            .join("u")
            .map_err(|e| Error::config_error(format!("Invalid wiki URL: {e}")))?;

        Ok(Self {
            http: Client::new(),
            rpc_endpoint,
            upload_endpoint,
            token: config.resolve_token()?,
            locale: config.locale.clone(),
            editor: config.editor.clone(),
        })
    }

    /// Send one RPC envelope and unwrap the data payload.
    #[instrument(skip(self, variables), fields(endpoint = %self.rpc_endpoint))]
    async fn rpc(&self, query: &str, variables: serde_json::Value) -> Result<serde_json::Value> {
        let request = RpcRequest { query, variables };

        let response = self
            .http
            .post(self.rpc_endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::http(0, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(status.as_u16(), e.to_string()))?;

        if !status.is_success() {
            return Err(Error::http(status.as_u16(), body));
        }

        let parsed: RpcResponse = serde_json::from_str(&body)
            .map_err(|_| Error::http(status.as_u16(), body.clone()))?;
        parsed.into_data()
    }

    fn parse_page(value: &serde_json::Value) -> Result<RemotePage> {
        serde_json::from_value(value.clone()).map_err(Error::Json)
    }

    /// Mutations return the page as a bare `{id, path}` pair; fill the
    /// rest from the draft that produced it.
    fn mutated_page(value: &serde_json::Value, draft: &PageDraft) -> Result<RemotePage> {
        let id = value["id"]
            .as_u64()
            .ok_or_else(|| Error::remote("Mutation response carried no page id"))?;
        let path = value["path"]
            .as_str()
            .unwrap_or(&draft.path)
            .to_string();
        Ok(RemotePage {
            id,
            path,
            title: draft.title.clone(),
            description: draft.description.clone(),
            tags: draft.tags.clone(),
        })
    }
}

#[async_trait]
impl FolderStore for WikiClient {
    async fn list_folders(&self, parent_id: u64) -> Result<Vec<RemoteFolder>> {
        let data = self
            .rpc(FOLDER_LIST_QUERY, json!({ "parentFolderId": parent_id }))
            .await?;

        let folders = data["assets"]["folders"].clone();
        let mut listed: Vec<RemoteFolder> =
            serde_json::from_value(folders).map_err(Error::Json)?;
        for folder in &mut listed {
            folder.parent_id = parent_id;
        }
        Ok(listed)
    }

    async fn create_folder(&self, parent_id: u64, slug: &str) -> Result<()> {
        let data = self
            .rpc(
                FOLDER_CREATE_MUTATION,
                json!({ "parentFolderId": parent_id, "slug": slug, "name": slug }),
            )
            .await?;

        let result: ResponseResult =
            serde_json::from_value(data["assets"]["createFolder"]["responseResult"].clone())
                .map_err(Error::Json)?;
        result.check()
    }
}

#[async_trait]
impl PageStore for WikiClient {
    async fn page_by_path(&self, path: &str) -> Result<Option<RemotePage>> {
        let outcome = self
            .rpc(
                PAGE_BY_PATH_QUERY,
                json!({ "path": path, "locale": self.locale }),
            )
            .await;

        match outcome {
            Ok(data) => {
                let page = &data["pages"]["singleByPath"];
                if page.is_null() {
                    Ok(None)
                } else {
                    Self::parse_page(page).map(Some)
                }
            }
            // The remote reports a missing page as an error rather than
            // a null payload.
            Err(Error::Remote { message }) if message.to_lowercase().contains("not found") => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn create_page(&self, draft: &PageDraft) -> Result<RemotePage> {
        let data = self
            .rpc(
                PAGE_CREATE_MUTATION,
                json!({
                    "content": draft.content,
                    "description": draft.description,
                    "editor": self.editor,
                    "isPublished": true,
                    "isPrivate": false,
                    "locale": self.locale,
                    "path": draft.path,
                    "tags": draft.tags,
                    "title": draft.title,
                }),
            )
            .await?;

        let create = &data["pages"]["create"];
        let result: ResponseResult =
            serde_json::from_value(create["responseResult"].clone()).map_err(Error::Json)?;
        result.check()?;

        Self::mutated_page(&create["page"], draft)
    }

    async fn update_page(&self, id: u64, draft: &PageDraft) -> Result<RemotePage> {
        let data = self
            .rpc(
                PAGE_UPDATE_MUTATION,
                json!({
                    "id": id,
                    "content": draft.content,
                    "description": draft.description,
                    "editor": self.editor,
                    "isPublished": true,
                    "locale": self.locale,
                    "tags": draft.tags,
                    "title": draft.title,
                }),
            )
            .await?;

        let update = &data["pages"]["update"];
        let result: ResponseResult =
            serde_json::from_value(update["responseResult"].clone()).map_err(Error::Json)?;
        result.check()?;

        Self::mutated_page(&update["page"], draft)
    }
}

#[async_trait]
impl AssetStore for WikiClient {
    #[instrument(skip(self, bytes), fields(file = file_name, folder = folder_id, size = bytes.len()))]
    async fn upload_asset(
        &self,
        folder_id: u64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let meta = serde_json::to_string(&json!({ "folderId": folder_id }))?;
        let form = Form::new()
            .part("mediaUpload", Part::text(meta))
            .part(
                "mediaUpload",
                Part::bytes(bytes).file_name(file_name.to_string()),
            );

        let response = self
            .http
            .post(self.upload_endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::http(0, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(status.as_u16(), e.to_string()))?;

        if !status.is_success() {
            return Err(Error::http(status.as_u16(), body));
        }

        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|_| Error::http(status.as_u16(), body.clone()))?;
        parsed.location()
    }
}
