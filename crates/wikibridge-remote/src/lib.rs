//! Remote wiki access.
//!
//! The wire protocol lives in [`api`], the storage traits in [`store`],
//! and the HTTP client implementing them in [`client`]. The [`folders`]
//! module materializes asset folder chains on top of any
//! [`FolderStore`].
//!
//! Orchestration code depends on the traits rather than on
//! [`WikiClient`] directly, which keeps publishing testable without a
//! live wiki.

pub mod api;
pub mod client;
pub mod folders;
pub mod store;

pub use api::{RpcError, RpcRequest, RpcResponse, UploadResponse};
pub use client::WikiClient;
pub use folders::{ensure_folder_path, FolderPath, ROOT_FOLDER_ID};
pub use store::{AssetStore, FolderStore, PageDraft, PageStore};
