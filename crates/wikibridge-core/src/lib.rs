//! # wikibridge-core
//!
//! Core data models, error types, configuration, and path normalization
//! for the wikibridge publishing pipeline. This crate defines the
//! canonical types that all other crates depend on.
//!
//! ## Core Modules
//!
//! - [`models`] - Pipeline data types (Document, Conversion, UploadOutcome, ...)
//! - [`error`] - Error type and Result alias
//! - [`config`] - Wiki connection and conversion configuration
//! - [`paths`] - Page path / slug generation and asset filename rules
//! - [`tags`] - Front-matter and inline tag extraction
//!
//! ## Path normalization
//!
//! The remote wiki applies its own normalization to uploaded filenames, so
//! [`paths::asset_file_name`] must be the single source of truth wherever
//! an image's remote location is derived:
//!
//! ```
//! use wikibridge_core::paths::{asset_url, page_path};
//!
//! let page = page_path("2024-01-01-My Note.md", Some("Folder A"));
//! assert_eq!(page, "folder-a/my-note");
//! assert_eq!(asset_url("Shot 1.PNG", Some(&page)), "/folder-a/my-note/shot_1.png");
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod paths;
pub mod tags;

pub use config::{WikiConfig, WikiConfigBuilder, TOKEN_ENV};
pub use error::{Error, Result};
pub use models::*;
pub use paths::{asset_file_name, asset_url, is_image_target, page_path, IMAGE_EXTENSIONS};
pub use tags::{extract_tags, split_front_matter};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::WikiConfig;
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Conversion, Document, ImageRef, ImageUploadResult, PageResult, RemoteFolder, RemotePage,
        UploadOutcome,
    };
    pub use crate::paths::{asset_file_name, asset_url, is_image_target, page_path};
    pub use crate::tags::extract_tags;
}
