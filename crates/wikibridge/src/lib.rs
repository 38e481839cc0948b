//! End-to-end publishing of a notes vault to a remote wiki.
//!
//! This crate wires the conversion pipeline, the vault index, and the
//! remote client together. [`Publisher`] is the entry point:
//!
//! ```no_run
//! use wikibridge::{Publisher, PublishRequest};
//! use wikibridge_core::{Document, WikiConfig};
//! use wikibridge_remote::WikiClient;
//! use wikibridge_vault::VaultIndex;
//!
//! # async fn run() -> wikibridge_core::Result<()> {
//! let config = WikiConfig::builder("https://wiki.example.com").build()?;
//! let vault = VaultIndex::open("/notes")?;
//! let client = WikiClient::new(&config)?;
//!
//! let publisher = Publisher::new(&vault, &client, &config);
//! let document = Document::new("# Hello\n", "hello.md", "");
//! let outcome = publisher.publish(&document, &PublishRequest::default()).await?;
//! assert!(outcome.success());
//! # Ok(())
//! # }
//! ```

pub mod publish;

pub use publish::{PublishRequest, Publisher, Remote};
