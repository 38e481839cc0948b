//! # wikibridge-vault
//!
//! Local vault access for the publishing pipeline: file enumeration, the
//! [`FileLookup`] collaborator trait, and the image reference resolver.
//!
//! ## Resolution chain
//!
//! A markup-level image reference rarely names a file unambiguously, so
//! [`ImageResolver`] runs an ordered strategy chain (host link
//! resolution, direct path, source-relative with `../` walking,
//! conventional attachment folders, vault-wide filename search) and takes
//! the first hit. Unresolved references are reported per image and never
//! abort the batch.
//!
//! ```no_run
//! use wikibridge_vault::{ImageResolver, VaultIndex};
//! use wikibridge_core::ImageRef;
//!
//! # fn main() -> wikibridge_core::Result<()> {
//! let index = VaultIndex::open("/path/to/vault")?;
//! let dirs = vec!["attachments".to_string()];
//! let resolver = ImageResolver::new(&index, &dirs);
//!
//! let images = vec![ImageRef::new("pic.png")];
//! let resolved = resolver.resolve_images(&images, "notes");
//! for (reference, file) in &resolved.files {
//!     println!("{reference} -> {}", file.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod index;
pub mod lookup;
pub mod resolve;

pub use index::VaultIndex;
pub use lookup::FileLookup;
pub use resolve::{ImageResolver, ResolvedImages};
