//! # wikibridge-convert
//!
//! Converts note-dialect markup (wikilinks, embeds, inline tags,
//! admonition blocks, front-matter) into the dialect the remote wiki
//! accepts.
//!
//! The converter is a pipeline of independent rewrite stages, each a pure
//! text → text function, composed in a fixed order. Image references are
//! collected from the original text before any rewriting so the stages
//! cannot interfere with extraction.
//!
//! ## Quick Start
//!
//! ```
//! use wikibridge_convert::{convert, ConvertOptions};
//!
//! let conv = convert(
//!     "# Guide\n\n![[pic.PNG]] see [[Other Note]]",
//!     "guide.md",
//!     Some("docs/guide"),
//!     ConvertOptions::default(),
//! );
//!
//! assert_eq!(conv.title, "Guide");
//! assert!(conv.content.contains("![pic.PNG](/docs/guide/pic.png)"));
//! assert!(conv.content.contains("[Other Note](/other-note)"));
//! assert_eq!(conv.images.len(), 1);
//! ```
//!
//! ## Stage order
//!
//! 1. Title extraction and image collection (original text)
//! 2. Embed rewriting, wikilinks, inline tags, admonitions
//! 3. Relative-link rewriting
//! 4. Cleanup (front-matter strip, blank-line collapsing)
//!
//! A double-bracket target ending in an image extension always takes the
//! image rule, never the link rule; the embed stage runs before the
//! wikilink stage and the wikilink stage re-checks, so the ordering
//! invariant holds even for bare `[[pic.png]]` references.

mod pipeline;
pub mod stages;

pub use pipeline::{convert, ConvertOptions};
pub use stages::images::{extract_images, normalize_reference};
