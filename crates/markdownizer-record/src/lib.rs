//! Markdown fields for stored records.
//!
//! A record type with a raw text column `body` and a column `rendered_body`
//! registers `body` once at configuration time; afterwards every save renders
//! `body` into `rendered_body`.
//!
//! # Architecture
//!
//! - [`Record`] trait: column access for one stored record
//! - [`Markdownize`] registry: per-type list of [`FieldTransform`]s, validated
//!   against the type's columns when registered
//! - [`MemoryRecord`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use markdownizer_core::{Markdownizer, RenderOptions};
//! use markdownizer_record::{Markdownize, MemoryRecord, Record};
//!
//! let mut post = MemoryRecord::new("Post")
//!     .with_value("body", "# Title")
//!     .with_column("rendered_body");
//!
//! let mut fields = Markdownize::for_record(&post);
//! fields.markdownize("body", RenderOptions::default(), 1)?;
//!
//! fields.before_save(&Markdownizer::plain(), &mut post);
//! assert_eq!(post.read("rendered_body"), Some("<h2>Title</h2>\n"));
//! ```

mod error;
#[cfg(any(test, feature = "mock"))]
mod memory;
mod record;

pub use error::BindingError;
#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryRecord;
pub use record::{FieldTransform, Markdownize, Record, rendered_column};
