//! Markdown-vault item source for Peck.
//!
//! Walks a directory of Markdown notes, reads each note's frontmatter, and
//! admits the notes that carry a usable rating-source property as
//! comparable items.

pub mod error;
pub mod parse;
mod source;

pub use error::{Error, Result};
pub use source::VaultSource;
