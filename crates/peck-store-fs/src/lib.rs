//! Filesystem backend for the Peck document store.
//!
//! Maps the [`DocumentStore`](peck_core::store::DocumentStore) capability
//! onto a plain directory of JSON files via [`tokio::fs`].

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::FsDocumentStore;

#[cfg(test)]
mod tests;
