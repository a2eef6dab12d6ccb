//! Error types for `peck-core`.

use thiserror::Error;

/// A backend error, boxed so the core stays independent of concrete
/// document-store and item-source implementations.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("item source error: {0}")]
  ItemSource(#[source] BackendError),

  #[error("document store error: {0}")]
  DocumentStore(#[source] BackendError),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
