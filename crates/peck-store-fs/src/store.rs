//! [`FsDocumentStore`] — the filesystem implementation of
//! [`DocumentStore`].

use std::{
  io::ErrorKind,
  path::{Component, Path, PathBuf},
};

use peck_core::store::DocumentStore;
use tokio::fs;

use crate::{Error, Result};

/// A document store rooted at a single data directory.
///
/// Document paths are relative, `/`-separated strings; each maps to a file
/// below the root. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
  root: PathBuf,
}

impl FsDocumentStore {
  /// Create a store rooted at `root`. The directory itself is created
  /// lazily on first write.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path { &self.root }

  /// Resolve a relative document path against the root, rejecting
  /// absolute paths and parent-directory escapes.
  fn resolve(&self, path: &str) -> Result<PathBuf> {
    let relative = Path::new(path);
    let escapes = relative.components().any(|c| {
      matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
    });
    if escapes || path.is_empty() {
      return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(self.root.join(relative))
  }
}

impl DocumentStore for FsDocumentStore {
  type Error = Error;

  async fn exists<'a>(&'a self, path: &'a str) -> Result<bool> {
    let full = self.resolve(path)?;
    Ok(fs::try_exists(&full).await?)
  }

  async fn read<'a>(&'a self, path: &'a str) -> Result<Option<String>> {
    let full = self.resolve(path)?;
    match fs::read_to_string(&full).await {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  async fn write<'a>(&'a self, path: &'a str, contents: &'a str) -> Result<()> {
    let full = self.resolve(path)?;
    if let Some(parent) = full.parent() {
      fs::create_dir_all(parent).await?;
    }
    fs::write(&full, contents).await?;
    Ok(())
  }

  async fn remove<'a>(&'a self, path: &'a str) -> Result<()> {
    let full = self.resolve(path)?;
    match fs::remove_file(&full).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }

  async fn create_dir_all<'a>(&'a self, path: &'a str) -> Result<()> {
    let full = self.resolve(path)?;
    fs::create_dir_all(&full).await?;
    Ok(())
  }
}
