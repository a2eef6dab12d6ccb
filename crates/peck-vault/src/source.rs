//! [`VaultSource`] — lists comparable items from a Markdown vault.

use std::path::{Path, PathBuf};

use peck_core::{
  item::{Item, PoolConfig},
  store::ItemSource,
};
use tokio::fs;
use tracing::debug;

use crate::{
  Result,
  error::Error,
  parse::{extract_frontmatter, numeric_property},
};

/// An item source rooted at a vault directory.
///
/// Item ids are `/`-separated paths relative to the vault root, so they
/// stay stable across machines and across pool-folder reconfiguration.
#[derive(Debug, Clone)]
pub struct VaultSource {
  root: PathBuf,
}

impl VaultSource {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path { &self.root }

  /// Collect every `*.md` file below `dir`, skipping hidden entries.
  /// Iterative: Markdown vaults nest arbitrarily deep.
  async fn collect_markdown(&self, dir: PathBuf) -> Result<Vec<PathBuf>> {
    let mut pending = vec![dir];
    let mut files = Vec::new();

    while let Some(dir) = pending.pop() {
      let mut entries = fs::read_dir(&dir).await?;
      while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
          continue;
        }
        let path = entry.path();
        let file_type = entry.file_type().await?;
        if file_type.is_dir() {
          pending.push(path);
        } else if path.extension().is_some_and(|ext| ext == "md") {
          files.push(path);
        }
      }
    }

    // Deterministic order regardless of directory-walk order.
    files.sort();
    Ok(files)
  }

  /// Build an item from one note, or `None` when the note lacks a usable
  /// rating-source property.
  async fn read_item(&self, path: &Path, pool: &PoolConfig) -> Result<Option<Item>> {
    let content = fs::read_to_string(path).await?;

    let Some((fields, _body)) = extract_frontmatter(&content) else {
      debug!(path = %path.display(), "no frontmatter; skipping");
      return Ok(None);
    };
    let Some(seed) = numeric_property(&fields, &pool.property) else {
      debug!(
        path = %path.display(),
        property = %pool.property,
        "missing or non-numeric rating property; skipping"
      );
      return Ok(None);
    };

    let id = path
      .strip_prefix(&self.root)
      .unwrap_or(path)
      .to_string_lossy()
      .replace('\\', "/");
    let display_name = path
      .file_stem()
      .map(|stem| stem.to_string_lossy().into_owned())
      .unwrap_or_else(|| id.clone());

    Ok(Some(Item {
      id,
      display_name,
      rating: seed,
      games_played: 0,
      pool_id: pool.name.clone(),
      last_compared: None,
    }))
  }
}

impl ItemSource for VaultSource {
  type Error = Error;

  async fn load_items<'a>(&'a self, pool: &'a PoolConfig) -> Result<Vec<Item>> {
    let scan_root = if pool.folder.is_empty() {
      self.root.clone()
    } else {
      self.root.join(&pool.folder)
    };

    if !fs::try_exists(&scan_root).await? {
      return Err(Error::FolderNotFound(scan_root));
    }

    let mut items = Vec::new();
    for path in self.collect_markdown(scan_root).await? {
      if let Some(item) = self.read_item(&path, pool).await? {
        items.push(item);
      }
    }

    debug!(pool = %pool.name, count = items.len(), "loaded comparable items");
    Ok(items)
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use tempfile::TempDir;

  use super::*;

  fn write_note(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
  }

  fn pool(folder: &str, property: &str) -> PoolConfig {
    PoolConfig {
      name:     "books".to_string(),
      folder:   folder.to_string(),
      property: property.to_string(),
    }
  }

  #[tokio::test]
  async fn admits_only_notes_with_a_numeric_rating_property() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "dune.md", "---\nrating: 4\n---\nbody");
    write_note(dir.path(), "draft.md", "---\nrating: soon\n---\nbody");
    write_note(dir.path(), "plain.md", "no frontmatter here");
    write_note(dir.path(), "notes.txt", "---\nrating: 5\n---\nnot markdown");

    let source = VaultSource::new(dir.path());
    let items = source.load_items(&pool("", "rating")).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "dune.md");
    assert_eq!(items[0].display_name, "dune");
    assert_eq!(items[0].rating, 4.0);
    assert_eq!(items[0].pool_id, "books");
  }

  #[tokio::test]
  async fn ids_are_relative_to_the_vault_root_and_sorted() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "books/z.md", "---\nrating: 1\n---\n");
    write_note(dir.path(), "books/sub/a.md", "---\nrating: 2\n---\n");

    let source = VaultSource::new(dir.path());
    let items = source.load_items(&pool("books", "rating")).await.unwrap();

    let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["books/sub/a.md", "books/z.md"]);
  }

  #[tokio::test]
  async fn hidden_files_and_directories_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), ".trash/old.md", "---\nrating: 1\n---\n");
    write_note(dir.path(), ".hidden.md", "---\nrating: 1\n---\n");
    write_note(dir.path(), "seen.md", "---\nrating: 1\n---\n");

    let source = VaultSource::new(dir.path());
    let items = source.load_items(&pool("", "rating")).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "seen.md");
  }

  #[tokio::test]
  async fn a_custom_property_name_is_honoured() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "a.md", "---\nstars: 5\n---\n");
    write_note(dir.path(), "b.md", "---\nrating: 5\n---\n");

    let source = VaultSource::new(dir.path());
    let items = source.load_items(&pool("", "stars")).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "a.md");
  }

  #[tokio::test]
  async fn missing_folder_is_an_error() {
    let dir = TempDir::new().unwrap();
    let source = VaultSource::new(dir.path());

    let err = source.load_items(&pool("nope", "rating")).await.unwrap_err();
    assert!(matches!(err, Error::FolderNotFound(_)));
  }
}
