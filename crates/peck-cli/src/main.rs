//! `peck` — terminal UI for pairwise note ranking.
//!
//! # Usage
//!
//! ```
//! peck --vault ~/notes
//! peck --vault ~/notes --pool books --property rating
//! peck --config ~/.config/peck/config.toml --pool movies
//! ```

mod app;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use peck_core::{item::PoolConfig, session::Session};
use peck_store_fs::FsDocumentStore;
use peck_vault::VaultSource;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "peck", about = "Pairwise note ranking over a Markdown vault")]
struct Args {
  /// Path to a TOML config file (vault, data_dir, pools).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Vault root directory.
  #[arg(long, env = "PECK_VAULT")]
  vault: Option<PathBuf>,

  /// Directory for persisted ratings (default: <vault>/.peck).
  #[arg(long, env = "PECK_DATA_DIR")]
  data_dir: Option<PathBuf>,

  /// Pool (comparison type) to run.
  #[arg(long, env = "PECK_POOL")]
  pool: Option<String>,

  /// Folder below the vault to scan (overrides the pool's).
  #[arg(long)]
  folder: Option<String>,

  /// Frontmatter property that admits a note (overrides the pool's).
  #[arg(long)]
  property: Option<String>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  vault:    String,
  #[serde(default)]
  data_dir: String,
  /// Pool selected when `--pool` is not given.
  #[serde(default)]
  pool:     String,
  #[serde(default)]
  pools:    Vec<PoolEntry>,
}

/// One `[[pools]]` table: an independently configured comparison type.
#[derive(Deserialize)]
struct PoolEntry {
  name:     String,
  #[serde(default)]
  folder:   String,
  #[serde(default = "default_property")]
  property: String,
}

fn default_property() -> String { "rating".to_string() }

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Initialise tracing to stderr; stdout belongs to the TUI.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let vault = args
    .vault
    .or_else(|| (!file_cfg.vault.is_empty()).then(|| PathBuf::from(&file_cfg.vault)))
    .unwrap_or_else(|| PathBuf::from("."));

  let data_dir = args
    .data_dir
    .or_else(|| (!file_cfg.data_dir.is_empty()).then(|| PathBuf::from(&file_cfg.data_dir)))
    .unwrap_or_else(|| vault.join(".peck"));

  let pool_name = args
    .pool
    .or_else(|| (!file_cfg.pool.is_empty()).then(|| file_cfg.pool.clone()))
    .unwrap_or_else(|| peck_core::item::DEFAULT_POOL.to_string());

  let mut pool = file_cfg
    .pools
    .iter()
    .find(|p| p.name == pool_name)
    .map(|p| PoolConfig {
      name:     p.name.clone(),
      folder:   p.folder.clone(),
      property: p.property.clone(),
    })
    .unwrap_or_else(|| PoolConfig::new(pool_name));

  if let Some(folder) = args.folder {
    pool.folder = folder;
  }
  if let Some(property) = args.property {
    pool.property = property;
  }

  let session = Session::new(FsDocumentStore::new(data_dir), VaultSource::new(vault), pool);
  let mut app = App::new(session);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data.
  let load_result = app.load().await;

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
