use anyhow::{Context as AnyhowContext, Result};
use std::path::PathBuf;
use tracing::debug;

use sincer_core::{ConfigStore, DEFAULT_CONFIG_FILE, Manager, Outcome};

use crate::services::TableService;

/// Application context that gets passed to command handlers
///
/// Owns the record manager for this invocation together with the output
/// settings, so handlers only decide WHAT to do and call `emit` with the
/// result.
pub struct Context {
    manager: Manager,
    config_path: PathBuf,
    table: TableService,
    dry_run: bool,
}

impl Context {
    /// Build the context and load the config file
    ///
    /// A missing file starts an empty list. With `dry_run`, the manager is
    /// detached after loading so nothing is written back.
    pub fn new(config_path: Option<PathBuf>, color: bool, dry_run: bool) -> Result<Self> {
        let config_path = resolve_config_path(config_path);
        debug!(path = %config_path.display(), dry_run, "using config file");

        let mut manager = Manager::open(ConfigStore::new(&config_path))
            .with_context(|| format!("Failed to load config: {}", config_path.display()))?;
        if dry_run {
            manager.detach();
        }

        Ok(Self {
            manager,
            config_path,
            table: TableService::new(color),
            dry_run,
        })
    }

    /// Build a context without reading the config file first
    ///
    /// Used by `reset`, which must work even when the file is corrupt.
    pub fn without_loading(config_path: Option<PathBuf>, color: bool, dry_run: bool) -> Self {
        let config_path = resolve_config_path(config_path);
        let store = (!dry_run).then(|| ConfigStore::new(&config_path));

        Self {
            manager: Manager::new(store),
            config_path,
            table: TableService::new(color),
            dry_run,
        }
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut Manager {
        &mut self.manager
    }

    /// Print an operation's outcome to stdout
    pub fn emit(&self, outcome: &Outcome) {
        println!("{}", self.table.render(outcome));
        if self.dry_run {
            debug!(path = %self.config_path.display(), "dry run, config file left untouched");
        }
    }
}

/// Determine the config path using precedence: CLI arg/env > home directory > current directory
///
/// `SINCER_CONFIG` is folded into the CLI argument by clap.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_CONFIG_FILE)
    })
}
