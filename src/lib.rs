//! Kiosk Menu Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - sequencer: Combined item/category ordering for the kiosk menu editor
//! - repository: Data access abstractions and implementations
//! - commands: Handlers called by the editor UI

use anyhow::Context;
use rolling_logger::LogBuffer;
use tokio::sync::Mutex;

pub mod commands;
pub mod config;
pub mod domain;
pub mod identity;
pub mod repository;
pub mod sequencer;

use config::AppConfig;
use identity::{IdGenerator, UuidGenerator};
use repository::{init_db, DbState, MarkerRepository, MenuItemRepository};
use sequencer::Sequence;

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub store_id: String,
    pub items: MenuItemRepository,
    pub markers: MarkerRepository,
    pub ids: Box<dyn IdGenerator>,
    /// Working copy of the store's menu, including unfinished categories
    pub sequence: Mutex<Sequence>,
}

impl AppState {
    pub fn new(db_state: DbState, store_id: String, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            items: MenuItemRepository::new(db_state.shared()),
            markers: MarkerRepository::new(db_state.shared()),
            db_state,
            store_id,
            ids,
            sequence: Mutex::new(Sequence::new()),
        }
    }

    /// Open the configured database and load the store's menu
    pub async fn open(config: &AppConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let db_state = init_db(&config.database.path)
            .await
            .with_context(|| format!("Failed to open database {}", config.database.path.display()))?;

        let state = Self::new(db_state, config.store_id.clone(), Box::new(UuidGenerator));
        commands::load_menu(&state)
            .await
            .map_err(anyhow::Error::msg)
            .context("Failed to load kiosk menu")?;

        Ok(state)
    }
}

/// Install the rolling file logger described by the configuration.
///
/// Returns the buffer of recent log lines for the editor's diagnostics view.
pub fn init_logging(config: &AppConfig) -> anyhow::Result<LogBuffer> {
    let mut options = rolling_logger::LoggerOptions::new(&config.logging.dir, &config.logging.app_name);
    options.retain_files = config.logging.retain_files;

    let buffer = rolling_logger::init_logger_with(options)
        .map_err(anyhow::Error::msg)
        .context("Failed to initialize logging")?;

    log::info!("Logging to {}", config.logging.dir.display());
    Ok(buffer)
}
