//! Application state shared by every connection: the catalog, a round
//! generator over it, and the config new sessions start with.
//!
//! Everything here is immutable after startup. Per-player game state lives
//! in a `Session` owned by the WebSocket task, never in `AppState`.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::catalog::Catalog;
use crate::config::{load_app_config_from_env, AppConfig};
use crate::domain::GameConfig;
use crate::generator::RoundGenerator;
use crate::narration::Narrator;
use crate::session::Session;

#[derive(Clone)]
pub struct AppState {
    pub generator: RoundGenerator,
    pub defaults: GameConfig,
}

impl AppState {
    /// Build state from env: load TOML config (if any), seed the catalog.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_app_config_from_env().unwrap_or_default();
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: AppConfig) -> Self {
        let catalog = Arc::new(Catalog::with_extra(cfg.assets));
        info!(
            target: "flashtap",
            assets = catalog.all_assets().len(),
            mode = %cfg.game.mode,
            answer_count = cfg.game.answer_count,
            attempts = ?cfg.game.attempts,
            "Game defaults"
        );
        Self {
            generator: RoundGenerator::new(catalog),
            defaults: cfg.game,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.generator.catalog()
    }

    /// Fresh session for one player, starting from the configured defaults.
    pub fn new_session(&self, narrator: Arc<dyn Narrator>) -> Session {
        Session::with_entropy(self.generator.clone(), self.defaults.clone(), narrator)
    }
}
