//! Loading app configuration (default game settings + optional extra catalog assets) from TOML.
//!
//! Example:
//! ```toml
//! [game]
//! mode = "mixed"
//! answerCount = 6
//! attempts = -2
//!
//! [[assets]]
//! id = "owl"
//! content = "🦉"
//! label = "Owl"
//! category = "animals"
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Asset, GameConfig};

pub const CONFIG_PATH_ENV: &str = "FLASHTAP_CONFIG_PATH";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  /// Config new sessions start with.
  #[serde(default)]
  pub game: GameConfig,
  /// Extra assets merged into the built-in catalog.
  #[serde(default)]
  pub assets: Vec<Asset>,
}

pub fn parse_app_config(s: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(s)
}

/// Attempt to load `AppConfig` from FLASHTAP_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var(CONFIG_PATH_ENV).ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_app_config(&s) {
      Ok(cfg) => {
        info!(target: "flashtap", %path, extra_assets = cfg.assets.len(), "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "flashtap", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "flashtap", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{AssetValue, Category, GameMode};

  #[test]
  fn empty_file_uses_defaults() {
    let cfg = parse_app_config("").expect("empty toml parses");
    assert_eq!(cfg.game, GameConfig::default());
    assert!(cfg.assets.is_empty());
  }

  #[test]
  fn game_section_and_assets_are_read() {
    let cfg = parse_app_config(
      r#"
        [game]
        mode = "letters"
        answerCount = 8
        attempts = -3
        categoryFilter = "vehicles"

        [[assets]]
        id = "owl"
        content = "🦉"
        label = "Owl"
        category = "animals"
        tags = ["bird"]
        value = 2
      "#,
    )
    .expect("valid config");

    assert_eq!(cfg.game.mode, GameMode::Letters);
    assert_eq!(cfg.game.answer_count, 8);
    assert_eq!(cfg.game.attempts, Some(-3));
    assert_eq!(cfg.game.category_filter, Some(Category::Vehicles));
    assert_eq!(cfg.assets.len(), 1);
    assert_eq!(cfg.assets[0].category, Category::Animals);
    assert_eq!(cfg.assets[0].tags, vec!["bird".to_string()]);
    assert_eq!(cfg.assets[0].value, Some(AssetValue::Number(2.0)));
  }

  #[test]
  fn partial_game_section_keeps_other_defaults() {
    let cfg = parse_app_config("[game]\nattempts = 0\n").expect("valid config");
    assert_eq!(cfg.game.mode, GameMode::Matching);
    assert_eq!(cfg.game.answer_count, 4);
    assert_eq!(cfg.game.attempts, Some(0));
  }

  #[test]
  fn missing_mode_defaults_to_matching() {
    assert_eq!(GameMode::default(), GameMode::Matching);
    let cfg = parse_app_config("[game]\nanswerCount = 6\n").expect("valid config");
    assert_eq!(cfg.game.mode, GameMode::Matching);
    assert_eq!(cfg.game.answer_count, 6);
  }

  #[test]
  fn unknown_mode_is_rejected() {
    assert!(parse_app_config("[game]\nmode = \"trivia\"\n").is_err());
  }
}
