//! Domain models: game modes, asset categories, catalog assets, options, rounds and config.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which kind of question the player is asked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
  #[default]
  Matching,
  Colors,
  Shapes,
  Letters,
  Counting,
  /// Meta mode: picks one of the concrete modes per round.
  Mixed,
}

impl GameMode {
  /// Modes that produce rounds themselves (everything except `Mixed`).
  pub const CONCRETE: [GameMode; 5] = [
    GameMode::Matching,
    GameMode::Counting,
    GameMode::Letters,
    GameMode::Colors,
    GameMode::Shapes,
  ];

  /// Label shown on the board for rounds of this mode.
  pub fn category_label(self) -> &'static str {
    match self {
      GameMode::Matching => "Matching",
      GameMode::Colors => "Colors",
      GameMode::Shapes => "Shapes",
      GameMode::Letters => "Letters",
      GameMode::Counting => "Counting",
      GameMode::Mixed => "Mixed",
    }
  }
}

impl fmt::Display for GameMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.category_label())
  }
}

/// Catalog grouping of assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Animals,
  Shapes,
  Food,
  Vehicles,
}

impl Category {
  pub const ALL: [Category; 4] = [Category::Animals, Category::Shapes, Category::Food, Category::Vehicles];
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Category::Animals => "animals",
      Category::Shapes => "shapes",
      Category::Food => "food",
      Category::Vehicles => "vehicles",
    };
    f.write_str(s)
  }
}

/// Optional extra value attached to an asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetValue {
  Number(f64),
  Text(String),
}

/// One catalog item (an emoji or image path plus its spoken name).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
  pub id: String,
  pub content: String,  // emoji or image URL
  pub label: String,    // spoken name, e.g. "Sheep"
  pub category: Category,
  #[serde(default)] pub tags: Vec<String>,
  #[serde(default)] pub value: Option<AssetValue>,
}

/// A selectable answer inside a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOption {
  pub id: String,
  pub content: String,
  #[serde(default)] pub label: Option<String>,
  #[serde(default)] pub is_correct: bool,
}

impl GameOption {
  pub fn from_asset(asset: &Asset, correct_id: &str) -> Self {
    Self {
      id: asset.id.clone(),
      content: asset.content.clone(),
      label: Some(asset.label.clone()),
      is_correct: asset.id == correct_id,
    }
  }

  /// Spoken name of the option; falls back to the display content.
  pub fn spoken_label(&self) -> &str {
    self.label.as_deref().unwrap_or(&self.content)
  }
}

/// One question instance. Replaced wholesale on every load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
  pub question_text: String,
  pub question_display: String,
  pub success_message: String,
  pub options: Vec<GameOption>,
  pub correct_option_id: String,
  pub category: String,
  pub mode: GameMode,
}

impl Round {
  pub fn option(&self, id: &str) -> Option<&GameOption> {
    self.options.iter().find(|o| o.id == id)
  }

  pub fn correct_option(&self) -> Option<&GameOption> {
    self.option(&self.correct_option_id)
  }
}

/// User-chosen parameters. Changing them does not reload a round by itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
  #[serde(default)] pub mode: GameMode,
  #[serde(default = "default_answer_count")] pub answer_count: usize,
  /// `0` = sudden death, `>0` = N tries, `<0` = option count minus N, absent = unlimited.
  #[serde(default)] pub attempts: Option<i32>,
  /// Restricts the matching pool to one category.
  #[serde(default)] pub category_filter: Option<Category>,
}

pub fn default_answer_count() -> usize { 4 }

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      mode: GameMode::default(),
      answer_count: default_answer_count(),
      attempts: None,
      category_filter: None,
    }
  }
}
