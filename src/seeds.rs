//! Built-in catalog content. Guarantees the game is playable without any config file.

use crate::domain::{Asset, Category};

struct SeedDef {
  id: &'static str,
  content: &'static str,
  label: &'static str,
  category: Category,
  tags: &'static [&'static str],
}

macro_rules! seed {
  ($id:expr, $content:expr, $label:expr, $cat:expr) => {
    SeedDef { id: $id, content: $content, label: $label, category: $cat, tags: &[] }
  };
  ($id:expr, $content:expr, $label:expr, $cat:expr, $tags:expr) => {
    SeedDef { id: $id, content: $content, label: $label, category: $cat, tags: $tags }
  };
}

use crate::domain::Category::{Animals, Food, Shapes, Vehicles};

const SEED_ASSETS: &[SeedDef] = &[
  seed!("sheep", "🐑", "Sheep", Animals),
  seed!("cow", "🐄", "Cow", Animals),
  seed!("pig", "🐖", "Pig", Animals),
  seed!("horse", "🐎", "Horse", Animals),
  seed!("chicken", "🐓", "Chicken", Animals),
  seed!("dog", "🐕", "Dog", Animals),
  seed!("cat", "🐈", "Cat", Animals),
  seed!("duck", "🦆", "Duck", Animals),
  seed!("lion", "🦁", "Lion", Animals),
  seed!("tiger", "🐅", "Tiger", Animals),
  seed!("elephant", "🐘", "Elephant", Animals),
  seed!("monkey", "🐒", "Monkey", Animals),

  seed!("red_circle", "🔴", "Red Circle", Shapes, &["red", "circle"]),
  seed!("blue_circle", "🔵", "Blue Circle", Shapes, &["blue", "circle"]),
  seed!("green_circle", "🟢", "Green Circle", Shapes, &["green", "circle"]),
  seed!("yellow_circle", "🟡", "Yellow Circle", Shapes, &["yellow", "circle"]),
  seed!("red_square", "🟥", "Red Square", Shapes, &["red", "square"]),
  seed!("blue_square", "🟦", "Blue Square", Shapes, &["blue", "square"]),
  seed!("green_square", "🟩", "Green Square", Shapes, &["green", "square"]),
  seed!("orange_square", "🟧", "Orange Square", Shapes, &["orange", "square"]),
  seed!("white_square", "⬜", "White Square", Shapes, &["white", "square"]),
  seed!("black_square", "⬛", "Black Square", Shapes, &["black", "square"]),
  seed!("diamond", "🔶", "Orange Diamond", Shapes, &["orange", "diamond"]),

  seed!("apple", "🍎", "Apple", Food),
  seed!("banana", "🍌", "Banana", Food),
  seed!("grapes", "🍇", "Grapes", Food),
  seed!("watermelon", "🍉", "Watermelon", Food),
  seed!("carrot", "🥕", "Carrot", Food),
  seed!("corn", "🌽", "Corn", Food),
  seed!("pepper", "🌶️", "Pepper", Food),
  seed!("cheese", "🧀", "Cheese", Food),

  seed!("car", "🚗", "Car", Vehicles),
  seed!("taxi", "🚕", "Taxi", Vehicles),
  seed!("bus", "🚌", "Bus", Vehicles),
  seed!("police", "🚓", "Police Car", Vehicles),
  seed!("ambulance", "🚑", "Ambulance", Vehicles),
  seed!("fire", "🚒", "Fire Engine", Vehicles),
  seed!("bicycle", "🚲", "Bicycle", Vehicles),
  seed!("airplane", "✈️", "Airplane", Vehicles),
  seed!("rocket", "🚀", "Rocket", Vehicles),
];

/// Built-in assets in authoring order (animals, shapes, food, vehicles).
pub fn seed_assets() -> Vec<Asset> {
  SEED_ASSETS
    .iter()
    .map(|d| Asset {
      id: d.id.to_string(),
      content: d.content.to_string(),
      label: d.label.to_string(),
      category: d.category,
      tags: d.tags.iter().map(|t| t.to_string()).collect(),
      value: None,
    })
    .collect()
}
