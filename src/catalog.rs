//! Read-only asset catalog grouped by category.

use std::collections::{BTreeMap, HashSet};

use tracing::{info, warn};

use crate::domain::{Asset, Category};
use crate::seeds::seed_assets;

#[derive(Clone, Debug, Default)]
pub struct Catalog {
  all: Vec<Asset>,
  by_category: BTreeMap<Category, Vec<Asset>>,
}

impl Catalog {
  /// Build a catalog from assets in authoring order.
  /// Entries with an empty id, or an id already used in their category, are skipped.
  pub fn from_assets(assets: impl IntoIterator<Item = Asset>) -> Self {
    let mut seen: HashSet<(Category, String)> = HashSet::new();
    let mut all = Vec::new();
    let mut by_category: BTreeMap<Category, Vec<Asset>> = BTreeMap::new();

    for asset in assets {
      if asset.id.trim().is_empty() {
        warn!(target: "flashtap", label = %asset.label, category = %asset.category, "Skipping asset: empty id");
        continue;
      }
      if !seen.insert((asset.category, asset.id.clone())) {
        warn!(target: "flashtap", id = %asset.id, category = %asset.category, "Skipping asset: duplicate id in category");
        continue;
      }
      by_category.entry(asset.category).or_default().push(asset.clone());
      all.push(asset);
    }

    Self { all, by_category }
  }

  /// Built-in seeds followed by any extra assets (seeds win on id clashes).
  pub fn with_extra(extra: Vec<Asset>) -> Self {
    let catalog = Self::from_assets(seed_assets().into_iter().chain(extra));
    for cat in Category::ALL {
      info!(target: "flashtap", category = %cat, count = catalog.list_by_category(cat).len(), "Catalog inventory");
    }
    catalog
  }

  pub fn list_by_category(&self, category: Category) -> &[Asset] {
    self.by_category.get(&category).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn all_assets(&self) -> &[Asset] {
    &self.all
  }
}
