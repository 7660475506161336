//! Round generation: turns (mode, answer count) into a ready-to-play round.
//!
//! Every strategy picks a pool from the catalog, a correct item, up to
//! `answer_count - 1` distractors, then shuffles. Randomness is injected so
//! tests can replay rounds from a fixed seed.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::catalog::Catalog;
use crate::domain::{Asset, Category, GameConfig, GameMode, GameOption, Round};

/// Pools the plain matching mode draws from.
const MATCHING_CATEGORIES: [Category; 3] = [Category::Animals, Category::Food, Category::Vehicles];

/// Tags recognised as a colour in colors mode.
pub const COLOR_WORDS: [&str; 8] = ["red", "blue", "green", "yellow", "orange", "purple", "black", "white"];

/// Counting options are drawn from 1..=MAX_COUNT_OPTION.
const MAX_COUNT_OPTION: u32 = 10;
/// How many items a counting question shows at most.
const MAX_COUNT_SHOWN: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
  #[error("no assets available for a {mode} round (pool: {pool})")]
  EmptyPool { mode: GameMode, pool: String },
}

#[derive(Clone)]
pub struct RoundGenerator {
  catalog: Arc<Catalog>,
}

impl RoundGenerator {
  pub fn new(catalog: Arc<Catalog>) -> Self {
    Self { catalog }
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  /// Build a round for `mode` with (up to) `answer_count` options.
  pub fn generate<R: Rng + ?Sized>(&self, mode: GameMode, answer_count: usize, rng: &mut R) -> Result<Round, GenerationError> {
    self.generate_with(mode, answer_count, None, rng)
  }

  /// Same as `generate`, additionally honouring the config's category filter.
  pub fn generate_for<R: Rng + ?Sized>(&self, cfg: &GameConfig, rng: &mut R) -> Result<Round, GenerationError> {
    self.generate_with(cfg.mode, cfg.answer_count, cfg.category_filter, rng)
  }

  #[instrument(level = "debug", skip(self, rng))]
  fn generate_with<R: Rng + ?Sized>(
    &self,
    mode: GameMode,
    answer_count: usize,
    filter: Option<Category>,
    rng: &mut R,
  ) -> Result<Round, GenerationError> {
    let distractors = answer_count.saturating_sub(1);
    let round = match mode {
      GameMode::Matching => self.matching(distractors, filter, rng),
      GameMode::Shapes => self.find_the(GameMode::Shapes, Category::Shapes, distractors, rng),
      GameMode::Colors => self.colors(distractors, filter, rng),
      GameMode::Letters => self.letters(distractors, filter, rng),
      GameMode::Counting => self.counting(distractors, rng),
      GameMode::Mixed => {
        let picked = GameMode::CONCRETE[rng.gen_range(0..GameMode::CONCRETE.len())];
        debug!(target: "round", %picked, "Mixed mode delegating");
        return self.generate_with(picked, answer_count, filter, rng);
      }
    }?;
    debug!(target: "round", mode = %round.mode, options = round.options.len(), correct = %round.correct_option_id, "Round generated");
    Ok(round)
  }

  fn matching<R: Rng + ?Sized>(&self, distractors: usize, filter: Option<Category>, rng: &mut R) -> Result<Round, GenerationError> {
    let category = match filter {
      Some(c) => c,
      None => MATCHING_CATEGORIES[rng.gen_range(0..MATCHING_CATEGORIES.len())],
    };
    self.find_the(GameMode::Matching, category, distractors, rng)
  }

  /// "Find the X" round over a single category.
  fn find_the<R: Rng + ?Sized>(&self, mode: GameMode, category: Category, distractors: usize, rng: &mut R) -> Result<Round, GenerationError> {
    let pool: Vec<&Asset> = self.catalog.list_by_category(category).iter().collect();
    let correct = *pool.choose(rng).ok_or_else(|| GenerationError::EmptyPool { mode, pool: category.to_string() })?;
    let others = pick_distractors(correct, &pool, distractors, rng);

    Ok(Round {
      question_text: format!("Find the {}", correct.label),
      question_display: correct.content.clone(),
      success_message: format!("That's correct! You found the {}.", correct.label),
      options: asset_options(correct, others, rng),
      correct_option_id: correct.id.clone(),
      category: mode.category_label().to_string(),
      mode,
    })
  }

  fn colors<R: Rng + ?Sized>(&self, distractors: usize, filter: Option<Category>, rng: &mut R) -> Result<Round, GenerationError> {
    let pool: Vec<&Asset> = self.catalog.list_by_category(Category::Shapes).iter().collect();
    let Some(&correct) = pool.choose(rng) else {
      debug!(target: "round", "No shapes for colors mode; falling back to matching");
      return self.matching(distractors, filter, rng);
    };
    let Some(color) = color_of(correct) else {
      debug!(target: "round", id = %correct.id, "Shape has no colour tag; falling back to matching");
      return self.matching(distractors, filter, rng);
    };

    // Distractors may share the target colour.
    let others = pick_distractors(correct, &pool, distractors, rng);

    Ok(Round {
      question_text: format!("Which one is {}?", color),
      question_display: color.to_uppercase(),
      success_message: format!("That's correct! It is {}.", color),
      options: asset_options(correct, others, rng),
      correct_option_id: correct.id.clone(),
      category: GameMode::Colors.category_label().to_string(),
      mode: GameMode::Colors,
    })
  }

  fn letters<R: Rng + ?Sized>(&self, distractors: usize, filter: Option<Category>, rng: &mut R) -> Result<Round, GenerationError> {
    let pool = self.animals_and_food();
    let Some(&correct) = pool.choose(rng) else {
      return Err(GenerationError::EmptyPool { mode: GameMode::Letters, pool: "animals+food".into() });
    };
    let Some(letter) = first_letter(&correct.label) else {
      debug!(target: "round", id = %correct.id, "Label has no first letter; falling back to matching");
      return self.matching(distractors, filter, rng);
    };

    let valid: Vec<&Asset> = pool
      .iter()
      .copied()
      .filter(|a| first_letter(&a.label).is_some_and(|l| l != letter))
      .collect();
    let others: Vec<&Asset> = valid.choose_multiple(rng, distractors).copied().collect();

    Ok(Round {
      question_text: format!("What starts with the letter {}?", letter),
      question_display: letter.clone(),
      success_message: format!("That's correct! {} starts with {}.", correct.label, letter),
      options: asset_options(correct, others, rng),
      correct_option_id: correct.id.clone(),
      category: GameMode::Letters.category_label().to_string(),
      mode: GameMode::Letters,
    })
  }

  fn counting<R: Rng + ?Sized>(&self, distractors: usize, rng: &mut R) -> Result<Round, GenerationError> {
    let pool = self.animals_and_food();
    let Some(&item) = pool.choose(rng) else {
      return Err(GenerationError::EmptyPool { mode: GameMode::Counting, pool: "animals+food".into() });
    };
    let count = rng.gen_range(1..=MAX_COUNT_SHOWN);
    let display = vec![item.content.as_str(); count as usize].join(" ");

    // Only MAX_COUNT_OPTION - 1 distinct wrong numbers exist.
    let wanted = distractors.min(MAX_COUNT_OPTION as usize - 1);
    let mut wrong: Vec<u32> = Vec::with_capacity(wanted);
    while wrong.len() < wanted {
      let n = rng.gen_range(1..=MAX_COUNT_OPTION);
      if n != count && !wrong.contains(&n) {
        wrong.push(n);
      }
    }

    let correct = number_option(count, true);
    let mut options: Vec<GameOption> = std::iter::once(correct.clone())
      .chain(wrong.into_iter().map(|n| number_option(n, false)))
      .collect();
    options.shuffle(rng);

    Ok(Round {
      question_text: format!("How many {}s are there?", item.label),
      question_display: display,
      success_message: format!("That's correct! There are {} {}s.", count, item.label),
      options,
      correct_option_id: correct.id,
      category: GameMode::Counting.category_label().to_string(),
      mode: GameMode::Counting,
    })
  }

  fn animals_and_food(&self) -> Vec<&Asset> {
    self.catalog
      .list_by_category(Category::Animals)
      .iter()
      .chain(self.catalog.list_by_category(Category::Food))
      .collect()
  }
}

fn pick_distractors<'a, R: Rng + ?Sized>(correct: &Asset, pool: &[&'a Asset], count: usize, rng: &mut R) -> Vec<&'a Asset> {
  let potential: Vec<&Asset> = pool.iter().copied().filter(|a| a.id != correct.id).collect();
  potential.choose_multiple(rng, count).copied().collect()
}

fn asset_options<'a, R: Rng + ?Sized>(correct: &'a Asset, others: Vec<&'a Asset>, rng: &mut R) -> Vec<GameOption> {
  let mut options: Vec<GameOption> = std::iter::once(correct)
    .chain(others)
    .map(|a| GameOption::from_asset(a, &correct.id))
    .collect();
  options.shuffle(rng);
  options
}

fn number_option(n: u32, is_correct: bool) -> GameOption {
  GameOption {
    id: format!("num_{}", n),
    content: n.to_string(),
    label: Some(n.to_string()),
    is_correct,
  }
}

/// First tag naming a known colour, lower-cased.
fn color_of(asset: &Asset) -> Option<String> {
  asset
    .tags
    .iter()
    .find(|t| COLOR_WORDS.iter().any(|c| c.eq_ignore_ascii_case(t)))
    .map(|t| t.to_lowercase())
}

/// Upper-cased first character of a label.
fn first_letter(label: &str) -> Option<String> {
  label.chars().next().map(|c| c.to_uppercase().collect())
}
