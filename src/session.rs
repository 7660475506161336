//! Game session state machine: loading → playing → {success, failure}.
//!
//! A session owns the current round, score, streak, rejected option ids and
//! attempt counter. It is driven by three events (load round, submit guess,
//! set config) and never mutated by the presentation layer directly.
//!
//! Loading is split into `begin_load` / `complete_load` so a slower
//! generator can run elsewhere. Each load gets a sequence number and only the
//! latest one may install its round.

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::attempts::{is_exhausted, max_attempts, MaxAttempts};
use crate::domain::{GameConfig, GameMode, GameOption, Round};
use crate::generator::{GenerationError, RoundGenerator};
use crate::narration::Narrator;
use crate::util::is_numeric_label;

/// Points awarded for a correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
  Loading,
  Playing,
  Success,
  Failure,
}

/// Summary of a finished round.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundOutcome {
  pub won: bool,
  pub attempts_used: u32,
  pub wrong_answers: Vec<String>,
  pub elapsed_ms: u64,
  pub mode: GameMode,
  /// Answer count the round was requested with.
  pub answer_count: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
  pub status: Status,
  pub current_round: Option<Round>,
  pub score: u32,
  pub streak: u32,
  /// Options rejected in the current round, in click order.
  pub wrong_answers: Vec<String>,
  pub attempts_used: u32,
  pub last_outcome: Option<RoundOutcome>,
}

impl Default for SessionState {
  fn default() -> Self {
    Self {
      status: Status::Loading,
      current_round: None,
      score: 0,
      streak: 0,
      wrong_answers: Vec::new(),
      attempts_used: 0,
      last_outcome: None,
    }
  }
}

/// Read-only view handed to the presentation layer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
  #[serde(flatten)]
  pub state: SessionState,
  pub config: GameConfig,
  /// Budget for the current round; `null` when unbounded or no round is loaded.
  pub max_attempts: MaxAttempts,
}

/// Issued by `begin_load`; consumed by `complete_load`.
#[derive(Debug)]
pub struct LoadTicket {
  pub seq: u64,
  pub config: GameConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
  /// Not playing, unknown option, or an option already rejected.
  Ignored,
  Correct,
  Wrong { exhausted: bool },
}

pub struct Session {
  config: GameConfig,
  state: SessionState,
  generator: RoundGenerator,
  narrator: Arc<dyn Narrator>,
  rng: Box<dyn RngCore + Send>,
  load_seq: u64,
  round_started: Option<Instant>,
  round_answer_count: usize,
}

impl Session {
  pub fn new(
    generator: RoundGenerator,
    config: GameConfig,
    narrator: Arc<dyn Narrator>,
    rng: Box<dyn RngCore + Send>,
  ) -> Self {
    Self {
      config,
      state: SessionState::default(),
      generator,
      narrator,
      rng,
      load_seq: 0,
      round_started: None,
      round_answer_count: 0,
    }
  }

  /// Session backed by an OS-seeded rng.
  pub fn with_entropy(generator: RoundGenerator, config: GameConfig, narrator: Arc<dyn Narrator>) -> Self {
    Self::new(generator, config, narrator, Box::new(StdRng::from_entropy()))
  }

  pub fn state(&self) -> &SessionState {
    &self.state
  }

  pub fn snapshot(&self) -> SessionSnapshot {
    let max = match &self.state.current_round {
      Some(r) => max_attempts(self.config.attempts, r.options.len()),
      None => MaxAttempts::Unbounded,
    };
    SessionSnapshot {
      state: self.state.clone(),
      config: self.config.clone(),
      max_attempts: max,
    }
  }

  /// Replace the config. Takes effect on the next `load_round`.
  #[instrument(level = "debug", skip(self))]
  pub fn set_config(&mut self, config: GameConfig) {
    self.config = config;
  }

  /// Generate and install a fresh round with the current config.
  /// Abandons any round in progress.
  pub fn load_round(&mut self) -> Status {
    let ticket = self.begin_load();
    let result = self.generator.generate_for(&ticket.config, &mut self.rng);
    self.complete_load(ticket, result);
    self.state.status
  }

  /// Enter `Loading` and reset per-round bookkeeping.
  pub fn begin_load(&mut self) -> LoadTicket {
    self.load_seq += 1;
    self.state.status = Status::Loading;
    self.state.wrong_answers.clear();
    self.state.attempts_used = 0;
    self.round_started = None;
    debug!(target: "round", seq = self.load_seq, mode = %self.config.mode, answer_count = self.config.answer_count, "Loading round");
    LoadTicket { seq: self.load_seq, config: self.config.clone() }
  }

  /// Install the result of a load. Returns false if a newer load was issued
  /// meanwhile, or if this load already completed.
  #[instrument(level = "debug", skip(self, result), fields(seq = ticket.seq))]
  pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Round, GenerationError>) -> bool {
    if ticket.seq != self.load_seq {
      warn!(target: "round", stale = ticket.seq, latest = self.load_seq, "Discarding stale round");
      return false;
    }
    if self.state.status != Status::Loading {
      warn!(target: "round", seq = ticket.seq, status = ?self.state.status, "Discarding repeated completion");
      return false;
    }
    match result {
      Ok(round) => {
        info!(target: "round", mode = %round.mode, options = round.options.len(), "Round ready");
        self.state.current_round = Some(round);
        self.state.status = Status::Playing;
        self.round_started = Some(Instant::now());
        self.round_answer_count = ticket.config.answer_count;
      }
      Err(e) => {
        error!(target: "round", error = %e, mode = %ticket.config.mode, "Failed to load round");
        self.state.current_round = None;
        self.state.status = Status::Failure;
      }
    }
    true
  }

  /// Handle a click on `option_id`.
  #[instrument(level = "debug", skip(self))]
  pub fn submit_guess(&mut self, option_id: &str) -> GuessOutcome {
    if self.state.status != Status::Playing {
      return GuessOutcome::Ignored;
    }
    let Some(round) = self.state.current_round.as_ref() else {
      return GuessOutcome::Ignored;
    };
    if self.state.wrong_answers.iter().any(|w| w == option_id) {
      return GuessOutcome::Ignored;
    }
    let Some(clicked) = round.option(option_id) else {
      debug!(target: "round", %option_id, "Guess for unknown option ignored");
      return GuessOutcome::Ignored;
    };

    let correct = option_id == round.correct_option_id;
    let speech = if correct {
      round.success_message.clone()
    } else {
      correction_text(clicked, round.correct_option())
    };
    let max = max_attempts(self.config.attempts, round.options.len());

    self.state.attempts_used += 1;

    if correct {
      self.state.status = Status::Success;
      self.state.score = self.state.score.saturating_add(POINTS_PER_CORRECT);
      self.state.streak += 1;
      self.narrator.speak(&speech);
      self.finish_round(true);
      return GuessOutcome::Correct;
    }

    self.state.streak = 0;
    self.state.wrong_answers.push(option_id.to_string());
    self.narrator.speak(&speech);

    let exhausted = is_exhausted(self.state.attempts_used, max);
    if exhausted {
      self.state.status = Status::Failure;
      self.finish_round(false);
    }
    GuessOutcome::Wrong { exhausted }
  }

  fn finish_round(&mut self, won: bool) {
    let Some(round) = self.state.current_round.as_ref() else { return };
    let elapsed_ms = self
      .round_started
      .map(|t| u64::try_from(t.elapsed().as_millis()).unwrap_or(u64::MAX))
      .unwrap_or(0);
    let outcome = RoundOutcome {
      won,
      attempts_used: self.state.attempts_used,
      wrong_answers: self.state.wrong_answers.clone(),
      elapsed_ms,
      mode: round.mode,
      answer_count: self.round_answer_count,
    };
    info!(
      target: "round",
      won,
      attempts = outcome.attempts_used,
      score = self.state.score,
      streak = self.state.streak,
      elapsed_ms,
      "Round finished"
    );
    self.state.last_outcome = Some(outcome);
  }
}

/// Spoken correction after a wrong guess, e.g. "No, that's a Cow, not the Sheep".
pub fn correction_text(clicked: &GameOption, correct: Option<&GameOption>) -> String {
  let Some(correct) = correct else {
    return "No, try again.".into();
  };
  let clicked_label = clicked.spoken_label();
  let correct_label = correct.spoken_label();
  if is_numeric_label(clicked_label) {
    format!("No, that's {}, not {}", clicked_label, correct_label)
  } else {
    format!("No, that's a {}, not the {}", clicked_label, correct_label)
  }
}
