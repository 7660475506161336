//! HTTP endpoint handlers. These are thin, stateless helpers; gameplay goes over `/ws`.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, http::StatusCode, Json, response::{IntoResponse, Response}};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, instrument};

use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_catalog(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(CatalogOut { assets: state.catalog().all_assets().to_vec() })
}

/// Generate one round without touching any session (board previews, debugging).
#[instrument(level = "info", skip(state), fields(mode = ?q.mode, answer_count = ?q.answer_count))]
pub async fn http_get_round(
  State(state): State<Arc<AppState>>,
  Query(q): Query<RoundQuery>,
) -> Response {
  let mut cfg = state.defaults.clone();
  if let Some(mode) = q.mode { cfg.mode = mode; }
  if let Some(n) = q.answer_count { cfg.answer_count = n; }

  let mut rng = StdRng::from_entropy();
  let generated = match cfg.category_filter {
    None => state.generator.generate(cfg.mode, cfg.answer_count, &mut rng),
    Some(_) => state.generator.generate_for(&cfg, &mut rng),
  };
  match generated {
    Ok(round) => {
      info!(target: "round", mode = %round.mode, options = round.options.len(), "HTTP round preview served");
      Json(round).into_response()
    }
    Err(e) => {
      error!(target: "round", error = %e, "HTTP round preview failed");
      (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
    }
  }
}
