//! WebSocket upgrade + message loop. Each connection owns one game session.
//! Each client message is parsed as JSON and applied to the session; the reply
//! is any narration it produced followed by a fresh state snapshot.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tokio::sync::mpsc;
use tracing::{info, error, instrument, debug};
use uuid::Uuid;

use crate::narration::ChannelNarrator;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::session::Session;
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "flashtap", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state), fields(session_id = %Uuid::new_v4()))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "flashtap", "WebSocket connected");
  let (speak_tx, mut speak_rx) = mpsc::unbounded_channel::<String>();
  let mut session = state.new_session(Arc::new(ChannelNarrator::new(speak_tx)));

  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "flashtap", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &mut session)
          }
          Err(e) => {
            debug!(target: "flashtap", raw = %trunc_for_log(&txt, 200), "WS invalid JSON");
            ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }
          }
        };

        let mut outgoing: Vec<ServerWsMessage> = Vec::new();
        while let Ok(text) = speak_rx.try_recv() {
          outgoing.push(ServerWsMessage::Speak { text });
        }
        outgoing.push(reply_msg);

        for m in outgoing {
          if let Err(e) = send_json(&mut socket, &m).await {
            error!(target: "flashtap", error = %e, "WS send error");
            info!(target: "flashtap", "WebSocket disconnected");
            return;
          }
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "flashtap", score = session.state().score, "WebSocket disconnected");
}

async fn send_json(socket: &mut WebSocket, msg: &ServerWsMessage) -> Result<(), axum::Error> {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });
  socket.send(Message::Text(out)).await
}

/// Apply one client event to the session and build the reply.
fn handle_client_ws(msg: ClientWsMessage, session: &mut Session) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::LoadRound => {
      let status = session.load_round();
      tracing::info!(target: "round", ?status, "WS load_round");
      ServerWsMessage::State { state: session.snapshot() }
    }

    ClientWsMessage::SubmitGuess { option_id } => {
      let outcome = session.submit_guess(&option_id);
      tracing::info!(target: "round", %option_id, ?outcome, "WS submit_guess");
      ServerWsMessage::State { state: session.snapshot() }
    }

    ClientWsMessage::SetConfig { config } => {
      session.set_config(config);
      ServerWsMessage::State { state: session.snapshot() }
    }

    ClientWsMessage::GetState => ServerWsMessage::State { state: session.snapshot() },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;
  use crate::domain::{GameConfig, GameMode};
  use crate::session::Status;

  fn session_with_channel() -> (Session, mpsc::UnboundedReceiver<String>) {
    let state = AppState::from_config(AppConfig::default());
    let (tx, rx) = mpsc::unbounded_channel();
    (state.new_session(Arc::new(ChannelNarrator::new(tx))), rx)
  }

  #[test]
  fn load_then_guess_over_messages() {
    let (mut session, mut rx) = session_with_channel();

    let reply = handle_client_ws(ClientWsMessage::LoadRound, &mut session);
    let ServerWsMessage::State { state } = reply else { panic!("expected state") };
    assert_eq!(state.state.status, Status::Playing);
    let correct = state.state.current_round.expect("round").correct_option_id;

    handle_client_ws(ClientWsMessage::SubmitGuess { option_id: correct }, &mut session);
    assert_eq!(session.state().status, Status::Success);
    assert!(rx.try_recv().expect("spoken").starts_with("That's correct!"));
  }

  #[test]
  fn set_config_only_changes_config() {
    let (mut session, _rx) = session_with_channel();
    let cfg = GameConfig { mode: GameMode::Letters, answer_count: 6, attempts: Some(0), category_filter: None };
    let reply = handle_client_ws(ClientWsMessage::SetConfig { config: cfg.clone() }, &mut session);
    let ServerWsMessage::State { state } = reply else { panic!("expected state") };
    assert_eq!(state.config, cfg);
    assert_eq!(state.state.status, Status::Loading);
    assert!(state.state.current_round.is_none());
  }

  #[test]
  fn ping_gets_pong() {
    let (mut session, _rx) = session_with_channel();
    assert!(matches!(handle_client_ws(ClientWsMessage::Ping, &mut session), ServerWsMessage::Pong));
  }
}
