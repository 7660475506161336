//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Asset, GameConfig, GameMode};
use crate::session::SessionSnapshot;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    LoadRound,
    SubmitGuess {
        #[serde(rename = "optionId")]
        option_id: String,
    },
    SetConfig {
        config: GameConfig,
    },
    GetState,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    State {
        state: SessionSnapshot,
    },
    /// Text the client should read aloud.
    Speak {
        text: String,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct RoundQuery {
    pub mode: Option<GameMode>,
    #[serde(rename = "answerCount")]
    pub answer_count: Option<usize>,
}

#[derive(Serialize)]
pub struct CatalogOut {
    pub assets: Vec<Asset>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn client_messages_parse() {
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"submit_guess","optionId":"cow"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::SubmitGuess { ref option_id } if option_id == "cow"));

        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"load_round"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::LoadRound));

        let m: ClientWsMessage = serde_json::from_str(
            r#"{"type":"set_config","config":{"mode":"counting","answerCount":8,"attempts":-2,"categoryFilter":"food"}}"#,
        )
        .unwrap();
        match m {
            ClientWsMessage::SetConfig { config } => {
                assert_eq!(config.mode, GameMode::Counting);
                assert_eq!(config.answer_count, 8);
                assert_eq!(config.attempts, Some(-2));
                assert_eq!(config.category_filter, Some(Category::Food));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn config_without_attempts_is_unbounded() {
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"set_config","config":{"mode":"mixed"}}"#).unwrap();
        match m {
            ClientWsMessage::SetConfig { config } => {
                assert_eq!(config.attempts, None);
                assert_eq!(config.answer_count, 4);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(serde_json::from_str::<ClientWsMessage>(r#"{"type":"cheat"}"#).is_err());
    }

    #[test]
    fn server_messages_are_tagged() {
        let v = serde_json::to_value(ServerWsMessage::Speak { text: "hi".into() }).unwrap();
        assert_eq!(v, serde_json::json!({"type": "speak", "text": "hi"}));
        let v = serde_json::to_value(ServerWsMessage::Pong).unwrap();
        assert_eq!(v, serde_json::json!({"type": "pong"}));
    }
}
