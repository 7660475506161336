//! Narration collaborator: fire-and-forget text-to-speech.
//!
//! The session never looks at a result. Implementations swallow their own
//! failures and at most leave a log line behind.

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

pub trait Narrator: Send + Sync {
  fn speak(&self, text: &str);
}

/// Forwards utterances to a connected client (the browser does the actual speech).
#[derive(Clone, Debug)]
pub struct ChannelNarrator {
  tx: UnboundedSender<String>,
}

impl ChannelNarrator {
  pub fn new(tx: UnboundedSender<String>) -> Self {
    Self { tx }
  }
}

impl Narrator for ChannelNarrator {
  fn speak(&self, text: &str) {
    debug!(target: "round", %text, "speak");
    if let Err(e) = self.tx.send(text.to_string()) {
      debug!(target: "flashtap", error = %e, "Narration dropped: client gone");
    }
  }
}

/// Keeps every utterance in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNarrator {
  spoken: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingNarrator {
  pub fn spoken(&self) -> Vec<String> {
    self.spoken.lock().map(|v| v.clone()).unwrap_or_default()
  }
}

#[cfg(test)]
impl Narrator for RecordingNarrator {
  fn speak(&self, text: &str) {
    if let Ok(mut v) = self.spoken.lock() {
      v.push(text.to_string());
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::sync::mpsc;

  #[test]
  fn channel_narrator_forwards_text() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let n = ChannelNarrator::new(tx);
    n.speak("hello");
    assert_eq!(rx.try_recv().ok().as_deref(), Some("hello"));
  }

  #[test]
  fn channel_narrator_ignores_closed_receiver() {
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    drop(rx);
    ChannelNarrator::new(tx).speak("nobody listens");
  }

  #[test]
  fn recording_narrator_keeps_order() {
    let n = RecordingNarrator::default();
    n.speak("a");
    n.speak("b");
    assert_eq!(n.spoken(), vec!["a".to_string(), "b".to_string()]);
  }
}
