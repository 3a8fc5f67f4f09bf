//! Staged reveal of a finished reply.
//!
//! A reveal runs as a Tokio task that appends one whitespace-separated word
//! per interval and reports every step over a channel. Each reveal carries an
//! id and a [`CancellationToken`]; the controller cancels the previous token
//! before starting a new reveal, and the superseded task still reports
//! [`RevealMessage::Finished`] with the full text so its message never stays
//! in the loading state.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(40);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealMode {
    /// Word-by-word reveal on a fixed interval.
    #[default]
    Staged,
    /// Whole reply written in one update.
    Instant,
}

impl RevealMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RevealMode::Staged => "staged",
            RevealMode::Instant => "instant",
        }
    }
}

impl TryFrom<&str> for RevealMode {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "staged" => Ok(RevealMode::Staged),
            "instant" => Ok(RevealMode::Instant),
            other => Err(format!(
                "invalid reveal mode: {other} (expected \"staged\" or \"instant\")"
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealMessage {
    /// Words revealed so far, joined by single spaces.
    Progress(String),
    /// The complete reply; sent on completion and on cancellation.
    Finished(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealUpdate {
    pub reveal_id: u64,
    pub conversation_id: String,
    pub message_id: String,
    pub message: RevealMessage,
}

pub struct RevealParams {
    pub reveal_id: u64,
    pub conversation_id: String,
    pub message_id: String,
    pub text: String,
    pub interval: Duration,
    pub cancel_token: CancellationToken,
}

#[derive(Clone)]
pub struct RevealService {
    tx: mpsc::UnboundedSender<RevealUpdate>,
}

impl RevealService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RevealUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_reveal(&self, params: RevealParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let RevealParams {
                reveal_id,
                conversation_id,
                message_id,
                text,
                interval,
                cancel_token,
            } = params;

            let send = |message: RevealMessage| {
                let _ = tx.send(RevealUpdate {
                    reveal_id,
                    conversation_id: conversation_id.clone(),
                    message_id: message_id.clone(),
                    message,
                });
            };

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; words start one interval in.
            ticker.tick().await;

            let mut revealed = String::with_capacity(text.len());
            for word in text.split_whitespace() {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        debug!(reveal_id, "reveal superseded");
                        send(RevealMessage::Finished(text.clone()));
                        return;
                    }
                    _ = ticker.tick() => {}
                }

                if !revealed.is_empty() {
                    revealed.push(' ');
                }
                revealed.push_str(word);
                send(RevealMessage::Progress(revealed.clone()));
            }

            debug!(reveal_id, "reveal complete");
            send(RevealMessage::Finished(text));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn params(reveal_id: u64, text: &str, interval: Duration) -> RevealParams {
        RevealParams {
            reveal_id,
            conversation_id: "c1".to_string(),
            message_id: "bot-1".to_string(),
            text: text.to_string(),
            interval,
            cancel_token: CancellationToken::new(),
        }
    }

    async fn collect_until_finished(
        rx: &mut mpsc::UnboundedReceiver<RevealUpdate>,
    ) -> Vec<RevealMessage> {
        let mut messages = Vec::new();
        loop {
            let update = timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("reveal stalled")
                .expect("channel closed");
            let finished = matches!(update.message, RevealMessage::Finished(_));
            messages.push(update.message);
            if finished {
                return messages;
            }
        }
    }

    #[test]
    fn reveal_mode_parses_case_insensitively() {
        assert_eq!(RevealMode::try_from("Instant"), Ok(RevealMode::Instant));
        assert_eq!(RevealMode::try_from(" staged "), Ok(RevealMode::Staged));
        assert!(RevealMode::try_from("fast").is_err());
    }

    #[tokio::test]
    async fn reveals_one_word_per_tick_then_finishes() {
        let (service, mut rx) = RevealService::new();
        service.spawn_reveal(params(1, "Hi there, player", Duration::from_millis(1)));

        let messages = collect_until_finished(&mut rx).await;
        assert_eq!(
            messages,
            vec![
                RevealMessage::Progress("Hi".to_string()),
                RevealMessage::Progress("Hi there,".to_string()),
                RevealMessage::Progress("Hi there, player".to_string()),
                RevealMessage::Finished("Hi there, player".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn final_content_is_original_text_regardless_of_spacing() {
        let text = "line one\n\nline   two\tend";
        let (service, mut rx) = RevealService::new();
        service.spawn_reveal(params(3, text, Duration::from_millis(1)));

        let messages = collect_until_finished(&mut rx).await;
        let progress = messages
            .iter()
            .filter(|m| matches!(m, RevealMessage::Progress(_)))
            .count();
        assert_eq!(progress, text.split_whitespace().count());
        assert_eq!(
            messages.last(),
            Some(&RevealMessage::Finished(text.to_string()))
        );
    }

    #[tokio::test]
    async fn cancelled_reveal_reports_full_text() {
        let (service, mut rx) = RevealService::new();
        let reveal = params(7, "one two three four", Duration::from_secs(60));
        let token = reveal.cancel_token.clone();
        service.spawn_reveal(reveal);

        token.cancel();
        let update = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("cancellation not observed")
            .expect("channel closed");
        assert_eq!(update.reveal_id, 7);
        assert_eq!(update.conversation_id, "c1");
        assert_eq!(update.message_id, "bot-1");
        assert_eq!(
            update.message,
            RevealMessage::Finished("one two three four".to_string())
        );
    }
}
