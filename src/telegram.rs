//! Telegram Bot API transport.
//!
//! Long-polls `getUpdates`, hands recognized commands to the [`NewsBot`] one
//! at a time and delivers replies with `sendMessage`.
//!
//! # Retry Strategy
//!
//! Polling failures never stop the bot. After each consecutive failure the
//! loop waits
//!
//! ```text
//! delay = min(1s * 2^(failures-1), 30s) + random_jitter(0..250ms)
//! ```
//!
//! and resets once a poll succeeds.

use crate::bot::{Command, NewsBot, Reply};
use crate::scrapers::page::PageFetch;
use crate::utils::{split_message, truncate_for_log};
use rand::{Rng, rng};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::error::Error;
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Telegram rejects messages longer than this many characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

const BACKOFF_BASE: Duration = Duration::from_secs(1);
const BACKOFF_MAX: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Chat id and command, if this update is a message starting with one.
    pub fn command(&self) -> Option<(i64, Command)> {
        let message = self.message.as_ref()?;
        let command = Command::parse(message.text.as_deref()?)?;
        Some((message.chat.id, command))
    }
}

/// Minimal Bot API client.
pub struct TelegramClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // endpoint embeds the bot token
        f.debug_struct("TelegramClient")
            .field("host", &self.endpoint.host_str())
            .finish()
    }
}

impl TelegramClient {
    /// Build a client for `token` against `api_base`.
    ///
    /// The HTTP timeout leaves headroom over `poll_timeout` so long polls end
    /// on the server side first.
    pub fn new(api_base: &str, token: &str, poll_timeout: Duration) -> Result<Self, Box<dyn Error>> {
        let endpoint = bot_endpoint(api_base, token)?;
        let client = reqwest::Client::builder()
            .timeout(poll_timeout + Duration::from_secs(10))
            .build()?;
        Ok(Self { client, endpoint })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, payload: &Value) -> Result<T, Box<dyn Error>> {
        let url = self.endpoint.join(method)?;
        // reqwest errors carry the URL, which contains the token
        let response: ApiResponse<T> = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| e.without_url())?
            .json()
            .await
            .map_err(|e| e.without_url())?;

        match response {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(format!(
                "{method} failed: {}",
                description.unwrap_or_else(|| "no description".to_string())
            )
            .into()),
        }
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        poll_timeout: Duration,
    ) -> Result<Vec<Update>, Box<dyn Error>> {
        let mut payload = json!({ "timeout": poll_timeout.as_secs() });
        if let Some(offset) = offset {
            payload["offset"] = json!(offset);
        }
        self.call("getUpdates", &payload).await
    }

    /// Send `text` to `chat_id`, split into several messages if too long.
    #[instrument(level = "debug", skip(self, text))]
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), Box<dyn Error>> {
        for chunk in split_message(text, MAX_MESSAGE_CHARS) {
            debug!(preview = %truncate_for_log(&chunk, 80), "Sending message");
            let payload = json!({ "chat_id": chat_id, "text": chunk });
            let _: Value = self.call("sendMessage", &payload).await?;
        }
        Ok(())
    }
}

fn bot_endpoint(api_base: &str, token: &str) -> Result<Url, Box<dyn Error>> {
    let endpoint = Url::parse(&format!("{}/bot{}/", api_base.trim_end_matches('/'), token))?;
    Ok(endpoint)
}

/// Replies to one chat.
#[derive(Debug)]
pub struct ChatReply<'a> {
    client: &'a TelegramClient,
    chat_id: i64,
}

impl Reply for ChatReply<'_> {
    async fn reply(&self, text: &str) -> Result<(), Box<dyn Error>> {
        self.client.send_message(self.chat_id, text).await
    }
}

/// Delay before the next poll after `failures` consecutive failures.
pub fn backoff_delay(failures: u32) -> Duration {
    let exp = failures.saturating_sub(1).min(16);
    let delay = BACKOFF_BASE.saturating_mul(1 << exp).min(BACKOFF_MAX);
    let jitter_ms: u64 = rng().random_range(0..=250);
    delay + Duration::from_millis(jitter_ms)
}

/// Poll forever, handling each command before fetching the next batch.
pub async fn run_polling<F: PageFetch>(
    client: &TelegramClient,
    bot: &mut NewsBot<F>,
    poll_timeout: Duration,
) {
    let mut offset: Option<i64> = None;
    let mut failures = 0u32;
    info!("Bot ready; polling for updates");

    loop {
        match client.get_updates(offset, poll_timeout).await {
            Ok(updates) => {
                failures = 0;
                for update in updates {
                    offset = Some(update.update_id + 1);
                    let Some((chat_id, command)) = update.command() else {
                        continue;
                    };
                    info!(chat_id, ?command, "Received command");
                    let reply = ChatReply { client, chat_id };
                    bot.handle(command, &reply).await;
                }
            }
            Err(e) => {
                failures += 1;
                let delay = backoff_delay(failures);
                if failures == 1 {
                    warn!(error = %e, ?delay, "getUpdates failed; backing off");
                } else {
                    error!(failures, error = %e, ?delay, "getUpdates still failing; backing off");
                }
                sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_endpoint() {
        let url = bot_endpoint("https://api.telegram.org/", "123:ABC").unwrap();
        assert_eq!(url.as_str(), "https://api.telegram.org/bot123:ABC/");
        assert_eq!(
            url.join("getUpdates").unwrap().as_str(),
            "https://api.telegram.org/bot123:ABC/getUpdates"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client =
            TelegramClient::new("https://api.telegram.org", "123:SECRET", Duration::from_secs(30))
                .unwrap();
        let shown = format!("{client:?}");
        assert!(!shown.contains("SECRET"));
        assert!(shown.contains("api.telegram.org"));
    }

    #[test]
    fn test_parse_updates() {
        let body = r#"{
            "ok": true,
            "result": [
                {"update_id": 10, "message": {"message_id": 1, "chat": {"id": 42, "type": "private"}, "text": "/news"}},
                {"update_id": 11, "message": {"message_id": 2, "chat": {"id": 42, "type": "private"}, "text": "xin chào"}},
                {"update_id": 12, "message": {"message_id": 3, "chat": {"id": 7, "type": "group"}, "text": "/keywords@HealthBot"}},
                {"update_id": 13, "message": {"message_id": 4, "chat": {"id": 7, "type": "group"}}},
                {"update_id": 14, "edited_message": {"message_id": 5, "chat": {"id": 7, "type": "group"}, "text": "/news"}}
            ]
        }"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(body).unwrap();
        assert!(response.ok);
        let updates = response.result.unwrap();
        let commands: Vec<_> = updates.iter().filter_map(Update::command).collect();
        assert_eq!(commands, vec![(42, Command::News), (7, Command::Keywords)]);
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(body).unwrap();
        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let first = backoff_delay(1);
        assert!(first >= Duration::from_secs(1) && first <= Duration::from_millis(1250));

        let third = backoff_delay(3);
        assert!(third >= Duration::from_secs(4) && third <= Duration::from_millis(4250));

        let capped = backoff_delay(40);
        assert!(capped >= BACKOFF_MAX && capped <= BACKOFF_MAX + Duration::from_millis(250));
    }
}
