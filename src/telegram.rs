use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::notify::{Notifier, NotifyError, NotifyResult};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Delivers alerts through the Telegram Bot API.
///
/// One pooled client serves all deliveries. The API base is overridable so
/// tests can point the notifier at a mock server.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    token: String,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(token: impl ToString) -> Self {
        Self::with_api_base(token, TELEGRAM_API_BASE)
    }

    pub fn with_api_base(token: impl ToString, api_base: impl ToString) -> Self {
        Self {
            client: Client::new(),
            token: token.to_string(),
            api_base: api_base.to_string(),
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    #[instrument(skip(self, text))]
    async fn send(&self, user_id: i64, text: &str) -> NotifyResult {
        let payload = SendMessage {
            chat_id: user_id,
            text,
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.json::<ApiResponse>().await.ok();

        match body {
            Some(api) if api.ok => {
                debug!("delivered message to user {user_id}");
                Ok(())
            }
            api => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: api
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| status.to_string()),
            }),
        }
    }
}
