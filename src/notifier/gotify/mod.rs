pub mod sender;

use crate::config::{DEFAULT_TITLE, GotifySettings};
use crate::model::NotifyError;
use crate::notifier::Notifier;
use reqwest::Client;
use std::time::Duration;

pub struct GotifyNotifier {
    pub message_url: String,
    pub token: String,
    pub priority: u8,
    pub client: Client,
}

impl GotifyNotifier {
    pub fn new(settings: &GotifySettings) -> Result<Self, NotifyError> {
        if server_host(&settings.server_url).is_empty() {
            return Err(NotifyError::MissingHost(settings.server_url.clone()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            message_url: message_url(&settings.server_url, settings.secure),
            token: settings.token.clone(),
            priority: settings.priority,
            client,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for GotifyNotifier {
    async fn deliver(
        &self,
        message: &str,
        title: Option<&str>,
        priority: Option<u8>,
    ) -> Result<(), NotifyError> {
        let title = title.unwrap_or(DEFAULT_TITLE);
        let priority = priority.unwrap_or(self.priority);
        sender::send_message(self, title, message, priority).await
    }
}

/// `<scheme>://<host>/message`, where the scheme follows `secure` and any
/// scheme or path in `server_url` is discarded.
pub fn message_url(server_url: &str, secure: bool) -> String {
    let scheme = if secure { "https" } else { "http" };
    format!("{scheme}://{}/message", server_host(server_url))
}

fn server_host(server_url: &str) -> &str {
    let without_scheme = server_url
        .split_once("://")
        .map_or(server_url, |(_, rest)| rest);
    without_scheme.split('/').next().unwrap_or_default().trim()
}
