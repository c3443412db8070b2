// notifier/gotify/sender.rs

use crate::model::NotifyError;
use crate::notifier::gotify::GotifyNotifier;
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct GotifyMessage<'a> {
    title: &'a str,
    message: &'a str,
    priority: u8,
}

/// Posts a message to the Gotify `/message` endpoint.
pub async fn send_message(
    notifier: &GotifyNotifier,
    title: &str,
    message: &str,
    priority: u8,
) -> Result<(), NotifyError> {
    let payload = GotifyMessage {
        title,
        message,
        priority,
    };
    info!("Sending notification to {}", notifier.message_url);

    let response = match timeout(
        Duration::from_secs(15),
        notifier
            .client
            .post(&notifier.message_url)
            .header("X-Gotify-Key", &notifier.token)
            .json(&payload)
            .send(),
    )
    .await
    {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            warn!("Gotify send() failed: {:?}", e);
            return Err(NotifyError::Http(e));
        }
        Err(_) => {
            warn!("Gotify send() timed out");
            return Err(NotifyError::Timeout);
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|_| "unknown".into());
        warn!("Gotify responded [{}]: {}", status, body);
        return Err(NotifyError::Status {
            status: status.as_u16(),
            body,
        });
    }

    info!("Notification sent successfully [{}]", status);
    Ok(())
}
