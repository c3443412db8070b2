pub mod format;
pub mod gotify;

pub use format::format_message;
pub use gotify::GotifyNotifier;

use crate::model::NotifyError;

/// Delivers a finished text to a push endpoint.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// `None` falls back to the notifier's default title / priority.
    async fn deliver(
        &self,
        message: &str,
        title: Option<&str>,
        priority: Option<u8>,
    ) -> Result<(), NotifyError>;
}
