pub mod types;
pub mod webhook;

pub use types::{NotificationEvent, Payload};
pub use webhook::{HttpWebhook, Webhook};

/// Fire-and-forget delivery: failures are logged and the event is dropped.
pub struct Notifier<W: Webhook> {
    pub webhook: W,
}

impl<W: Webhook> Notifier<W> {
    pub fn new(webhook: W) -> Self {
        Self { webhook }
    }

    /// Returns whether the webhook accepted the event.
    pub fn notify(&self, event: NotificationEvent, branch: &str, commit_log: &str) -> bool {
        let payload = Payload::new(event, branch, commit_log);

        match self.webhook.send(&payload) {
            Ok(()) => {
                log::info!("Message: {:?} sent successfully", payload);
                true
            }
            Err(e) => {
                log::error!("Failed to send message: {}", e);
                false
            }
        }
    }
}
