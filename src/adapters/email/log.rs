use crate::domain::notification::NotificationRequest;
use crate::services::submission::notifier::{Notifier, NotifyError};
use async_trait::async_trait;

/// Logs notifications instead of sending them. Meant for local development.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        tracing::info!(
            source = %request.source,
            destination = %request.destination,
            subject = %request.subject,
            body = %request.body_text,
            "STUB: Sending operator notification"
        );
        Ok(())
    }

    async fn ping(&self) -> Result<(), NotifyError> {
        Ok(())
    }
}
