use crate::domain::notification::NotificationRequest;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Email rejected: {0}")]
    Rejected(String),
    #[error("Email provider error: {0}")]
    Provider(String),
}

/// Outbound email delivery. A successful `send` means the provider accepted the
/// message, not that it was delivered.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Hands a notification to the email provider.
    ///
    /// # Errors
    /// Returns `NotifyError::Rejected` if the provider refused the message.
    /// Returns `NotifyError::Provider` for transport or service failures.
    async fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError>;

    /// Checks that the provider is reachable.
    ///
    /// # Errors
    /// Returns `NotifyError` if the provider cannot be reached.
    async fn ping(&self) -> Result<(), NotifyError>;
}
