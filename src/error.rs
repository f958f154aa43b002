use crate::api::response;
use crate::services::submission::notifier::NotifyError;
use crate::services::submission::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Request body must be a JSON object with string fields name, email and message")]
    Malformed(String),
    #[error("Field `{0}` must not be empty")]
    EmptyField(&'static str),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    Configuration(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Persistence failed: {0}")]
    Persistence(#[from] StoreError),
    #[error("Notification failed: {0}")]
    Notification(#[from] NotifyError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Label used for logs and the submission outcome metric.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::Validation(_) => "validation_error",
            Self::Persistence(_) => "persistence_error",
            Self::Notification(_) => "notification_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Configuration(setting) => {
                tracing::error!(setting = %setting, "Contact pipeline is not configured");
                (StatusCode::INTERNAL_SERVER_ERROR, "Service is not configured".to_string())
            }
            Self::Validation(e) => {
                if let ValidationError::Malformed(detail) = &e {
                    tracing::debug!(detail = %detail, "Malformed submission");
                }
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            Self::Persistence(e) => {
                tracing::error!(error = %e, "Failed to store submission");
                (StatusCode::BAD_GATEWAY, "could not store submission".to_string())
            }
            Self::Notification(e) => {
                tracing::error!(error = %e, "Failed to send notification");
                (StatusCode::BAD_GATEWAY, "could not send notification".to_string())
            }
        };

        response::failure(status, message)
    }
}
