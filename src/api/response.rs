use crate::api::schemas::contact::{ErrorResponse, SubmissionAccepted};
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Message stored and email sent!";

/// The contact page is served from another origin, so every pipeline response
/// carries a permissive CORS header alongside its JSON content type.
fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(body)).into_response()
}

#[must_use]
pub fn success() -> Response {
    json_response(StatusCode::OK, SubmissionAccepted { message: SUCCESS_MESSAGE.to_string() })
}

#[must_use]
pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    json_response(status, ErrorResponse { error: message.into() })
}
