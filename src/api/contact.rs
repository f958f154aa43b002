use crate::api::{AppState, response};
use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    response::{IntoResponse, Response},
};

/// Accepts a contact form submission.
///
/// The body is taken as raw bytes so that anything other than a well-formed
/// submission is reported through the pipeline's own validation error. Bodies that
/// cannot be read at all (for example, over the size limit) still get a JSON error.
pub async fn submit(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Failed to read submission body");
            return response::failure(rejection.status(), rejection.body_text());
        }
    };

    match state.submission_service.submit(&body).await {
        Ok(_) => response::success(),
        Err(e) => e.into_response(),
    }
}
