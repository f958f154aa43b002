use axum::http::{HeaderName, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Reuses a caller-supplied `x-request-id`, or generates a UUID when there is none.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeRequestUuidOrHeader;

impl MakeRequestId for MakeRequestUuidOrHeader {
    fn make_request_id<B>(&mut self, request: &Request<B>) -> Option<RequestId> {
        if let Some(existing) = request.headers().get(&REQUEST_ID_HEADER) {
            if !existing.is_empty() {
                return Some(RequestId::new(existing.clone()));
            }
        }

        let id = Uuid::new_v4().to_string();
        id.parse().ok().map(RequestId::new)
    }
}
