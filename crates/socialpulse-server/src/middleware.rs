use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has a non-empty `x-request-id` header, that value
/// is used. Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = incoming_request_id(req.headers().get(REQUEST_ID_HEADER))
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    res
}

fn incoming_request_id(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_request_id_accepts_caller_value() {
        let header = HeaderValue::from_static("req-abc");
        assert_eq!(incoming_request_id(Some(&header)), Some("req-abc"));
    }

    #[test]
    fn incoming_request_id_ignores_blank_header() {
        let header = HeaderValue::from_static("   ");
        assert_eq!(incoming_request_id(Some(&header)), None);
        assert_eq!(incoming_request_id(None), None);
    }
}
