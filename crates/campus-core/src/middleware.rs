use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::http::header::CONTENT_LENGTH;
use axum::middleware::Next;
use axum::response::Response;
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MakeUuidRequestId;

impl MakeRequestId for MakeUuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(id.parse().unwrap()))
    }
}

/// Build the request-id layer. Apply with `.layer(request_id_layer())` in router.
pub fn request_id_layer() -> SetRequestIdLayer<MakeUuidRequestId> {
    SetRequestIdLayer::new(
        axum::http::HeaderName::from_static("x-request-id"),
        MakeUuidRequestId,
    )
}

/// Stamp the request path onto JSON error envelopes.
///
/// [`crate::error::ApiError`] renders `{message, status, statusCode,
/// timestamp}` without knowing the URI; this middleware buffers 4xx/5xx
/// JSON bodies that carry a `statusCode` field and inserts `path`.
/// Non-envelope error responses pass through untouched.
pub async fn error_path(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let res = next.run(req).await;

    let status = res.status();
    if !status.is_client_error() && !status.is_server_error() {
        return res;
    }

    let (mut parts, body) = res.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return Response::from_parts(parts, Body::empty()),
    };

    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(serde_json::Value::Object(mut map)) if map.contains_key("statusCode") => {
            map.insert("path".to_owned(), serde_json::Value::String(path));
            let buf = serde_json::to_vec(&map).unwrap_or_else(|_| bytes.to_vec());
            // Body length changed; let hyper recompute the header.
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(buf))
        }
        _ => Response::from_parts(parts, Body::from(bytes)),
    }
}
