use std::future::Future;

use axum::{extract::Request, http::HeaderName, middleware::Next, response::Response};
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use uuid::Uuid;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

tokio::task_local! {
  static CURRENT_REQUEST_ID: String;
}

#[derive(Default, Clone)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
  fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
    Uuid::new_v4().to_string().parse().ok().map(RequestId::new)
  }
}

/// Sets `X-Request-ID` on the incoming request unless the caller already supplied one.
pub fn set_request_id_layer() -> SetRequestIdLayer<UuidRequestId> {
  SetRequestIdLayer::new(X_REQUEST_ID.clone(), UuidRequestId)
}

/// The id of the request currently being handled, if any.
pub fn current_request_id() -> Option<String> {
  CURRENT_REQUEST_ID.try_with(|id| id.clone()).ok()
}

pub async fn with_request_id<F: Future>(request_id: String, f: F) -> F::Output {
  CURRENT_REQUEST_ID.scope(request_id, f).await
}

/// Makes the request id available to error responses rendered further down the stack.
pub async fn scope_request_id(request: Request, next: Next) -> Response {
  let request_id = request
    .extensions()
    .get::<RequestId>()
    .and_then(|id| id.header_value().to_str().ok())
    .unwrap_or_default()
    .to_string();

  with_request_id(request_id, next.run(request)).await
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_request_id_is_scoped() {
    assert_eq!(current_request_id(), None);
    let inside = with_request_id("abc".to_string(), async { current_request_id() }).await;
    assert_eq!(inside.as_deref(), Some("abc"));
    assert_eq!(current_request_id(), None);
  }

  #[test]
  fn test_generated_ids_are_unique_uuids() {
    let request = axum::http::Request::new(());
    let mut maker = UuidRequestId;
    let a = maker.make_request_id(&request).unwrap();
    let b = maker.make_request_id(&request).unwrap();
    let a = a.header_value().to_str().unwrap();
    assert!(Uuid::parse_str(a).is_ok());
    assert_ne!(a, b.header_value().to_str().unwrap());
  }
}
