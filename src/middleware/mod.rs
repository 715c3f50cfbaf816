use std::time::Duration;

use axum::{
  extract::{Request, State},
  http::Method,
  middleware::{from_fn, from_fn_with_state, Next},
  response::{IntoResponse, Response},
  Router,
};
use tower::ServiceBuilder;
use tower_http::{
  catch_panic::CatchPanicLayer,
  cors::{Any, CorsLayer},
  request_id::PropagateRequestIdLayer,
};

use crate::AppError;

pub mod logger;
pub mod recover;
pub mod request_id;

/// Wraps the router with the request-id, access-log, CORS, panic and deadline layers.
pub fn apply(router: Router, request_timeout: Duration) -> Router {
  let middleware = ServiceBuilder::new()
    .layer(request_id::set_request_id_layer())
    .layer(PropagateRequestIdLayer::new(request_id::X_REQUEST_ID.clone()))
    .layer(from_fn(request_id::scope_request_id))
    .layer(from_fn(logger::log_request))
    .layer(cors_layer())
    .layer(CatchPanicLayer::custom(recover::catch_panic))
    .layer(from_fn_with_state(request_timeout, enforce_deadline));

  router.layer(middleware)
}

fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_headers(Any)
    .allow_methods([
      Method::GET,
      Method::POST,
      Method::HEAD,
      Method::PUT,
      Method::DELETE,
      Method::PATCH,
    ])
}

/// Drops the handler future, and with it any in-flight query, once the deadline elapses.
pub async fn enforce_deadline(State(timeout): State<Duration>, request: Request, next: Next) -> Response {
  match tokio::time::timeout(timeout, next.run(request)).await {
    Ok(response) => response,
    Err(_) => {
      tracing::warn!(timeout = ?timeout, "Request deadline elapsed");
      AppError::request_timeout("Request timed out").into_response()
    }
  }
}
