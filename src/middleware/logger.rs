use std::{net::SocketAddr, time::Instant};

use axum::{
  extract::{ConnectInfo, Request},
  http::header::USER_AGENT,
  middleware::Next,
  response::Response,
};
use tracing::Instrument;

use super::request_id::current_request_id;

/// Emits one access-log event per request once the response is ready.
pub async fn log_request(request: Request, next: Next) -> Response {
  let method = request.method().clone();
  let path = request.uri().path().to_string();
  let ip = request
    .extensions()
    .get::<ConnectInfo<SocketAddr>>()
    .map(|ConnectInfo(addr)| addr.ip().to_string())
    .unwrap_or_default();
  let user_agent = request
    .headers()
    .get(USER_AGENT)
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default()
    .to_string();
  let request_id = current_request_id().unwrap_or_default();

  let span = tracing::info_span!("http.request", request_id = %request_id, method = %method, path = %path);

  let start = Instant::now();
  let response = next.run(request).instrument(span.clone()).await;
  let duration = start.elapsed();

  span.in_scope(|| {
    tracing::info!(
      status = response.status().as_u16(),
      duration = ?duration,
      ip = %ip,
      user_agent = %user_agent,
      "HTTP Request"
    )
  });

  response
}
