use std::time::Duration;

use axum::{response::Json as JsonResponse, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{domains::user::rest::user_routes, middleware, state::SharedAppState, AppError};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
  pub status: String,
  pub time: DateTime<Utc>,
}

pub fn create_app(state: SharedAppState) -> Router {
  create_app_with_timeout(state, DEFAULT_REQUEST_TIMEOUT)
}

pub fn create_app_with_timeout(state: SharedAppState, request_timeout: Duration) -> Router {
  let router = Router::new()
    .route("/health", get(health_handler))
    .nest("/api/v1", user_routes())
    .fallback(not_found_handler)
    .with_state(state);

  middleware::apply(router, request_timeout)
}

pub async fn health_handler() -> JsonResponse<HealthResponse> {
  JsonResponse(HealthResponse {
    status: "ok".to_string(),
    time: Utc::now(),
  })
}

async fn not_found_handler() -> AppError {
  AppError::not_found("Not Found")
}
