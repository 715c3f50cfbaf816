use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

use crate::middleware::request_id::current_request_id;

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
  pub details: Option<Vec<String>>,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
      details: None,
    }
  }

  /// Attaches per-field messages, rendered as `details` in the body.
  pub fn with_details(mut self, details: Vec<String>) -> Self {
    self.details = Some(details);
    self
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  pub fn request_timeout(message: impl Into<String>) -> Self {
    Self::new(StatusCode::REQUEST_TIMEOUT, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }
}

impl std::fmt::Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.status_code, self.message)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let mut body = json!({
      "error": self.message,
      "request_id": current_request_id().unwrap_or_default(),
    });
    if let Some(details) = self.details {
      body["details"] = json!(details);
    }

    (self.status_code, Json(body)).into_response()
  }
}

impl From<AppError> for StatusCode {
  fn from(err: AppError) -> Self {
    err.status_code
  }
}

impl From<crate::domains::user::service::UserServiceError> for AppError {
  fn from(error: crate::domains::user::service::UserServiceError) -> Self {
    use crate::domains::user::service::UserServiceError;
    match error {
      UserServiceError::ValidationError { message, details } => AppError::bad_request(message).with_details(details),
      UserServiceError::InvalidDate(msg) => AppError::bad_request(msg),
      UserServiceError::NotFound(msg) => AppError::not_found(msg),
      // Already logged where the store call failed.
      UserServiceError::StorageError(_) => AppError::internal_server_error("Internal server error occurred"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domains::user::service::UserServiceError;

  async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
  }

  #[tokio::test]
  async fn test_error_envelope_without_request_scope() {
    let (status, body) = render(AppError::not_found("User not found")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
    assert_eq!(body["request_id"], "");
    assert!(body.get("details").is_none());
  }

  #[tokio::test]
  async fn test_validation_error_carries_details() {
    let err: AppError = UserServiceError::ValidationError {
      message: "Validation failed".to_string(),
      details: vec!["name validation failed on length".to_string()],
    }
    .into();
    let (status, body) = render(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"], json!(["name validation failed on length"]));
  }

  #[tokio::test]
  async fn test_error_envelope_carries_request_id() {
    let (status, body) = crate::middleware::request_id::with_request_id(
      "req-123".to_string(),
      render(AppError::bad_request("Invalid user ID")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["request_id"], "req-123");
  }

  #[tokio::test]
  async fn test_storage_error_is_sanitized() {
    let err: AppError = UserServiceError::StorageError("connection refused on 10.0.0.3".to_string()).into();
    assert_eq!(err.status_code, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!err.message.contains("10.0.0.3"));
  }

  #[test]
  fn test_service_error_status_mapping() {
    let cases = [
      (
        UserServiceError::ValidationError {
          message: "x".into(),
          details: vec![],
        },
        StatusCode::BAD_REQUEST,
      ),
      (UserServiceError::InvalidDate("x".into()), StatusCode::BAD_REQUEST),
      (UserServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
      (UserServiceError::StorageError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, expected) in cases {
      assert_eq!(StatusCode::from(AppError::from(err)), expected);
    }
  }
}
