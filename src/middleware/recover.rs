use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::AppError;

pub fn catch_panic(err: Box<dyn Any + Send + 'static>) -> Response {
  let detail = if let Some(s) = err.downcast_ref::<String>() {
    s.as_str()
  } else if let Some(s) = err.downcast_ref::<&str>() {
    s
  } else {
    "<unknown>"
  };

  tracing::error!(panic = detail, "Handler panicked");
  AppError::internal_server_error("Internal Server Error").into_response()
}
