use axum::{
  extract::{
    rejection::{JsonRejection, PathRejection, QueryRejection},
    Json, Path, Query, State,
  },
  http::StatusCode,
  response::Json as JsonResponse,
  routing::get,
  Router,
};

use super::{
  model::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse},
  service::UserServiceError,
};
use crate::{
  state::{AppState, SharedAppState},
  utils::pagination::PaginationParams,
  AppError,
};

pub fn user_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/users", get(list_users_handler).post(create_user_handler))
    .route(
      "/users/{id}",
      get(get_user_handler).put(update_user_handler).delete(delete_user_handler),
    )
}

/// Client errors pass through; storage failures get a fixed message per operation.
/// The repository has already logged the underlying failure.
fn map_user_service_error(e: UserServiceError, failure_message: &str) -> AppError {
  match e {
    UserServiceError::StorageError(_) => AppError::internal_server_error(failure_message),
    other => other.into(),
  }
}

fn user_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, AppError> {
  path.map(|Path(id)| id).map_err(|_| AppError::bad_request("Invalid user ID"))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
  payload.map(|Json(body)| body).map_err(|rejection| {
    tracing::debug!("Failed to parse request body: {}", rejection);
    AppError::bad_request("Invalid request body")
  })
}

pub async fn create_user_handler(
  State(state): State<SharedAppState>,
  payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, JsonResponse<UserResponse>), AppError> {
  let payload = json_body(payload)?;

  state
    .create_user(payload)
    .await
    .map(|user| (StatusCode::CREATED, JsonResponse(user)))
    .map_err(|e| map_user_service_error(e, "Failed to create user"))
}

pub async fn get_user_handler(
  State(state): State<SharedAppState>,
  path: Result<Path<i32>, PathRejection>,
) -> Result<JsonResponse<UserResponse>, AppError> {
  let id = user_id(path)?;

  state
    .get_user(id)
    .await
    .map(JsonResponse)
    .map_err(|e| map_user_service_error(e, "Failed to get user"))
}

pub async fn list_users_handler(
  State(state): State<SharedAppState>,
  query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<JsonResponse<UserListResponse>, AppError> {
  let Query(params) = query.map_err(|_| AppError::bad_request("Invalid pagination parameters"))?;

  state
    .list_users(params)
    .await
    .map(JsonResponse)
    .map_err(|e| map_user_service_error(e, "Failed to list users"))
}

pub async fn update_user_handler(
  State(state): State<SharedAppState>,
  path: Result<Path<i32>, PathRejection>,
  payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<JsonResponse<UserResponse>, AppError> {
  let id = user_id(path)?;
  let payload = json_body(payload)?;

  state
    .update_user(id, payload)
    .await
    .map(JsonResponse)
    .map_err(|e| map_user_service_error(e, "Failed to update user"))
}

pub async fn delete_user_handler(
  State(state): State<SharedAppState>,
  path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
  let id = user_id(path)?;

  state
    .delete_user(id)
    .await
    .map(|_| StatusCode::NO_CONTENT)
    .map_err(|e| map_user_service_error(e, "Failed to delete user"))
}
