use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::error::Error;
use validator::{Validate, ValidationErrors};

use super::{
  model::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse},
  repository::UserRepository,
};
use crate::{
  impl_service_error_conversions,
  utils::{
    age::calculate_age,
    pagination::{total_pages, PaginationParams},
    validation_details, DATE_FORMAT,
  },
};

#[derive(Debug)]
pub enum UserServiceError {
  ValidationError { message: String, details: Vec<String> },
  InvalidDate(String),
  NotFound(String),
  StorageError(String),
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::ValidationError { message, details } => {
        write!(f, "Validation Error: {} [{}]", message, details.join(", "))
      }
      UserServiceError::InvalidDate(msg) => write!(f, "Invalid Date: {}", msg),
      UserServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
      UserServiceError::StorageError(msg) => write!(f, "Storage Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(UserServiceError, StorageError);

#[async_trait]
pub trait UserService: Send + Sync {
  async fn create_user(&self, req: CreateUserRequest) -> Result<UserResponse, UserServiceError>;
  async fn get_user(&self, id: i32) -> Result<UserResponse, UserServiceError>;
  async fn list_users(&self, params: PaginationParams) -> Result<UserListResponse, UserServiceError>;
  async fn update_user(&self, id: i32, req: UpdateUserRequest) -> Result<UserResponse, UserServiceError>;
  async fn delete_user(&self, id: i32) -> Result<(), UserServiceError>;
}

fn today_utc() -> NaiveDate {
  Utc::now().date_naive()
}

fn parse_dob(raw: &str) -> Result<NaiveDate, UserServiceError> {
  NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
    tracing::warn!("Invalid DOB {:?}: {}", raw, e);
    UserServiceError::InvalidDate("Invalid date format. Expected YYYY-MM-DD".to_string())
  })
}

fn validation_failed(message: &str, errors: ValidationErrors) -> UserServiceError {
  let details = validation_details(&errors);
  tracing::debug!(?details, "{}", message);
  UserServiceError::ValidationError {
    message: message.to_string(),
    details,
  }
}

fn user_not_found() -> UserServiceError {
  UserServiceError::NotFound("User not found".to_string())
}

pub struct UserServiceImpl<U> {
  user_repository: U,
  today: fn() -> NaiveDate,
}

impl<U> UserServiceImpl<U>
where
  U: UserRepository,
{
  pub fn new(user_repository: U) -> Self {
    Self::with_clock(user_repository, today_utc)
  }

  /// Uses `today` as the reference date for ages instead of the current UTC date.
  pub fn with_clock(user_repository: U, today: fn() -> NaiveDate) -> Self {
    Self { user_repository, today }
  }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
  U: UserRepository,
{
  async fn create_user(&self, req: CreateUserRequest) -> Result<UserResponse, UserServiceError> {
    req
      .validate()
      .map_err(|e| validation_failed("Validation failed", e))?;

    let dob = parse_dob(&req.dob)?;
    let user = self.user_repository.create(&req.name, dob).await?;

    Ok(UserResponse::from_user(user, None))
  }

  async fn get_user(&self, id: i32) -> Result<UserResponse, UserServiceError> {
    let user = self.user_repository.find_by_id(id).await?.ok_or_else(user_not_found)?;

    let age = calculate_age(user.dob, (self.today)());
    Ok(UserResponse::from_user(user, Some(age)))
  }

  async fn list_users(&self, params: PaginationParams) -> Result<UserListResponse, UserServiceError> {
    params
      .validate()
      .map_err(|e| validation_failed("Invalid pagination parameters", e))?;

    let (page, page_size) = params.normalize();

    // 一覧と件数は別々のクエリで取得する
    let users = self.user_repository.list(params.limit(), params.offset()).await?;
    let total = self.user_repository.count().await?;

    let today = (self.today)();
    let users = users
      .into_iter()
      .map(|user| {
        let age = calculate_age(user.dob, today);
        UserResponse::from_user(user, Some(age))
      })
      .collect();

    Ok(UserListResponse {
      users,
      total,
      page,
      page_size,
      total_pages: total_pages(total, page_size),
    })
  }

  async fn update_user(&self, id: i32, req: UpdateUserRequest) -> Result<UserResponse, UserServiceError> {
    req
      .validate()
      .map_err(|e| validation_failed("Validation failed", e))?;

    let dob = parse_dob(&req.dob)?;
    let user = self
      .user_repository
      .update(id, &req.name, dob)
      .await?
      .ok_or_else(user_not_found)?;

    Ok(UserResponse::from_user(user, None))
  }

  async fn delete_user(&self, id: i32) -> Result<(), UserServiceError> {
    if self.user_repository.delete(id).await? {
      Ok(())
    } else {
      Err(user_not_found())
    }
  }
}
