use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use validator::Validate;

use crate::utils::DATE_FORMAT;

#[derive(Debug, Clone, PartialEq, FromRow, Deserialize, Serialize)]
pub struct User {
  pub id: i32,
  pub name: String,
  pub dob: NaiveDate,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateUserRequest {
  #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
  pub name: String,
  #[validate(custom(function = "crate::utils::validate_date_format"))]
  pub dob: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UpdateUserRequest {
  #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
  pub name: String,
  #[validate(custom(function = "crate::utils::validate_date_format"))]
  pub dob: String,
}

/// A user as returned over HTTP. `age` is only filled in on reads.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserResponse {
  pub id: i32,
  pub name: String,
  pub dob: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub age: Option<i32>,
}

impl UserResponse {
  pub fn from_user(user: User, age: Option<i32>) -> Self {
    Self {
      id: user.id,
      name: user.name,
      dob: user.dob.format(DATE_FORMAT).to_string(),
      age,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserListResponse {
  pub users: Vec<UserResponse>,
  pub total: i64,
  pub page: i64,
  pub page_size: i64,
  pub total_pages: i64,
}

impl User {
  pub async fn create(db: &PgPool, name: &str, dob: NaiveDate) -> Result<User, sqlx::Error> {
    Self::create_with_executor(db, name, dob).await
  }

  pub async fn create_with_executor<'e, E>(executor: E, name: &str, dob: NaiveDate) -> Result<User, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"
        INSERT INTO users (name, dob)
        VALUES ($1, $2)
        RETURNING id, name, dob, created_at, updated_at
      "#,
    )
    .bind(name)
    .bind(dob)
    .fetch_one(executor)
    .await
  }

  pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(r#"SELECT id, name, dob, created_at, updated_at FROM users WHERE id = $1"#)
      .bind(id)
      .fetch_optional(executor)
      .await
  }

  pub async fn list<'e, E>(executor: E, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"
        SELECT id, name, dob, created_at, updated_at
        FROM users
        ORDER BY id
        LIMIT $1 OFFSET $2
      "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await
  }

  pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM users"#)
      .fetch_one(executor)
      .await
  }

  pub async fn update<'e, E>(executor: E, id: i32, name: &str, dob: NaiveDate) -> Result<Option<User>, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    sqlx::query_as::<_, User>(
      r#"
        UPDATE users
        SET name = $1, dob = $2, updated_at = CURRENT_TIMESTAMP
        WHERE id = $3
        RETURNING id, name, dob, created_at, updated_at
      "#,
    )
    .bind(name)
    .bind(dob)
    .bind(id)
    .fetch_optional(executor)
    .await
  }

  /// Returns `false` when no row had the given id.
  pub async fn delete<'e, E>(executor: E, id: i32) -> Result<bool, sqlx::Error>
  where
    E: PgExecutor<'e>,
  {
    let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
      .bind(id)
      .execute(executor)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}
