use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::model::User;

/// Persistence for users. Lookups that miss return `Ok(None)` / `Ok(false)` rather than an error.
#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, name: &str, dob: NaiveDate) -> Result<User, sqlx::Error>;
  async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error>;
  async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error>;
  async fn count(&self) -> Result<i64, sqlx::Error>;
  async fn update(&self, id: i32, name: &str, dob: NaiveDate) -> Result<Option<User>, sqlx::Error>;
  async fn delete(&self, id: i32) -> Result<bool, sqlx::Error>;
}

pub struct SqlxUserRepository {
  pub pool: PgPool,
}

impl SqlxUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn create(&self, name: &str, dob: NaiveDate) -> Result<User, sqlx::Error> {
    let user = User::create(&self.pool, name, dob)
      .await
      .inspect_err(|e| tracing::error!("Failed to create user: {:?}", e))?;

    tracing::info!(user_id = user.id, "User created");
    Ok(user)
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error> {
    User::find_by_id(&self.pool, id)
      .await
      .inspect_err(|e| tracing::error!(user_id = id, "Failed to get user: {:?}", e))
  }

  async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
    User::list(&self.pool, limit, offset)
      .await
      .inspect_err(|e| tracing::error!("Failed to list users: {:?}", e))
  }

  async fn count(&self) -> Result<i64, sqlx::Error> {
    User::count(&self.pool)
      .await
      .inspect_err(|e| tracing::error!("Failed to count users: {:?}", e))
  }

  async fn update(&self, id: i32, name: &str, dob: NaiveDate) -> Result<Option<User>, sqlx::Error> {
    let user = User::update(&self.pool, id, name, dob)
      .await
      .inspect_err(|e| tracing::error!(user_id = id, "Failed to update user: {:?}", e))?;

    if user.is_some() {
      tracing::info!(user_id = id, "User updated");
    }
    Ok(user)
  }

  async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
    let deleted = User::delete(&self.pool, id)
      .await
      .inspect_err(|e| tracing::error!(user_id = id, "Failed to delete user: {:?}", e))?;

    if deleted {
      tracing::info!(user_id = id, "User deleted");
    }
    Ok(deleted)
  }
}
