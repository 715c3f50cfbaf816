use std::sync::Arc;

use sqlx::PgPool;

use crate::domains::user::{
  model::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse},
  repository::SqlxUserRepository,
  service::{UserService, UserServiceError, UserServiceImpl},
};
use crate::utils::pagination::PaginationParams;

pub trait AppState: Clone + Send + Sync + 'static {
  fn create_user(
    &self,
    req: CreateUserRequest,
  ) -> impl std::future::Future<Output = Result<UserResponse, UserServiceError>> + Send;
  fn get_user(&self, id: i32) -> impl std::future::Future<Output = Result<UserResponse, UserServiceError>> + Send;
  fn list_users(
    &self,
    params: PaginationParams,
  ) -> impl std::future::Future<Output = Result<UserListResponse, UserServiceError>> + Send;
  fn update_user(
    &self,
    id: i32,
    req: UpdateUserRequest,
  ) -> impl std::future::Future<Output = Result<UserResponse, UserServiceError>> + Send;
  fn delete_user(&self, id: i32) -> impl std::future::Future<Output = Result<(), UserServiceError>> + Send;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub user_service: Arc<dyn UserService>,
}

impl SharedAppState {
  pub fn new(pool: PgPool) -> Self {
    let user_repository = SqlxUserRepository::new(pool);
    let user_service = Arc::new(UserServiceImpl::new(user_repository));

    Self { user_service }
  }

  pub fn with_user_service(user_service: Arc<dyn UserService>) -> Self {
    Self { user_service }
  }
}

impl AppState for SharedAppState {
  async fn create_user(&self, req: CreateUserRequest) -> Result<UserResponse, UserServiceError> {
    self.user_service.create_user(req).await
  }

  async fn get_user(&self, id: i32) -> Result<UserResponse, UserServiceError> {
    self.user_service.get_user(id).await
  }

  async fn list_users(&self, params: PaginationParams) -> Result<UserListResponse, UserServiceError> {
    self.user_service.list_users(params).await
  }

  async fn update_user(&self, id: i32, req: UpdateUserRequest) -> Result<UserResponse, UserServiceError> {
    self.user_service.update_user(id, req).await
  }

  async fn delete_user(&self, id: i32) -> Result<(), UserServiceError> {
    self.user_service.delete_user(id).await
  }
}
