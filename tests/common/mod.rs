use std::sync::{Arc, Mutex};

use age_calculator_api::{
  app::create_app,
  domains::user::{model::User, repository::UserRepository, service::UserServiceImpl},
  state::SharedAppState,
};
use async_trait::async_trait;
use axum::{
  body::Body,
  http::{Request, StatusCode},
  Router,
};
use chrono::{NaiveDate, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

#[derive(Default)]
struct Table {
  next_id: i32,
  rows: Vec<User>,
}

/// Keeps users in memory, ordered by id, with the same not-found semantics as the SQL store.
#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
  table: Arc<Mutex<Table>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, name: &str, dob: NaiveDate) -> Result<User, sqlx::Error> {
    let mut table = self.table.lock().unwrap();
    table.next_id += 1;
    let now = Utc::now().naive_utc();
    let user = User {
      id: table.next_id,
      name: name.to_string(),
      dob,
      created_at: now,
      updated_at: now,
    };
    table.rows.push(user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error> {
    let table = self.table.lock().unwrap();
    Ok(table.rows.iter().find(|u| u.id == id).cloned())
  }

  async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
    let table = self.table.lock().unwrap();
    Ok(
      table
        .rows
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect(),
    )
  }

  async fn count(&self) -> Result<i64, sqlx::Error> {
    Ok(self.table.lock().unwrap().rows.len() as i64)
  }

  async fn update(&self, id: i32, name: &str, dob: NaiveDate) -> Result<Option<User>, sqlx::Error> {
    let mut table = self.table.lock().unwrap();
    Ok(table.rows.iter_mut().find(|u| u.id == id).map(|user| {
      user.name = name.to_string();
      user.dob = dob;
      user.updated_at = Utc::now().naive_utc();
      user.clone()
    }))
  }

  async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
    let mut table = self.table.lock().unwrap();
    let before = table.rows.len();
    table.rows.retain(|u| u.id != id);
    Ok(table.rows.len() < before)
  }
}

pub fn test_app() -> (Router, InMemoryUserRepository) {
  let repo = InMemoryUserRepository::default();
  let service = UserServiceImpl::new(repo.clone());
  let app = create_app(SharedAppState::with_user_service(Arc::new(service)));
  (app, repo)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
  let response = app.clone().oneshot(request).await.unwrap();
  let status = response.status();
  let headers = response.headers().clone();
  let body = response.into_body().collect().await.unwrap().to_bytes();
  let json = if body.is_empty() {
    serde_json::Value::Null
  } else {
    serde_json::from_slice(&body).unwrap()
  };
  (status, headers, json)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
  Request::builder()
    .method(method)
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(serde_json::to_vec(&body).unwrap()))
    .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
  Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}
