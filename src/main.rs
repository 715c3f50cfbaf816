use std::net::SocketAddr;

use tokio::signal;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use age_calculator_api::app::create_app_with_timeout;
use age_calculator_api::config::Config;
use age_calculator_api::db::pool::create_pool;
use age_calculator_api::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| "age_calculator_api=info,tower_http=info".into()),
    )
    .init();

  let config = Config::from_env()?;

  let pool = create_pool(&config.database).await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("Database migrations applied successfully");

  let app_state = SharedAppState::new(pool.clone());
  let app = create_app_with_timeout(app_state, config.server.request_timeout);

  let address = config.server.address();
  let listener = tokio::net::TcpListener::bind(&address).await?;

  tracing::info!(address = %address, "Server starting");

  axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  pool.close().await;
  tracing::info!("Server stopped");

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!("Failed to install Ctrl+C handler: {}", e);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        tracing::error!("Failed to install signal handler: {}", e);
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Shutting down server...");
}
