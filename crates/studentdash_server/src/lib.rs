//! HTTP read endpoint for the student record store.
//!
//! # Responsibility
//! - Serve `GET /users` from the SQLite store.
//! - Bootstrap the store under the configured retry policy before binding.
//! - Shut down gracefully on Ctrl+C or SIGTERM.

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use studentdash_core::{open_db_with_retry, DbError};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::{not_found_handler, users_handler};
use state::AppState;

#[derive(Debug)]
pub enum ServerError {
    Db(DbError),
    Io(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "database unavailable: {err}"),
            Self::Io(err) => write!(f, "server i/o failure: {err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for ServerError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Builds the application router over `state`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/users", get(users_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .with_state(state)
}

/// Bootstraps the store, then serves until a shutdown signal arrives.
///
/// # Errors
/// - `Db` when the store stays unreachable after every retry attempt.
/// - `Io` when the listener cannot bind or the server loop fails.
pub async fn start_server(config: Config) -> Result<(), ServerError> {
    info!(
        "event=server_start module=server status=start db_path={} port={}",
        config.db_path.display(),
        config.port
    );

    let db_path = config.db_path.clone();
    let retry = config.retry;
    tokio::task::spawn_blocking(move || open_db_with_retry(&db_path, &retry).map(drop))
        .await
        .map_err(|err| ServerError::Io(std::io::Error::other(err)))??;

    let app = build_router(AppState::new(config.db_path));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("event=server_start module=server status=ok address={address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("event=signal_install module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
        info!("event=shutdown module=server signal=ctrl_c");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=shutdown module=server signal=sigterm");
            }
            Err(err) => {
                log::error!(
                    "event=signal_install module=server status=error signal=sigterm error={err}"
                );
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
}
