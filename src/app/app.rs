use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request},
    response::{IntoResponse, Response},
    Router,
};
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info, info_span, warn, Span};

use crate::app::seed::seed_dishes;
use crate::config::{AppConfig, ConfigError, JwtConfig, MongoConfig};
use crate::middlewares::auth_middleware::AuthState;
use crate::repository::connect_database;
use crate::repository::dish_repo::MongoDishRepository;
use crate::repository::repository_error::RepositoryError;
use crate::repository::user_repo::MongoUserRepository;
use crate::router::api_router;
use crate::service::dish_service::DishServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::error::HandlerError;
use crate::util::jwt::JwtTokenUtilsImpl;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Startup error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct App {
    config: AppConfig,
    router: Router,
}

/// Full HTTP surface: API routes plus the outer tower layers.
pub fn build_router(
    dish_service: Arc<DishServiceImpl>,
    user_service: Arc<UserServiceImpl>,
    auth_state: Arc<AuthState>,
) -> Router {
    with_layers(api_router(dish_service, user_service, auth_state))
}

/// Request tracing and panic recovery. A panicking handler answers with the
/// usual JSON error body.
pub fn with_layers(router: Router) -> Router {
    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());
                    info_span!("http_request", method = %request.method(), path = %matched_path)
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            error!(status, latency_ms = %latency.as_millis(), "request failed with server error");
                        } else {
                            info!(status, latency_ms = %latency.as_millis(), "request completed");
                        }
                    },
                ),
        )
        .layer(CatchPanicLayer::custom(panic_response))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Handler panicked: {}", detail);
    HandlerError::internal("Internal server error").into_response()
}

impl App {
    pub async fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;

        let db = connect_database(&mongo_config).await?;

        let dish_repo = Arc::new(MongoDishRepository::new(&db, &mongo_config.dish_collection));
        let user_repo = Arc::new(MongoUserRepository::new(&db, &mongo_config.user_collection));
        user_repo.ensure_indexes().await?;

        if config.seed_database {
            seed_dishes(dish_repo.as_ref()).await?;
        }

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let dish_service = Arc::new(DishServiceImpl::new(dish_repo));
        let user_service = Arc::new(UserServiceImpl::new(user_repo, jwt_utils.clone()));
        let auth_state = Arc::new(AuthState {
            jwt_utils,
            auth_required: config.auth_required,
        });

        let router = build_router(dish_service, user_service, auth_state);
        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), AppError> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Server running at http://{}", addr);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
