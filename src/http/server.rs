//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, metrics, access gate, limits)
//! - Bind server to listener
//! - Graceful shutdown and snapshot persistence

use axum::{
    body::Body,
    http::Request,
    middleware,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::{self, API_PREFIX};
use crate::config::{ApiConfig, NoticeConfig};
use crate::http::middleware::{local_access_middleware, LocalAccessState};
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::response::ApiError;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::security::access_control::AccessGate;
use crate::security::auth::BearerAuth;
use crate::storage::{DbManager, MemoryStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: DbManager,
    pub notices: NoticeConfig,
}

/// HTTP server for the feed API.
pub struct HttpServer {
    router: Router,
    config: ApiConfig,
    store: MemoryStore,
}

impl HttpServer {
    /// Create a new HTTP server over the given store.
    pub fn new(config: ApiConfig, store: MemoryStore) -> Self {
        let state = AppState {
            db: DbManager::new(Arc::new(store.clone()), config.storage.notice_db()),
            notices: config.notices.clone(),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            store,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Outermost first: request ID, trace span, metrics, access gate,
    /// timeout, body limit, then the API routes with bearer auth.
    #[allow(deprecated)]
    pub fn build_router(config: &ApiConfig, state: AppState) -> Router {
        let auth = Arc::new(BearerAuth::new(&config.auth.api_key));
        let access = LocalAccessState {
            gate: Arc::new(AccessGate::from_config(&config.access)),
            enabled: config.access.enabled,
        };

        Router::new()
            .nest(API_PREFIX, api::router(state, auth))
            .fallback(not_found)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn_with_state(access, local_access_middleware))
            .layer(middleware::from_fn(metrics::track_metrics))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// Run the server until Ctrl+C / SIGTERM or a shutdown broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            notice_db = %self.config.storage.notice_db(),
            access_gate = self.config.access.enabled,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown requested");
                    }
                }
            })
            .await?;

        if let Err(e) = self.store.save_to_file() {
            tracing::error!(error = %e, "Failed to save storage snapshot");
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
