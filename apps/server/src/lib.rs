// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Processor Server - storage backend for the IFC viewer.
//!
//! Accepts IFC uploads, keeps them on local disk under generated unique
//! names, and lists and serves them back.
//!
//! # Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/v1/health` - Health check
//! - `POST /api/ifc/upload` - Upload an IFC file (multipart)
//! - `GET /api/ifc/files` - List stored files, newest first
//! - `GET /api/ifc/download/:file_name` - Download a stored file

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::ApiError;
use services::FileStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FileStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Open the upload directory named in `config`.
    pub async fn new(config: Config) -> Result<Self, ApiError> {
        let store = FileStore::open(&config.upload_dir).await?;
        Ok(Self {
            store: Arc::new(store),
            config: Arc::new(config),
        })
    }
}

/// Build the application router with its middleware stack.
pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let ifc_routes = Router::new()
        .route("/upload", post(routes::files::upload))
        .route("/files", get(routes::files::list))
        .route("/download/:file_name", get(routes::files::download));

    Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // File storage endpoints
        .nest("/api/ifc", ifc_routes)
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_file_size_bytes()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
