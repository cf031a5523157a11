//! HTTP interface.
//!
//! ## Routes
//!
//! - `GET  /health`
//! - `GET  /options?type=&parentCategory=`: taxonomy lookups
//! - `GET  /priority?category=&subCategory=`: priority preview
//! - `POST /complaints`: multipart submission
//! - `GET  /complaints?email=`: complaints, optionally by submitter
//! - `GET  /complaints/{id}`
//! - `GET  /complaints/by-tracking/{trackingId}`
//! - `PUT  /complaints/{id}/status`: staff status change

mod error;
mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;

use crate::config::PlaintsConfig;
use crate::error::Result;
use crate::intake::Intake;
use crate::storage::{ComplaintRepository, ComplaintStore, OptionRepository};
use crate::taxonomy::{OptionSource, TaxonomyResolver};

pub use error::{ApiError, ErrorResponse};

/// Largest request body accepted by the transport. Must stay above
/// [`crate::validation::MAX_ATTACHMENT_BYTES`].
pub const MAX_REQUEST_BYTES: usize = 10 * 1024 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<TaxonomyResolver>,
    pub intake: Intake,
    pub complaints: Arc<dyn ComplaintStore>,
    pub staff_token: Option<String>,
}

impl AppState {
    pub fn new(
        options: Arc<dyn OptionSource>,
        complaints: Arc<dyn ComplaintStore>,
        config: &PlaintsConfig,
    ) -> Self {
        let resolver = Arc::new(TaxonomyResolver::new(options));
        let intake = Intake::new(resolver.clone(), complaints.clone(), &config.store);
        Self {
            resolver,
            intake,
            complaints,
            staff_token: config
                .server
                .staff_token
                .clone()
                .filter(|t| !t.trim().is_empty()),
        }
    }

    /// State backed by the file store under `project_root`.
    pub fn from_config(config: &PlaintsConfig, project_root: &Path) -> Self {
        Self::new(
            Arc::new(OptionRepository::new(config, project_root)),
            Arc::new(ComplaintRepository::new(config, project_root)),
            config,
        )
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/options", get(routes::list_options))
        .route("/priority", get(routes::preview_priority))
        .route(
            "/complaints",
            get(routes::list_complaints).post(routes::submit_complaint),
        )
        .route(
            "/complaints/by-tracking/{tracking_id}",
            get(routes::get_by_tracking_id),
        )
        .route("/complaints/{id}", get(routes::get_complaint))
        .route("/complaints/{id}/status", put(routes::update_status))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Seeds an empty option store and corrects department codes. Failures are
/// logged; lookups then fall back to the built-in tables and submissions are
/// refused until the store is repaired.
pub fn prepare_option_store(options: &OptionRepository) {
    if let Err(e) = options.seed() {
        tracing::error!(
            path = %options.options_path().display(),
            error = %e,
            "Failed to seed taxonomy options"
        );
        return;
    }
    if let Err(e) = options.ensure_department_codes() {
        tracing::error!(error = %e, "Failed to update department codes");
    }
}

/// Seeds an empty option store, then serves the file store on `addr` until Ctrl-C.
pub async fn run_server(config: &PlaintsConfig, project_root: &Path, addr: &str) -> Result<()> {
    prepare_option_store(&OptionRepository::new(config, project_root));

    let app = build_router(AppState::from_config(config, project_root));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Complaint server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Complaint server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
