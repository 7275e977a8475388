//! HTTP surface for the Plugstore storefront API.
//!
//! Request handling is share-nothing beyond `AppState`: the database pool and
//! SMTP transport are safely shared across concurrent requests, and all
//! mutation consistency is delegated to the database's row-level guarantees.
//! Concurrent updates to the same product id are deliberately not serialized;
//! see DESIGN.md.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{Method, header::AUTHORIZATION, header::CONTENT_TYPE};
use axum::routing::{get, post, put};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::auth::JwtManager;
use crate::mailer::Mailer;
use crate::storage::StoreDatabase;

pub mod admin;
pub mod email;
pub mod error;
pub mod middleware;
pub mod products;
pub mod seo;


pub use error::ApiError;

/// Shared state cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no connection string was configured; database-backed
    /// endpoints then answer 503 instead of crashing.
    pub db: Option<StoreDatabase>,
    pub jwt: Arc<JwtManager>,
    /// `None` when no SMTP host was configured.
    pub mailer: Option<Mailer>,
    /// Public site URL, no trailing slash; used by sitemap/robots output.
    pub site_url: String,
}

impl AppState {
    pub fn db(&self) -> Result<&StoreDatabase, ApiError> {
        self.db
            .as_ref()
            .ok_or(ApiError::Unavailable("database not configured"))
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/api/admin/products", post(admin::create_product))
        .route(
            "/api/admin/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_origin(Any)
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/products", get(products::list_products))
        .route("/api/products/{slug}", get(products::product_detail))
        .route("/api/admin/login", post(admin::login))
        .route("/api/email-logs", get(email::list_email_logs))
        .route("/api/send-trial-email", post(email::send_trial_email))
        .route("/sitemap.xml", get(seo::sitemap))
        .route("/robots.txt", get(seo::robots))
        .merge(gated)
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received terminate signal, shutting down"),
    }
}
