use std::env;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod routes;
mod state;

use devis_core::config::DerivationConfig;
use devis_export::pdf::PdfRenderer;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let template_path = env::var("TEMPLATE_PATH").unwrap_or_else(|_| "template.html".to_string());

    // The template never changes at runtime; load once and share.
    let template = devis_export::template::load_template(Path::new(&template_path))?;

    let state = AppState {
        template: Arc::from(template),
        config: Arc::new(DerivationConfig::default()),
        renderer: PdfRenderer::from_env(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(routes::info::service_info))
        .route("/health", get(routes::health::health_check))
        .route("/test", post(routes::test::test_pdf))
        .route("/generate", post(routes::generate::generate))
        .layer(axum_mw::from_fn(middleware::log::request_log))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, template = %template_path, "devis-pdf service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
