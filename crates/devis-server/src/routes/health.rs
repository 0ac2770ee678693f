use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "devis-pdf",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: jiff::Timestamp::now().to_string(),
    })
}
