use axum::Json;
use serde_json::{Value, json};

/// Service descriptor served at the root path.
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "devis-pdf",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "GET /health",
            "generate": "POST /generate",
            "test": "POST /test",
        },
    }))
}
