use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::response::Response;

use devis_core::derive::derive;
use devis_core::format::slugify;
use devis_core::models::quote::QuoteInput;
use devis_export::assemble::assemble;

use crate::error::ApiError;
use crate::routes::pdf_response;
use crate::state::AppState;

/// Generate the installation-guide PDF for a posted quote.
///
/// Derivation and assembly never fail; the only request failure modes are
/// insufficient input and a renderer error.
pub async fn generate(
    State(state): State<AppState>,
    Json(quote): Json<QuoteInput>,
) -> Result<Response, ApiError> {
    if quote.client.is_none() && quote.terrain.is_none() {
        return Err(ApiError::BadRequest(
            "insufficient quote data: client or terrain required".to_string(),
        ));
    }

    let started = Instant::now();
    let (fields, flags) = derive(&quote, &state.config);
    let markup = assemble(&state.template, &fields, &flags);

    let full_name = fields.get("NOM_COMPLET").unwrap_or("client").to_string();

    // The renderer blocks on a child process; keep it off the async runtime.
    let renderer = state.renderer.clone();
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&markup))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    tracing::info!(
        client = %full_name,
        bytes = pdf.len(),
        duration_ms = started.elapsed().as_millis() as u64,
        "quote pdf generated"
    );

    let filename = format!("guide-pose-{}.pdf", slugify(&full_name));
    pdf_response(&filename, pdf)
}
