use axum::extract::State;
use axum::response::Response;

use crate::error::ApiError;
use crate::routes::pdf_response;
use crate::state::AppState;

/// Minimal built-in page for exercising the renderer.
const TEST_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Test devis-pdf</title></head>
<body style="font-family:Arial;text-align:center;padding:50px;">
    <h1 style="color:#4f934f;">devis-pdf</h1>
    <p>Le service fonctionne correctement.</p>
</body>
</html>"#;

/// Smoke test for the Chromium collaborator: render the built-in page.
pub async fn test_pdf(State(state): State<AppState>) -> Result<Response, ApiError> {
    let renderer = state.renderer.clone();
    let pdf = tokio::task::spawn_blocking(move || renderer.render(TEST_PAGE))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    pdf_response("devis-test.pdf", pdf)
}
