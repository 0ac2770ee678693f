use std::sync::Arc;

use devis_core::config::DerivationConfig;
use devis_export::pdf::PdfRenderer;

/// Shared application state, injected into route handlers via Axum state.
///
/// Everything here is immutable after startup; requests share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    /// Document template, loaded once at startup.
    pub template: Arc<str>,
    pub config: Arc<DerivationConfig>,
    pub renderer: PdfRenderer,
}
