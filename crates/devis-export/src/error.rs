use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("renderer launch failed: {0}")]
    RendererLaunch(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
