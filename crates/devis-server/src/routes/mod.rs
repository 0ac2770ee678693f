use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::Response;

use crate::error::ApiError;

pub mod generate;
pub mod health;
pub mod info;
pub mod test;

/// Build an `application/pdf` attachment response.
pub(crate) fn pdf_response(filename: &str, bytes: Vec<u8>) -> Result<Response, ApiError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(bytes))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
