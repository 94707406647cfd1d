use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use demesne_core::dto::ErrorBody;
use log::error;
use thiserror::Error;

/// Failure to produce a catalog listing.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("API responded with status: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Invalid API response format: missing or invalid results array")]
    InvalidListFormat,

    #[error("Request to the D&D 5e API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected payload from the D&D 5e API: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch {resource}")]
    Fetch {
        resource: &'static str,
        #[source]
        source: CatalogError,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Fetch { resource, source } => {
                error!("Error fetching {resource}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new(format!("Failed to fetch {resource}"))),
                )
                    .into_response()
            }
        }
    }
}
