use std::io;
use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Custom error types for the wiki application
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Template(String),
    #[error("{0}")]
    Body(#[from] BytesRejection),
    #[error("{0}")]
    Multipart(#[from] MultipartRejection),
    #[error("{0}")]
    MultipartField(#[from] MultipartError),
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::NotFound => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
            // Raw error text goes back to the client as-is.
            WikiError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
            WikiError::Template(e) => (StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
            WikiError::Body(rejection) => rejection.into_response(),
            WikiError::Multipart(rejection) => rejection.into_response(),
            WikiError::MultipartField(e) => e.into_response(),
        }
    }
}
