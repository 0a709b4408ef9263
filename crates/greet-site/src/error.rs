//! Site Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::csrf::CsrfError;

/// Errors a handler surfaces as an HTTP error response.
///
/// Validation failures are not here: they re-render the form with inline
/// messages and a 200 status.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error(transparent)]
    Csrf(#[from] CsrfError),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        match self {
            Self::Csrf(err) => {
                tracing::warn!("rejected submission: {err}");
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
        }
    }
}
