use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Body of every failed API call: the message the dashboard shows in its
/// error banner, plus a stable code so callers can branch on the failure
/// kind without parsing the text.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Display text, e.g. "Location not found"
    pub error: String,
    /// Stable identifier, e.g. "LOCATION_NOT_FOUND"
    pub code: &'static str,
}

/// Failures that surface over HTTP. Each error enum maps its variants to a
/// status and a code here; the banner text is the variant's `Display` output.
pub trait HttpError: std::error::Error {
    fn status_code(&self) -> StatusCode;

    fn error_code(&self) -> &'static str;
}

/// Log the failure and turn it into the standard error body
pub fn into_response<E: HttpError>(err: E) -> Response {
    let status = err.status_code();
    let code = err.error_code();
    let error = err.to_string();

    tracing::error!(error = %error, status = %status, code = %code, "Request failed");

    (status, Json(ErrorResponse { error, code })).into_response()
}

#[macro_export]
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                $crate::error::into_response(self)
            }
        }
    };
}
