//! Maps pipeline failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use renalyx_common::{ErrorKind, RenalyxError};

use crate::handlers::page::{escape, page};

/// A request-fatal failure. Rendered as an error page; never affects other requests.
#[derive(Debug)]
pub struct AppError(pub RenalyxError);

impl<E> From<E> for AppError
where
    E: Into<RenalyxError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Parse => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Inference => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Validation | ErrorKind::Render | ErrorKind::Config => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind());
        error!(kind = ?self.0.kind(), "Request failed: {}", self.0);
        let body = format!(
            r#"<div class="error">An error occurred: {}</div>
<p><a href="/">Back to the form</a></p>"#,
            escape(&self.0.to_string())
        );
        (status, Html(page("Error", &body))).into_response()
    }
}
