use eyesfood_api::Error as ApiError;

/// API error on its way to the client
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] ApiError);

impl Error {
    pub fn permission_denied() -> Error {
        Error(ApiError::PermissionDenied)
    }
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let err = self.0;
        tracing::info!("returning error to client: {err}");
        (
            err.status_code(),
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            err.contents(),
        )
            .into_response()
    }
}
