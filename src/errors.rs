use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub type DieselError = diesel::result::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Database(#[from] DieselError),
    #[error("No SQL query provided")]
    EmptyQuery,
    #[error("unknown table '{0}'")]
    UnknownTable(String),
    #[error("the raw query console is disabled")]
    RawQueriesDisabled,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!("request failed: {self}");
        // Every failure renders as an inline string; the kinds stay distinct
        // up to this boundary so status codes can diverge later.
        (StatusCode::OK, format!("Error: {self}")).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_message_is_fixed() {
        assert_eq!(AppError::EmptyQuery.to_string(), "No SQL query provided");
    }

    #[test]
    fn unknown_table_names_the_table() {
        assert_eq!(
            AppError::UnknownTable("doctors2".to_string()).to_string(),
            "unknown table 'doctors2'"
        );
    }

    #[tokio::test]
    async fn renders_as_inline_error_text_with_200() {
        let response = AppError::EmptyQuery.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), b"Error: No SQL query provided");
    }
}
