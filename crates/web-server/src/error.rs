// In crates/web-server/src/error.rs

use crate::types::{ErrorBody, ErrorResponse};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use platform::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Platform(#[from] platform::Error),

    #[error("No procedure named '{0}'")]
    UnknownProcedure(String),

    #[error("'{0}' is a mutation and must be called with POST")]
    MutationOverGet(String),

    #[error("Input is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Failed to bind server address: {0}")]
    ServerBindError(std::io::Error),

    #[error("Server stopped unexpectedly: {0}")]
    Serve(std::io::Error),
}

impl Error {
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Platform(err) => err.code(),
            Error::UnknownProcedure(_) => ErrorCode::NotFound,
            Error::MutationOverGet(_) | Error::InvalidJson(_) => ErrorCode::BadRequest,
            Error::ServerBindError(_) | Error::Serve(_) => ErrorCode::InternalServerError,
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(error = %self, "Procedure failed");
        } else {
            tracing::debug!(error = %self, ?code, "Procedure rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
