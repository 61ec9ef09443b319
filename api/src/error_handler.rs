use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use complaint_store::StoreError;
use serde::Serialize;
use similarity_engine::SimilarityError;
use thiserror::Error;

use crate::core::app_state::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::MissingEnv(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingEnv(_) => "MISSING_ENV",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound => "NOT_FOUND",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Map `StoreError` to `AppError::Http` with precise HTTP status & code.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::Http {
                status: StatusCode::NOT_FOUND,
                code: "COMPLAINT_NOT_FOUND",
                message: format!("Complaint not found: {id}"),
            },
            StoreError::Forbidden(msg) => AppError::Http {
                status: StatusCode::FORBIDDEN,
                code: "FORBIDDEN",
                message: msg,
            },
            StoreError::Conflict(msg) => AppError::Http {
                status: StatusCode::CONFLICT,
                code: "CONFLICT",
                message: msg,
            },
            StoreError::Backend(msg) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "STORE_BACKEND_ERROR",
                message: format!("Store backend failure: {msg}"),
            },
        }
    }
}

/// Map `SimilarityError` to `AppError::Http`. Used on the read paths; the
/// submission path degrades detection failures instead (see submit route).
impl From<SimilarityError> for AppError {
    fn from(err: SimilarityError) -> Self {
        match err {
            SimilarityError::InvalidGeometry {
                latitude,
                longitude,
            } => AppError::Http {
                status: StatusCode::BAD_REQUEST,
                code: "INVALID_GEOMETRY",
                message: format!("Coordinates out of range: lat={latitude}, lng={longitude}"),
            },
            SimilarityError::IndexQueryFailed(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "INDEX_QUERY_FAILED",
                message: format!("Proximity query failed: {e}"),
            },
            SimilarityError::LinkUpdateFailed(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "LINK_UPDATE_FAILED",
                message: format!("Link update failed: {e}"),
            },
            SimilarityError::Config(msg) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "CONFIG_ERROR",
                message: msg,
            },
        }
    }
}
