use api_types::error::{ErrorCode, ErrorResponse};
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{router, run_with_listener, spawn_with_listener};

mod cors;
mod expenses;
mod server;

pub enum ServerError {
    Engine(EngineError),
    /// The request body could not be decoded into the expected shape.
    InvalidBody(String),
}

fn status_for_engine_error(err: &EngineError) -> (StatusCode, ErrorCode) {
    match err {
        EngineError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
        EngineError::Seed(_) | EngineError::Database(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::StorageError)
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Seed(seed_err) => {
            tracing::error!("seed error: {seed_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, error) = match self {
            ServerError::Engine(err) => {
                let (status, code) = status_for_engine_error(&err);
                (status, code, message_for_engine_error(err))
            }
            ServerError::InvalidBody(err) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, err)
            }
        };

        (status, Json(ErrorResponse { error, code })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
