use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;

#[derive(Debug, Serialize)]
pub struct ResponseMessage {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Response body could not be serialized.
    #[error("{0}")]
    Encoding(#[from] serde_json::Error),
    #[error("application state is not configured")]
    MissingState,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Encoding(_) | ApiError::MissingState => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(_) | ApiError::Auth(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        warn!("Error occurred: {}", self);

        let status = self.status_code();
        match self {
            // Plain text, unlike every other error body.
            ApiError::Encoding(_) | ApiError::MissingState => HttpResponse::build(status)
                .content_type(ContentType::plaintext())
                .body(self.to_string()),
            _ => HttpResponse::build(status).json(ResponseMessage {
                message: self.to_string(),
            }),
        }
    }
}
