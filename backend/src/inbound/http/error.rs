//! HTTP adapter mapping for domain errors.
//!
//! Every failure leaves the service as `{"message": "..."}`. Internal
//! failures are logged with their detail and redacted before they reach the
//! client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned in place of internal error detail.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "A customer with this email already exists")]
    pub message: String,
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for(error: &Error) -> ErrorBody {
    let message = if status_for(error.code()).is_server_error() {
        REDACTED_MESSAGE.to_owned()
    } else {
        error.message().to_owned()
    };
    ErrorBody { message }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            let trace_id = TraceId::current().map(|id| id.to_string());
            error!(
                trace_id = trace_id.as_deref(),
                code = ?self.code(),
                detail = self.message(),
                "request failed with internal error"
            );
        }
        HttpResponse::build(status).json(body_for(self))
    }
}
