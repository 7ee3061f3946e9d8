use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use utoipa::ToSchema;

use socks_core::DomainError;
use socks_infra::ServiceError;

pub const NOT_FOUND_MESSAGE: &str = "No socks were found with given parameters";

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable code, e.g. `validation_error` or `not_found`.
    pub error: &'static str,
    pub message: String,
}

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "stock store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal server error",
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => validation_error(msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", NOT_FOUND_MESSAGE),
        e @ DomainError::InsufficientStock { .. } => {
            json_error(StatusCode::BAD_REQUEST, "insufficient_stock", e.to_string())
        }
    }
}

pub fn validation_error(detail: impl core::fmt::Display) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "validation_error",
        format!("not valid due to validation error: {detail}"),
    )
}

// axum answers some body errors with 415/422; this API reports every malformed body as 400.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    validation_error(rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    validation_error(rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(ErrorBody {
            error: code,
            message: message.into(),
        }),
    )
        .into_response()
}
