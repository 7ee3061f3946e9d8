use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::errors::ErrorBody;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub const REMOVED_MESSAGE: &str = "success removing socks";

pub fn router() -> Router {
    Router::new()
        .route("/socks", get(get_socks))
        .route("/socks/income", post(add_socks))
        .route("/socks/outcome", post(remove_socks))
}

#[utoipa::path(
    post,
    path = "/api/socks/income",
    tag = "socks",
    request_body = dto::SocksRequest,
    responses(
        (status = 200, description = "Pairs added to stock"),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn add_socks(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::SocksRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let line = match body.validate() {
        Ok(l) => l,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .add_stock(line.color, line.cotton_part, line.quantity)
        .await
    {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/socks/outcome",
    tag = "socks",
    request_body = dto::SocksRequest,
    responses(
        (status = 200, description = "Pairs removed from stock", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid body or not enough stock", body = ErrorBody),
        (status = 404, description = "No record for this color and cotton part", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn remove_socks(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::SocksRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let line = match body.validate() {
        Ok(l) => l,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .remove_stock(line.color, line.cotton_part, line.quantity)
        .await
    {
        Ok(_) => (StatusCode::OK, REMOVED_MESSAGE).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/socks",
    tag = "socks",
    params(dto::SocksQuery),
    responses(
        (status = 200, description = "Total pairs matching the query", body = u64),
        (status = 400, description = "Invalid query parameters", body = ErrorBody),
        (status = 404, description = "Nothing matched", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn get_socks(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::SocksQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let query = match query.validate() {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .query_quantity(&query.color, query.comparison, query.cotton_part)
        .await
    {
        Ok(total) => (StatusCode::OK, Json(total)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
