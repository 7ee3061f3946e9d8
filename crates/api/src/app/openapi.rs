//! OpenAPI document for the `/api` surface, served at `GET /api/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

use crate::app::routes::socks;
use crate::app::{dto, errors};

#[derive(OpenApi)]
#[openapi(
    info(title = "Socks inventory API"),
    paths(socks::get_socks, socks::add_socks, socks::remove_socks),
    components(schemas(dto::SocksRequest, errors::ErrorBody)),
    tags((name = "socks", description = "Stock of sock pairs by color and cotton part"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
