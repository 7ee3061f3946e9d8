use axum::Router;

pub mod socks;
pub mod system;

/// Router for the `/api` surface.
pub fn router() -> Router {
    Router::new().nest("/api", socks::router())
}
