//! API routes for the safepath server.

pub mod hazards;
mod routes;
pub mod routing;

use axum::Router;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}
