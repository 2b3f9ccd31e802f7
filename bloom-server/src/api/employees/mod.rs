//! Employee API (store-scoped)
//!
//! | Path | Method | Roles |
//! |------|--------|-------|
//! | /api/stores/{store}/employees | GET, POST | honbu, store-admin, manager |
//! | /api/stores/{store}/employees/{id} | DELETE | honbu, store-admin, manager |
//! | /api/stores/{store}/employees/stream | GET (SSE) | honbu, store-admin, manager |
//!
//! Non-head-office callers only reach their own store.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get},
};
use shared::RouteGroup;

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores/{store}/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/stream", get(handler::stream))
        .route("/{id}", delete(handler::delete))
        .route_layer(middleware::from_fn(require_roles(RouteGroup::Employees)))
}
