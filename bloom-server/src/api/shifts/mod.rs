//! Shift API (store-scoped)
//!
//! | Path | Method | Roles |
//! |------|--------|-------|
//! | /api/stores/{store}/shifts | GET | honbu, store-admin, manager, employee |
//! | /api/stores/{store}/shifts | POST | honbu, store-admin, manager |
//! | /api/stores/{store}/shifts/totals | GET | honbu, store-admin, manager, employee |
//! | /api/stores/{store}/shifts/stream | GET (SSE) | honbu, store-admin, manager, employee |
//! | /api/stores/{store}/shifts/{id} | DELETE | honbu, store-admin, manager |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};
use shared::RouteGroup;

use crate::api::gated;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores/{store}/shifts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            gated(RouteGroup::ShiftsRead, get(handler::list))
                .merge(gated(RouteGroup::ShiftsWrite, post(handler::create))),
        )
        .route("/totals", gated(RouteGroup::ShiftsRead, get(handler::totals)))
        .route("/stream", gated(RouteGroup::ShiftsRead, get(handler::stream)))
        .route("/{id}", gated(RouteGroup::ShiftsWrite, delete(handler::delete)))
}
