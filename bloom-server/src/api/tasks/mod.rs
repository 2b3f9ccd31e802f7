//! Task API
//!
//! | Path | Method | Roles |
//! |------|--------|-------|
//! | /api/tasks | GET, POST | any authenticated |
//! | /api/tasks/board | GET | any authenticated |
//! | /api/tasks/stream | GET (SSE) | any authenticated |
//! | /api/tasks/stats | GET | honbu |
//! | /api/tasks/{id} | PUT, DELETE | any authenticated |
//! | /api/tasks/{id}/column | PATCH | any authenticated |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, put},
};
use shared::RouteGroup;

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tasks", routes())
}

fn routes() -> Router<ServerState> {
    let board_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/board", get(handler::board))
        .route("/stream", get(handler::stream))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/column", patch(handler::move_column));

    let head_office_routes = Router::new()
        .route("/stats", get(handler::stats))
        .route_layer(middleware::from_fn(require_roles(RouteGroup::HeadOffice)));

    board_routes.merge(head_office_routes)
}
