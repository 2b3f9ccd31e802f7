//! User management API (head office only)
//!
//! Works on profile records only; login accounts are handled by the
//! account actions (`/deleteUser`, `/setUserDisabled`, `/resetPassword`).
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /users | GET | search / filter / sort / page profiles |
//! | /users | POST | create the profile of an existing account |
//! | /users/{uid} | PUT | update email, roles, store, region |
//! | /users/{uid} | DELETE | delete the profile record |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};
use shared::RouteGroup;

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/users", get(handler::list).post(handler::create))
        .route("/users/{uid}", put(handler::update).delete(handler::delete))
        .route_layer(middleware::from_fn(require_roles(RouteGroup::HeadOffice)))
}
