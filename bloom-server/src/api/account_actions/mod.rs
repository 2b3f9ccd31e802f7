//! Account actions (head office only)
//!
//! Operate on login accounts in the identity provider. Profile records are
//! not touched; `DELETE /users/{uid}` removes those.
//!
//! | Path | Method | Body | Response |
//! |------|--------|------|----------|
//! | /deleteUser | POST | `{uid}` | `{message}` |
//! | /setUserDisabled | POST | `{uid, disabled}` | `{message}` |
//! | /resetPassword | POST | `{email}` | `{message, link}` |

mod handler;

use axum::{Router, middleware, routing::post};
use shared::RouteGroup;

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/deleteUser", post(handler::delete_user))
        .route("/setUserDisabled", post(handler::set_user_disabled))
        .route("/resetPassword", post(handler::reset_password))
        .route_layer(middleware::from_fn(require_roles(RouteGroup::HeadOffice)))
}
