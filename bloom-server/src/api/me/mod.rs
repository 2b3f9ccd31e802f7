//! Session API (any authenticated caller)
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/me | GET | resolved profile |
//! | /api/me/settings | PUT | own store / notification settings |
//! | /api/access?roles=a,b | GET | policy decision for UI gating |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/me", get(handler::me))
        .route("/api/me/settings", put(handler::update_settings))
        .route("/api/access", get(handler::access))
}
