//! Authentication API (public)
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/auth/register | POST | create account + profile, returns a session token |
//! | /api/auth/login | POST | email + password, returns a session token |
//! | /api/auth/reset | POST | consume a password-reset link token |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::LoginResponse;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/reset", post(handler::reset))
}
