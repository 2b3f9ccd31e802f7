//! CoffeeBloom admin server
//!
//! # Overview
//!
//! HTTP backend for head office (`honbu`) and store staff:
//!
//! - **Auth** (`auth`): JWT sessions, route gating by role group
//! - **Identity** (`identity`): accounts, password hashing, reset links
//! - **Database** (`db`): SQLite via sqlx, one repository module per collection
//! - **Live** (`live`): per-collection change hub and SSE snapshot streams
//! - **HTTP API** (`api`): users, account actions, tasks, reports, employees, shifts
//!
//! # Layout
//!
//! ```text
//! bloom-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, middleware, Session extractor
//! ├── identity/      # IdentityProvider + SQLite implementation
//! ├── db/            # pool, migrations, repositories
//! ├── live/          # ChangeHub, SSE
//! ├── api/           # routers and handlers
//! └── utils/         # logger
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod identity;
pub mod live;
pub mod utils;

pub use auth::{JwtService, Session};
pub use core::{Config, Server, ServerState};
pub use shared::error::{AppError, AppResult};

/// Security event log under the `security` target
///
/// ```ignore
/// security_log!("WARN", "auth_failed", uid = uid.clone());
/// ```
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        )
    };
}
