//! Shared types for CoffeeBloom
//!
//! Domain models, the unified error system and the pure domain logic
//! (access policy, profile normalization, report aggregation, rankings,
//! task board). Nothing in this crate performs I/O.

pub mod access;
pub mod board;
pub mod directory;
pub mod error;
pub mod models;
pub mod report;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use access::{AccessDecision, RouteGroup, SessionState, can_access, evaluate};
pub use board::{TaskBoard, TaskStats};
pub use error::{AppError, AppResult, ErrorCode, ErrorKind};
pub use report::ReportPolicy;
