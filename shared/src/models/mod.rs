//! Data models
//!
//! Shared between bloom-server and the admin frontend (via API).
//! Flat DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Resource IDs are snowflake `i64`; identity uids are strings.

pub mod account;
pub mod daily_report;
pub mod employee;
pub mod profile;
pub mod shift;
pub mod task;

// Re-exports
pub use account::*;
pub use daily_report::*;
pub use employee::*;
pub use profile::{
    Identity, Profile, ProfileUpsert, SettingsUpdate, StoredProfile, normalize_roles,
    resolve_profile, roles,
};
pub use shift::*;
pub use task::*;
