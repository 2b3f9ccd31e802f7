//! Authentication and authorization
//!
//! - [`JwtService`] issues and validates session tokens
//! - [`ProfileResolver`] maps the token identity to a profile
//! - [`require_auth`] / [`require_roles`] gate routes server-side
//! - [`Session`] hands the resolved profile to handlers

mod extractor;
pub mod jwt;
pub mod middleware;
mod resolver;

pub use extractor::Session;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_roles};
pub use resolver::ProfileResolver;
