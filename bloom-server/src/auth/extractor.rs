//! Session extractor
//!
//! Handlers take the caller's session as an argument instead of reading any
//! global state.

use axum::extract::FromRequestParts;
use http::request::Parts;
use shared::models::Profile;

use crate::AppError;
use crate::auth::middleware::authenticate;
use crate::core::ServerState;

/// Resolved profile of the authenticated caller
#[derive(Debug, Clone)]
pub struct Session(pub Profile);

impl Session {
    pub fn profile(&self) -> &Profile {
        &self.0
    }

    pub fn into_profile(self) -> Profile {
        self.0
    }

    pub fn uid(&self) -> &str {
        &self.0.uid
    }
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }

        // Route without the middleware: authenticate here and cache the result
        let session = authenticate(state, &parts.headers, &parts.uri).await?;
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}
