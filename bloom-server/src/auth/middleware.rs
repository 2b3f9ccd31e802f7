//! Authentication middleware
//!
//! [`require_auth`] turns a bearer token into a [`Session`]; [`require_roles`]
//! gates a route on the session's roles.

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::access::{RouteGroup, can_access, route_roles};
use shared::ErrorCode;
use shared::models::Identity;

use crate::AppError;
use crate::auth::{JwtError, JwtService, Session};
use crate::core::ServerState;
use crate::security_log;

/// Authentication middleware
///
/// Validates `Authorization: Bearer <token>`, resolves the profile and inserts
/// the [`Session`] into the request extensions.
///
/// | Failure | Response |
/// |---------|----------|
/// | no header | 401 NotAuthenticated |
/// | expired token | 401 TokenExpired |
/// | bad token | 401 TokenInvalid |
/// | account deleted | 401 NotAuthenticated |
/// | account disabled | 401 AccountDisabled |
/// | profile lookup failed | 401 NotAuthenticated |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let session = authenticate(&state, req.headers(), req.uri()).await?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

/// Token -> identity -> profile. Shared by the middleware and the extractor.
pub(crate) async fn authenticate(
    state: &ServerState,
    headers: &http::HeaderMap,
    uri: &http::Uri,
) -> Result<Session, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = uri.to_string());
            return Err(AppError::unauthorized());
        }
    };

    let claims = match state.get_jwt_service().validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = uri.to_string()
            );
            return Err(match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    let identity = Identity::from(claims);

    // Tokens outlive account changes; disabling or deleting takes effect here
    let account = state.identity.find_by_uid(&identity.uid).await.map_err(|e| {
        security_log!(
            "WARN",
            "account_lookup_failed",
            uid = identity.uid.clone(),
            error = e.message.clone()
        );
        AppError::unauthorized()
    })?;
    match account {
        None => {
            security_log!("WARN", "account_missing", uid = identity.uid.clone());
            return Err(AppError::unauthorized());
        }
        Some(account) if account.disabled => {
            security_log!("WARN", "account_disabled", uid = identity.uid.clone());
            return Err(AppError::new(ErrorCode::AccountDisabled));
        }
        Some(_) => {}
    }

    match state.profiles.resolve(&identity).await {
        Ok(profile) => Ok(Session(profile)),
        Err(e) => {
            security_log!(
                "WARN",
                "profile_lookup_failed",
                uid = identity.uid.clone(),
                error = e.message.clone()
            );
            Err(AppError::unauthorized())
        }
    }
}

/// Role gate for a route group
///
/// Expects [`require_auth`] to have run. Passes when the session holds at
/// least one role of the group; an empty group passes any session.
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/users", get(handler::list))
///     .route_layer(middleware::from_fn(require_roles(RouteGroup::HeadOffice)));
/// ```
pub fn require_roles(
    group: RouteGroup,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let session = req
                .extensions()
                .get::<Session>()
                .ok_or_else(AppError::unauthorized)?;

            let required = route_roles(group);
            if !can_access(session.profile(), required) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    uid = session.uid().to_string(),
                    group = format!("{group:?}"),
                    uri = req.uri().to_string()
                );
                return Err(AppError::permission_denied(format!(
                    "Requires one of: {}",
                    required.join(", ")
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
