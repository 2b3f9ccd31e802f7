//! HTTP API
//!
//! One module per resource, each exposing `router()`:
//!
//! | Module | Prefix | Auth |
//! |--------|--------|------|
//! | health | /health | public |
//! | auth | /api/auth | public |
//! | me | /api/me, /api/access | session |
//! | users | /users | session + honbu |
//! | account_actions | /deleteUser, /setUserDisabled, /resetPassword | session + honbu |
//! | tasks | /api/tasks | session |
//! | reports | /api/reports | session, per route group |
//! | employees | /api/stores/{store}/employees | session + store scope |
//! | shifts | /api/stores/{store}/shifts | session + store scope |

pub mod account_actions;
pub mod auth;
pub mod employees;
pub mod health;
pub mod me;
pub mod reports;
pub mod shifts;
pub mod tasks;
pub mod users;

use axum::Router;
use axum::middleware;
use axum::routing::MethodRouter;
use http::{HeaderName, HeaderValue};
use shared::RouteGroup;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::{require_auth, require_roles};
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Gate a single method route on a role group
pub(crate) fn gated(
    group: RouteGroup,
    route: MethodRouter<ServerState>,
) -> MethodRouter<ServerState> {
    route.route_layer(middleware::from_fn(require_roles(group)))
}

/// Routes that need a session
fn protected_router() -> Router<ServerState> {
    Router::new()
        .merge(me::router())
        .merge(users::router())
        .merge(account_actions::router())
        .merge(tasks::router())
        .merge(reports::router())
        .merge(employees::router())
        .merge(shifts::router())
}

/// Routes reachable without a token
fn public_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
}

fn cors_layer(allow_origin: &str) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allow_origin == "*" {
        return base.allow_origin(Any);
    }
    match HeaderValue::from_str(allow_origin) {
        Ok(origin) => base.allow_origin(origin),
        Err(_) => {
            tracing::warn!(allow_origin, "Invalid CORS origin, allowing any origin");
            base.allow_origin(Any)
        }
    }
}

/// Build the full application with middleware and state
///
/// Used by the HTTP server and by in-process tests.
pub fn build_app(state: &ServerState) -> Router {
    let protected = protected_router().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_auth,
    ));

    public_router()
        .merge(protected)
        .layer(cors_layer(&state.config.cors_allow_origin))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state.clone())
}
