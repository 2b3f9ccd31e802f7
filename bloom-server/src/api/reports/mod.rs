//! Daily Report API
//!
//! | Path | Method | Roles |
//! |------|--------|-------|
//! | /api/reports/catalog | GET | any authenticated |
//! | /api/reports/preview | POST | store, manager |
//! | /api/reports | POST | store, manager |
//! | /api/reports/mine | GET | store, manager |
//! | /api/reports | GET | honbu |
//! | /api/reports/{id} | GET | honbu |
//! | /api/reports/{id} | DELETE | honbu or the submitter |
//! | /api/reports/rankings/waste | GET | honbu |
//! | /api/reports/rankings/products | GET | honbu |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};
use shared::RouteGroup;

use crate::api::gated;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/catalog", get(handler::catalog))
        .route(
            "/preview",
            gated(RouteGroup::StoreReports, post(handler::preview)),
        )
        .route(
            "/",
            gated(RouteGroup::HeadOffice, get(handler::list))
                .merge(gated(RouteGroup::StoreReports, post(handler::create))),
        )
        .route("/mine", gated(RouteGroup::StoreReports, get(handler::mine)))
        .route(
            "/rankings/waste",
            gated(RouteGroup::HeadOffice, get(handler::waste_ranking)),
        )
        .route(
            "/rankings/products",
            gated(RouteGroup::HeadOffice, get(handler::product_ranking)),
        )
        .route(
            "/{id}",
            gated(RouteGroup::HeadOffice, get(handler::get_by_id)).merge(delete(handler::delete)),
        )
}
