//! Router assembly: status routes, car routes, OpenAPI document and HTTP layers.

mod cars;
mod openapi;
mod status;

pub use cars::{car_routes, CARS_PATH};
pub use openapi::{openapi_routes, ApiDoc};
pub use status::status_routes;

use crate::config::AppConfig;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application router as served by the binary.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(status_routes(state.clone()))
        .merge(car_routes(state))
        .merge(openapi_routes())
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
