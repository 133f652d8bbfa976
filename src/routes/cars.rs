//! Car resource routes under `/api/v1/cars`. The collection answers with and without a
//! trailing slash.

use crate::handlers::cars::{create, delete as delete_handler, list, patch, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub const CARS_PATH: &str = "/api/v1/cars";

pub fn car_routes(state: AppState) -> Router {
    Router::new()
        .route(CARS_PATH, get(list).post(create))
        .route("/api/v1/cars/", get(list).post(create))
        .route(
            "/api/v1/cars/:id",
            get(read).put(update).patch(patch).delete(delete_handler),
        )
        .with_state(state)
}
