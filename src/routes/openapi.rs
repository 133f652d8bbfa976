//! OpenAPI document for the car API, served at `/openapi.json`.

use crate::handlers::cars;
use crate::model::{Car, CarList, CarPatch, NewCar};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fast Car API",
        description = "Uma API rápida para gerenciar carros",
        version = "1.0.0"
    ),
    paths(
        cars::create,
        cars::list,
        cars::read,
        cars::update,
        cars::patch,
        cars::delete
    ),
    components(schemas(Car, NewCar, CarPatch, CarList)),
    tags((name = "Cars", description = "Car records"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn openapi_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}
