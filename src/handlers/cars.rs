//! Car CRUD handlers: create, list, read, replace, patch, delete.

use crate::error::{AppError, ValidationError};
use crate::model::{Car, CarId, CarList, CarPatch, NewCar};
use crate::response::{created, no_content, ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<CarId, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {id_str}")))
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    let Json(value) = body?;
    Ok(value)
}

fn query_int(params: &HashMap<String, String>, key: &'static str) -> Result<Option<i64>, AppError> {
    params
        .get(key)
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| AppError::from(ValidationError::single(key, "must be an integer")))
        })
        .transpose()
}

#[utoipa::path(
    post,
    path = "/api/v1/cars",
    tag = "Cars",
    request_body = NewCar,
    responses(
        (status = 201, description = "Car created", body = Car),
        (status = 422, description = "Missing or malformed field"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body)?;
    let car = state.cars.create_car(&body).await?;
    Ok(created(car))
}

#[utoipa::path(
    get,
    path = "/api/v1/cars",
    tag = "Cars",
    params(
        ("offset" = Option<i64>, Query, description = "Rows to skip (default 0)"),
        ("limit" = Option<i64>, Query, description = "Maximum rows (default 100, max 1000)"),
    ),
    responses(
        (status = 200, description = "Cars in id order", body = CarList),
        (status = 422, description = "Negative or non-integer offset/limit"),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let offset = query_int(&params, "offset")?;
    let limit = query_int(&params, "limit")?;
    let cars = state.cars.list_cars(offset, limit).await?;
    Ok(ok(cars))
}

#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car id")),
    responses(
        (status = 200, description = "The car", body = Car),
        (status = 404, description = "No car with this id"),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let car = state.cars.get_car(id).await?;
    Ok(ok(car))
}

/// Full replacement. Answers 201 like the create route.
#[utoipa::path(
    put,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car id")),
    request_body = NewCar,
    responses(
        (status = 201, description = "Car replaced", body = Car),
        (status = 404, description = "No car with this id"),
        (status = 422, description = "Missing or malformed field"),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = json_body(body)?;
    let car = state.cars.update_car(id, &body).await?;
    Ok(created(car))
}

#[utoipa::path(
    patch,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car id")),
    request_body = CarPatch,
    responses(
        (status = 200, description = "Car after merging the supplied fields", body = Car),
        (status = 404, description = "No car with this id"),
        (status = 422, description = "Malformed field"),
    )
)]
pub async fn patch(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = json_body(body)?;
    let car = state.cars.patch_car(id, &body).await?;
    Ok(ok(car))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car id")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 404, description = "No car with this id"),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.cars.delete_car(id).await?;
    Ok(no_content())
}
