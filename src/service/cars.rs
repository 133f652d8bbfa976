//! Car resource service: validation, repository calls and not-found policy per operation.

use crate::error::{AppError, ValidationError};
use crate::model::{Car, CarId, CarList};
use crate::repository::{CarRepository, Page};
use crate::service::CarValidator;
use serde_json::Value;
use std::sync::Arc;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

#[derive(Clone)]
pub struct CarService {
    repo: Arc<dyn CarRepository>,
}

impl CarService {
    pub fn new(repo: Arc<dyn CarRepository>) -> Self {
        CarService { repo }
    }

    /// Validate against the full schema and insert. The handler answers 201.
    pub async fn create_car(&self, body: &Value) -> Result<Car, AppError> {
        let new_car = CarValidator::validate_full(body)?;
        let car = self.repo.create(&new_car).await?;
        tracing::info!(id = car.id, "car created");
        Ok(car)
    }

    /// List in id order. `offset` defaults to 0 and `limit` to 100 (capped at 1000);
    /// negative values are rejected.
    pub async fn list_cars(
        &self,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<CarList, AppError> {
        let page = page_bounds(offset, limit)?;
        let cars = self.repo.list(page).await?;
        Ok(CarList { cars })
    }

    pub async fn get_car(&self, id: CarId) -> Result<Car, AppError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Full replacement: fields absent from `body` fall back to schema defaults.
    pub async fn update_car(&self, id: CarId, body: &Value) -> Result<Car, AppError> {
        let new_car = CarValidator::validate_full(body)?;
        let car = self
            .repo
            .update(id, &new_car)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id, "car replaced");
        Ok(car)
    }

    /// Merge only the keys present in `body` into the stored record.
    pub async fn patch_car(&self, id: CarId, body: &Value) -> Result<Car, AppError> {
        let patch = CarValidator::validate_partial(body)?;
        let car = self
            .repo
            .partial_update(id, patch)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id, "car patched");
        Ok(car)
    }

    pub async fn delete_car(&self, id: CarId) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(id, "car deleted");
        Ok(())
    }
}

fn not_found(id: CarId) -> AppError {
    tracing::warn!(id, "car not found");
    AppError::NotFound(id)
}

fn page_bounds(offset: Option<i64>, limit: Option<i64>) -> Result<Page, ValidationError> {
    let offset = offset.unwrap_or(0);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if offset < 0 {
        return Err(ValidationError::single("offset", "must be zero or greater"));
    }
    if limit < 0 {
        return Err(ValidationError::single("limit", "must be zero or greater"));
    }
    Ok(Page {
        offset,
        limit: limit.min(MAX_LIMIT),
    })
}
