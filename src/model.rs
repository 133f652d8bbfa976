//! Car record types: stored row, creation shape, sparse patch, list envelope.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type CarId = i64;

pub const BRAND_MAX_LEN: usize = 50;
pub const COLOR_MAX_LEN: usize = 30;
pub const MODEL_MAX_LEN: usize = 50;

/// Public representation of a stored car. `id` is assigned by storage and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Car {
    #[schema(value_type = i64)]
    pub id: CarId,
    pub brand: String,
    pub color: String,
    pub model: String,
    pub model_year: i32,
    pub factory_year: i32,
    pub description: Option<String>,
}

/// Creation and full-replacement shape: every field except `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewCar {
    pub brand: String,
    pub color: String,
    pub model: String,
    pub model_year: i32,
    pub factory_year: i32,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCar {
    pub fn with_id(self, id: CarId) -> Car {
        Car {
            id,
            brand: self.brand,
            color: self.color,
            model: self.model,
            model_year: self.model_year,
            factory_year: self.factory_year,
            description: self.description,
        }
    }
}

/// Sparse update. `None` means the field was omitted; for `description`,
/// `Some(None)` means it was explicitly cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CarPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl CarPatch {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.color.is_none()
            && self.model.is_none()
            && self.model_year.is_none()
            && self.factory_year.is_none()
            && self.description.is_none()
    }

    /// Overwrite only the supplied fields of `car`. `id` is never touched.
    pub fn apply(self, car: &mut Car) {
        if let Some(brand) = self.brand {
            car.brand = brand;
        }
        if let Some(color) = self.color {
            car.color = color;
        }
        if let Some(model) = self.model {
            car.model = model;
        }
        if let Some(model_year) = self.model_year {
            car.model_year = model_year;
        }
        if let Some(factory_year) = self.factory_year {
            car.factory_year = factory_year;
        }
        if let Some(description) = self.description {
            car.description = description;
        }
    }
}

/// List envelope: `{"cars": [...]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CarList {
    pub cars: Vec<Car>,
}
