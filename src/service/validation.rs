//! Request validation for car payloads: full schema (create, replace) and partial schema (patch).

use crate::error::{FieldError, ValidationError};
use crate::model::{CarPatch, NewCar, BRAND_MAX_LEN, COLOR_MAX_LEN, MODEL_MAX_LEN};
use serde_json::{Map, Value};

pub struct CarValidator;

impl CarValidator {
    /// Validate a full payload. All fields but `description` are required; absent or null
    /// `description` becomes `None`.
    pub fn validate_full(body: &Value) -> Result<NewCar, ValidationError> {
        let map = as_object(body)?;
        let mut errors = Vec::new();

        let brand = required(map, "brand", &mut errors, |f, v| text(f, v, BRAND_MAX_LEN));
        let color = required(map, "color", &mut errors, |f, v| text(f, v, COLOR_MAX_LEN));
        let model = required(map, "model", &mut errors, |f, v| text(f, v, MODEL_MAX_LEN));
        let model_year = required(map, "model_year", &mut errors, year);
        let factory_year = required(map, "factory_year", &mut errors, year);
        let description = match map.get("description") {
            None => None,
            Some(v) => collect(description_value(v), &mut errors).flatten(),
        };

        match (brand, color, model, model_year, factory_year) {
            (Some(brand), Some(color), Some(model), Some(model_year), Some(factory_year))
                if errors.is_empty() =>
            {
                Ok(NewCar {
                    brand,
                    color,
                    model,
                    model_year,
                    factory_year,
                    description,
                })
            }
            _ => Err(ValidationError { errors }),
        }
    }

    /// Validate only the fields present in body. A key is "supplied" when it is present,
    /// even with a null value; null is accepted only for `description`.
    pub fn validate_partial(body: &Value) -> Result<CarPatch, ValidationError> {
        let map = as_object(body)?;
        let mut errors = Vec::new();

        let patch = CarPatch {
            brand: supplied(map, "brand", &mut errors, |f, v| text(f, v, BRAND_MAX_LEN)),
            color: supplied(map, "color", &mut errors, |f, v| text(f, v, COLOR_MAX_LEN)),
            model: supplied(map, "model", &mut errors, |f, v| text(f, v, MODEL_MAX_LEN)),
            model_year: supplied(map, "model_year", &mut errors, year),
            factory_year: supplied(map, "factory_year", &mut errors, year),
            description: map
                .get("description")
                .and_then(|v| collect(description_value(v), &mut errors)),
        };

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(ValidationError { errors })
        }
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object()
        .ok_or_else(|| ValidationError::single("body", "must be a JSON object"))
}

fn collect<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn required<T>(
    map: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
    check: impl Fn(&'static str, &Value) -> Result<T, FieldError>,
) -> Option<T> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "field required"));
            None
        }
        Some(v) => collect(check(field, v), errors),
    }
}

fn supplied<T>(
    map: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
    check: impl Fn(&'static str, &Value) -> Result<T, FieldError>,
) -> Option<T> {
    match map.get(field) {
        None => None,
        Some(Value::Null) => {
            errors.push(FieldError::new(field, "may not be null"));
            None
        }
        Some(v) => collect(check(field, v), errors),
    }
}

fn text(field: &'static str, v: &Value, max: usize) -> Result<String, FieldError> {
    let s = v
        .as_str()
        .ok_or_else(|| FieldError::new(field, "must be a string"))?;
    if s.trim().is_empty() {
        return Err(FieldError::new(field, "must not be empty"));
    }
    if s.chars().count() > max {
        return Err(FieldError::new(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(s.to_string())
}

fn year(field: &'static str, v: &Value) -> Result<i32, FieldError> {
    v.as_i64()
        .ok_or_else(|| FieldError::new(field, "must be an integer"))
        .and_then(|n| {
            i32::try_from(n).map_err(|_| FieldError::new(field, "integer out of range"))
        })
}

fn description_value(v: &Value) -> Result<Option<String>, FieldError> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(FieldError::new("description", "must be a string or null")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn corolla() -> Value {
        json!({
            "brand": "Toyota",
            "color": "red",
            "model": "Corolla",
            "model_year": 2022,
            "factory_year": 2021
        })
    }

    #[test]
    fn full_accepts_payload_without_description() {
        let car = CarValidator::validate_full(&corolla()).unwrap();
        assert_eq!(car.brand, "Toyota");
        assert_eq!(car.model_year, 2022);
        assert_eq!(car.description, None);
    }

    #[test]
    fn full_accepts_explicit_null_description() {
        let mut body = corolla();
        body["description"] = Value::Null;
        assert_eq!(CarValidator::validate_full(&body).unwrap().description, None);
    }

    #[test]
    fn full_reports_every_missing_field() {
        let err = CarValidator::validate_full(&json!({ "brand": "Fiat" })).unwrap_err();
        for field in ["color", "model", "model_year", "factory_year"] {
            assert!(err.has_field(field), "{field} should be reported");
        }
        assert!(!err.has_field("brand"));
    }

    #[test]
    fn full_rejects_wrong_types() {
        let mut body = corolla();
        body["model_year"] = json!("2022");
        body["brand"] = json!(7);
        body["description"] = json!(["x"]);
        let err = CarValidator::validate_full(&body).unwrap_err();
        assert!(err.has_field("model_year"));
        assert!(err.has_field("brand"));
        assert!(err.has_field("description"));
    }

    #[test]
    fn full_rejects_float_and_out_of_range_years() {
        let mut body = corolla();
        body["model_year"] = json!(2022.5);
        body["factory_year"] = json!(i64::from(i32::MAX) + 1);
        let err = CarValidator::validate_full(&body).unwrap_err();
        assert!(err.has_field("model_year"));
        assert!(err.has_field("factory_year"));
    }

    #[test]
    fn full_enforces_lengths_and_non_empty() {
        let mut body = corolla();
        body["color"] = json!("x".repeat(COLOR_MAX_LEN + 1));
        body["model"] = json!("   ");
        body["brand"] = json!("é".repeat(BRAND_MAX_LEN));
        let err = CarValidator::validate_full(&body).unwrap_err();
        assert!(err.has_field("color"));
        assert!(err.has_field("model"));
        assert!(!err.has_field("brand"));
    }

    #[test]
    fn full_ignores_unknown_fields() {
        let mut body = corolla();
        body["id"] = json!(42);
        body["owner"] = json!("someone");
        assert!(CarValidator::validate_full(&body).is_ok());
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = CarValidator::validate_full(&json!([1, 2])).unwrap_err();
        assert!(err.has_field("body"));
        let err = CarValidator::validate_partial(&json!("blue")).unwrap_err();
        assert!(err.has_field("body"));
    }

    #[test]
    fn partial_keeps_only_supplied_fields() {
        let patch = CarValidator::validate_partial(&json!({ "color": "blue" })).unwrap();
        assert_eq!(patch.color.as_deref(), Some("blue"));
        assert!(patch.brand.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn partial_distinguishes_null_description_from_omitted() {
        let cleared = CarValidator::validate_partial(&json!({ "description": null })).unwrap();
        assert_eq!(cleared.description, Some(None));
        let omitted = CarValidator::validate_partial(&json!({})).unwrap();
        assert_eq!(omitted.description, None);
        assert!(omitted.is_empty());
    }

    #[test]
    fn partial_rejects_null_for_mandatory_fields() {
        let err = CarValidator::validate_partial(&json!({ "brand": null, "model_year": null }))
            .unwrap_err();
        assert!(err.has_field("brand"));
        assert!(err.has_field("model_year"));
    }

    #[test]
    fn partial_applies_the_same_field_rules() {
        let err = CarValidator::validate_partial(&json!({ "brand": "", "factory_year": "old" }))
            .unwrap_err();
        assert!(err.has_field("brand"));
        assert!(err.has_field("factory_year"));
    }
}
