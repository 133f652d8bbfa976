//! Service status routes: the root greeting, liveness and storage readiness.

use crate::state::AppState;
use crate::store;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cars: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

impl Readiness {
    fn degraded(reason: &'static str) -> (StatusCode, Json<Readiness>) {
        let body = Readiness {
            status: "degraded",
            cars: None,
            reason: Some(reason),
        };
        (StatusCode::SERVICE_UNAVAILABLE, Json(body))
    }
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "ok", "status": "200" }))
}

/// Liveness: answers without touching storage.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Ready once the `cars` table is reachable; reports how many cars are stored.
async fn ready(
    State(state): State<AppState>,
) -> Result<Json<Readiness>, (StatusCode, Json<Readiness>)> {
    match store::stored_car_count(&state.pool).await {
        Ok(Some(count)) => Ok(Json(Readiness {
            status: "ok",
            cars: Some(count),
            reason: None,
        })),
        Ok(None) => {
            tracing::warn!(table = store::CARS_TABLE, "readiness: table missing");
            Err(Readiness::degraded("cars table missing"))
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness: storage unreachable");
            Err(Readiness::degraded("storage unavailable"))
        }
    }
}

/// GET /, /health, /ready.
pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
