//! Shared application state for all routes.

use crate::repository::SqliteCarRepository;
use crate::service::CarService;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Kept for readiness checks; car access goes through `cars`.
    pub pool: SqlitePool,
    pub cars: CarService,
}

impl AppState {
    /// Wire the SQLite repository into the car service.
    pub fn new(pool: SqlitePool) -> Self {
        let repo = Arc::new(SqliteCarRepository::new(pool.clone()));
        AppState {
            pool,
            cars: CarService::new(repo),
        }
    }
}
