//! Fast Car API: car record management over SQLite.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, FieldError, ValidationError};
pub use model::{Car, CarId, CarList, CarPatch, NewCar};
pub use repository::{CarRepository, Page, SqliteCarRepository};
pub use routes::{app, car_routes, openapi_routes, status_routes, ApiDoc};
pub use service::{CarService, CarValidator};
pub use state::AppState;
pub use store::{connect, connect_in_memory, ensure_tables};
