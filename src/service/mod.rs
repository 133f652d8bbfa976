//! CarService: car CRUD orchestration over a repository.

mod cars;
mod validation;
pub use cars::{CarService, DEFAULT_LIMIT, MAX_LIMIT};
pub use validation::CarValidator;
