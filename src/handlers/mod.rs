//! HTTP handlers for the car resource.

pub mod cars;
