//! Web surface of the service.

pub mod pages;
pub mod routes;

pub use routes::{AppState, app_routes, results_location};
