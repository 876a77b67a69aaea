//! Read-only incident listing for the dashboard table and map.
//!
//! Incidents come from the backend `incidents` table when one is configured,
//! otherwise from a built-in demo set.

pub mod demo;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::IncidentService;
