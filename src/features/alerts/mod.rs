//! Emergency alerts sent from the mobile SOS form.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/alerts` | Submit an alert (location + severity) |
//! | GET | `/api/alerts` | Current in-memory alerts, newest first |

pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{AlertService, AlertStore};
