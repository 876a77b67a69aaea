//! Account settings: the profile row kept in the backend `profiles` table.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users/me/profile` | Get the caller's profile |
//! | PUT | `/api/users/me/profile` | Create or update the caller's profile |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ProfileService;
