//! Account access, proxied to the hosted auth provider.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/auth/login` | Sign in with email and password |
//! | POST | `/api/auth/signup` | Create an account |
//! | POST | `/api/auth/refresh` | Exchange a refresh token |
//! | POST | `/api/auth/forgot-password` | Email a recovery code |
//! | POST | `/api/auth/verify-otp` | Exchange the recovery code for a session |
//! | POST | `/api/auth/reset-password` | Set a new password (bearer) |
//! | GET | `/api/auth/me` | Current user (bearer) |

pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::AuthService;
