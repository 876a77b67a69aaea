//! Client for the hosted backend-as-a-service
//!
//! The backend owns persistence (PostgREST tables under `/rest/v1`) and
//! authentication (GoTrue under `/auth/v1`). This module only forwards calls;
//! password hashing, OTP issuance and sessions live on the other side.

mod auth;
mod client;
mod rest;

pub use auth::{AuthSession, AuthUser, SignUpOutcome};
pub use client::SupabaseClient;
pub use rest::SelectQuery;
