//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the client for the hosted backend that owns persistence and auth.

pub mod supabase;
