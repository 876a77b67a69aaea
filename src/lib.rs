//! Najm dispatch: phone SOS alerts, the incident dashboard API and the
//! client-side alert flows.

pub mod cli;
pub mod client;
pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
