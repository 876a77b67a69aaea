mod alert_service;
mod alert_store;

pub use alert_service::{AlertService, SubmissionOutcome};
pub use alert_store::AlertStore;
