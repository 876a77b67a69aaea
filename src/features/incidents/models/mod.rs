mod incident;

pub use incident::{Incident, IncidentStatus};
