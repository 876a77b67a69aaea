pub mod incident_handler;

pub use incident_handler::{__path_get_incident, __path_list_incidents, get_incident, list_incidents};
