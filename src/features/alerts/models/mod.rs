mod alert;

pub use alert::{alert_id_for_millis, Alert, AlertStatus, NewAlert};
