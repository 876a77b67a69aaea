//! Client side of the dispatch flow: the SOS alert form, the notifications
//! panel and location acquisition, driven against a running service.

pub mod alert_form;
pub mod api;
pub mod location;
pub mod notifications;

pub use alert_form::{AlertForm, AlertPhase};
pub use api::{AlertSource, AlertSubmitter, ClientError, DispatchApiClient};
pub use location::{acquire_location, EnvLocationProvider, LocationData, LocationProvider};
pub use notifications::{render_lines, FeedSnapshot, NotificationsPanel};
