// =============================================================================
// LOCATION DEFAULTS (Eastern Province)
// =============================================================================

/// Latitude used when an alert arrives without coordinates
pub const FALLBACK_LATITUDE: f64 = 26.3927;

/// Longitude used when an alert arrives without coordinates
pub const FALLBACK_LONGITUDE: f64 = 50.0132;

/// Initial center of the dashboard incident map
pub const MAP_CENTER: (f64, f64) = (26.3927, 50.0632);

// =============================================================================
// ALERTS
// =============================================================================

/// Prefix of generated alert identifiers
pub const ALERT_ID_PREFIX: &str = "ALR-";

/// Address stored when the client sends none
pub const UNKNOWN_ADDRESS: &str = "Unknown";

/// Number of alerts shown by the notifications panel
pub const RECENT_ALERTS_SHOWN: usize = 5;

// =============================================================================
// PASSWORD POLICY
// =============================================================================

/// Minimum password length accepted by sign-up and reset forms
pub const MIN_PASSWORD_LENGTH: usize = 6;
