pub mod constants;
pub mod severity;
pub mod test_helpers;
pub mod types;
pub mod validation;
