pub mod auth_handler;

pub use auth_handler::{
    __path_forgot_password, __path_get_me, __path_login, __path_refresh_token,
    __path_reset_password, __path_signup, __path_verify_otp, forgot_password, get_me, login,
    refresh_token, reset_password, signup, verify_otp,
};
