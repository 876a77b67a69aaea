mod auth_dto;

pub use auth_dto::{
    AuthResponseDto, AuthUserDto, ForgotPasswordRequestDto, LoginRequestDto,
    RefreshTokenRequestDto, ResetPasswordRequestDto, SignUpRequestDto, SignUpResponseDto,
    VerifyOtpRequestDto,
};
