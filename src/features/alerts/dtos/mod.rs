mod alert_dto;

pub use alert_dto::{
    AlertErrorResponseDto, AlertListResponseDto, CreateAlertDto, CreateAlertResponseDto,
};
