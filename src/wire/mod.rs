//! Wire-format records and their conversions to domain entities.

pub mod dtos;
pub mod mappers;

pub use dtos::{
    AlertCreateRequest, AlertDto, AlertUpdateRequest, LoginRequest, NotificationDto,
    NotificationUpdateRequest, RefreshRequest, RegisterRequest, TokenResponse, UserDto,
};
