//! DTOs de la API
//! 
//! Requests de entrada (validados con `validator`) y responses de salida.

pub mod auth_dto;
pub mod ficha_dto;
pub mod response;
pub mod tracking_dto;
pub mod user_dto;

pub use response::ApiResponse;
