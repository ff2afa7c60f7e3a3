//! Servicios
//!
//! Cifrado de campos protegidos y hash de contraseñas.

pub mod field_cipher;
pub mod password_service;
