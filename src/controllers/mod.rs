//! Controladores
//!
//! Reglas de negocio de cada recurso: validación de entrada, control de
//! acceso por rol y llamadas a los repositorios.

pub mod auth_controller;
pub mod ficha_controller;
pub mod tracking_controller;
pub mod user_controller;
