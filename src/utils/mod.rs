//! Utilidades del sistema
//! 
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y generación de ids.

pub mod errors;
pub mod ids;
pub mod jwt;
pub mod validation;
