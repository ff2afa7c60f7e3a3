//! Modelos del sistema
//! 
//! Este módulo contiene los modelos de datos tal como se persisten en las
//! colecciones JSON y sus vistas descifradas.

pub mod ficha;
pub mod tracking;
pub mod user;

