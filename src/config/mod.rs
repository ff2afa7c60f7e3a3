//! Configuración del proyecto
//! 
//! Este módulo contiene las variables de entorno y la política de fallos
//! del almacenamiento.

pub mod environment;

pub use environment::*;
