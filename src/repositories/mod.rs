//! Repositorios
//! 
//! Acceso a las colecciones persistidas. Ningún repositorio guarda estado
//! propio: cada operación recarga la colección completa del almacén.

pub mod ficha_repository;
pub mod tracking_repository;
pub mod user_repository;

pub use ficha_repository::{FichaRepository, StatusUpdate};
pub use tracking_repository::TrackingRepository;
pub use user_repository::{BootstrapAdmin, UserRepository};
