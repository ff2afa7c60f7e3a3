//! Módulo de almacenamiento
//! 
//! Persistencia de colecciones con nombre (`fichas`, `tracking`, `users`),
//! cada una como una lista ordenada de registros serializada en JSON.

pub mod backend;
pub mod file_backend;
pub mod json_store;
pub mod memory_backend;

pub use backend::{CollectionBackend, StoreError};
pub use file_backend::FileBackend;
pub use json_store::JsonStore;
pub use memory_backend::InMemoryBackend;
