//! Puerto de almacenamiento de colecciones
//!
//! Un backend solo sabe leer y sobrescribir los bytes de una colección
//! completa; la codificación JSON vive en `JsonStore`.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on collection '{collection}': {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document in collection '{collection}': {source}")]
    Malformed {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode collection '{collection}': {source}")]
    Encode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CollectionBackend: Send + Sync {
    /// Bytes almacenados para la colección, `None` si nunca se escribió
    async fn load(&self, collection: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Sobrescribir la colección completa
    async fn save(&self, collection: &str, bytes: Vec<u8>) -> Result<(), StoreError>;
}
