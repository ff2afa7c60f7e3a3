//! Backend en memoria
//!
//! Sirve para tests y desarrollo local sin disco. Puede simular una caída
//! del almacenamiento con `set_offline`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::backend::{CollectionBackend, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    collections: RwLock<HashMap<String, Vec<u8>>>,
    offline: AtomicBool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Escribir bytes crudos, saltándose la codificación
    pub async fn put_raw(&self, collection: &str, bytes: &[u8]) {
        self.collections
            .write()
            .await
            .insert(collection.to_string(), bytes.to_vec());
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory backend offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CollectionBackend for InMemoryBackend {
    async fn load(&self, collection: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check_online()?;
        Ok(self.collections.read().await.get(collection).cloned())
    }

    async fn save(&self, collection: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.check_online()?;
        self.collections
            .write()
            .await
            .insert(collection.to_string(), bytes);
        Ok(())
    }
}
