//! Almacén de colecciones tipadas
//!
//! Lee y sobrescribe colecciones completas como `Vec<T>` en JSON. Los errores
//! se devuelven siempre como `StoreError`; la `FailurePolicy` configurada decide
//! si se degradan a valor por defecto (registrándolos) o se propagan.
//!
//! Toda mutación pasa por `update`, que serializa el ciclo
//! leer-modificar-escribir del almacén detrás de un mutex asíncrono. `update`
//! no aplica la política: si la colección no se puede leer o guardar, el error
//! se propaga y el documento existente queda intacto.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::error;

use super::backend::{CollectionBackend, StoreError};
use crate::config::environment::FailurePolicy;

#[derive(Clone)]
pub struct JsonStore {
    backend: Arc<dyn CollectionBackend>,
    policy: FailurePolicy,
    write_lock: Arc<Mutex<()>>,
}

impl JsonStore {
    pub fn new(backend: Arc<dyn CollectionBackend>, policy: FailurePolicy) -> Self {
        Self {
            backend,
            policy,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Leer la colección sin aplicar política: `Ok(None)` si no existe
    pub async fn try_read<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Option<Vec<T>>, StoreError> {
        let Some(bytes) = self.backend.load(collection).await? else {
            return Ok(None);
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Malformed {
                collection: collection.to_string(),
                source,
            })
    }

    /// Leer la colección, devolviendo `default` si no existe
    ///
    /// Con política `Lenient` un documento ilegible también devuelve `default`.
    pub async fn read_collection<T: DeserializeOwned>(
        &self,
        collection: &str,
        default: Vec<T>,
    ) -> Result<Vec<T>, StoreError> {
        match self.try_read(collection).await {
            Ok(Some(items)) => Ok(items),
            Ok(None) => Ok(default),
            Err(e) if self.policy == FailurePolicy::Lenient => {
                error!("❌ Error leyendo colección, usando valor por defecto: {}", e);
                Ok(default)
            }
            Err(e) => Err(e),
        }
    }

    /// Sobrescribir la colección completa
    ///
    /// Con política `Lenient` un fallo de escritura se registra y no se propaga.
    pub async fn write_collection<T: Serialize>(
        &self,
        collection: &str,
        items: &[T],
    ) -> Result<(), StoreError> {
        let result = match serde_json::to_vec_pretty(items) {
            Ok(bytes) => self.backend.save(collection, bytes).await,
            Err(source) => Err(StoreError::Encode {
                collection: collection.to_string(),
                source,
            }),
        };

        match result {
            Err(e) if self.policy == FailurePolicy::Lenient => {
                error!("❌ Error guardando colección (se descarta la escritura): {}", e);
                Ok(())
            }
            other => other,
        }
    }

    /// Ciclo leer-modificar-escribir atómico dentro del proceso
    ///
    /// `mutate` devuelve `None` para abortar sin escribir nada. Una colección
    /// ilegible nunca se sobrescribe.
    pub async fn update<T, R, F>(&self, collection: &str, mutate: F) -> Result<Option<R>, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> Option<R>,
    {
        let _guard = self.write_lock.lock().await;

        let mut items = match self.try_read(collection).await {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                error!("❌ Colección ilegible, se cancela la escritura: {}", e);
                return Err(e);
            }
        };
        let Some(outcome) = mutate(&mut items) else {
            return Ok(None);
        };

        let bytes = serde_json::to_vec_pretty(&items).map_err(|source| StoreError::Encode {
            collection: collection.to_string(),
            source,
        })?;
        self.backend.save(collection, bytes).await?;
        Ok(Some(outcome))
    }
}
