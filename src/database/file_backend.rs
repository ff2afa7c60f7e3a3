//! Backend de archivos JSON
//!
//! Un archivo `<coleccion>.json` por colección dentro del directorio de datos.
//! Las escrituras van a un archivo temporal y se renombran encima del
//! definitivo, así un lector nunca ve un documento a medio escribir.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use super::backend::{CollectionBackend, StoreError};

#[derive(Debug, Clone)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    /// Crear el backend, creando el directorio de datos si no existe
    pub async fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|source| StoreError::Io {
                collection: data_dir.display().to_string(),
                source,
            })?;

        info!(path = %data_dir.display(), "📁 Directorio de datos listo");
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", collection))
    }
}

#[async_trait]
impl CollectionBackend for FileBackend {
    async fn load(&self, collection: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.collection_path(collection);
        match fs::read(&path).await {
            Ok(bytes) => {
                debug!(collection, bytes = bytes.len(), "📥 Colección leída");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                collection: collection.to_string(),
                source,
            }),
        }
    }

    async fn save(&self, collection: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let path = self.collection_path(collection);
        let tmp_path = self.data_dir.join(format!(".{}.json.tmp", collection));
        let io_err = |source| StoreError::Io {
            collection: collection.to_string(),
            source,
        };

        fs::write(&tmp_path, &bytes).await.map_err(io_err)?;
        fs::rename(&tmp_path, &path).await.map_err(io_err)?;

        debug!(collection, bytes = bytes.len(), "💾 Colección guardada");
        Ok(())
    }
}
