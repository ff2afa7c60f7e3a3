use tracing::info;

use crate::config::environment::FailurePolicy;
use crate::database::JsonStore;
use crate::models::ficha::{Ficha, FichaStatus, Location, NewFicha, StoredFicha, StoredLocation};
use crate::services::field_cipher::FieldCipher;
use crate::utils::errors::AppError;
use crate::utils::ids::generate_id;

pub const FICHAS_COLLECTION: &str = "fichas";

/// Resultado de un cambio de estado condicionado
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    Updated(Ficha),
    Rejected { current: FichaStatus },
}

/// Repositorio de fichas
///
/// Cada operación recarga la colección completa. El nombre y teléfono del
/// responsable y la firma solo se guardan cifrados; todo lo que sale de aquí
/// está descifrado.
#[derive(Clone)]
pub struct FichaRepository {
    store: JsonStore,
    cipher: FieldCipher,
}

impl FichaRepository {
    pub fn new(store: JsonStore, cipher: FieldCipher) -> Self {
        Self { store, cipher }
    }

    async fn load(&self) -> Result<Vec<StoredFicha>, AppError> {
        Ok(self.store.read_collection(FICHAS_COLLECTION, Vec::new()).await?)
    }

    fn decrypt_field(&self, ciphertext: &str) -> Result<String, AppError> {
        match self.store.policy() {
            FailurePolicy::Lenient => Ok(self.cipher.decrypt(ciphertext)),
            FailurePolicy::Strict => Ok(self.cipher.try_decrypt(ciphertext)?),
        }
    }

    fn decrypt_ficha(&self, ficha: StoredFicha) -> Result<Ficha, AppError> {
        let StoredFicha {
            id,
            driver_id,
            driver_name,
            container_count,
            status,
            created_at,
            location,
            notes,
            signature_encrypted,
        } = ficha;

        let signature = signature_encrypted
            .as_deref()
            .map(|s| self.decrypt_field(s))
            .transpose()?;

        Ok(Ficha {
            id,
            driver_id,
            driver_name,
            container_count,
            status,
            created_at,
            location: Location {
                responsible_name: self.decrypt_field(&location.responsible_name_encrypted)?,
                responsible_phone: self.decrypt_field(&location.responsible_phone_encrypted)?,
                site_name: location.site_name,
                address: location.address,
                city: location.city,
                state: location.state,
                postal_code: location.postal_code,
            },
            notes,
            signature,
        })
    }

    /// Todas las fichas en orden de inserción
    pub async fn list(&self) -> Result<Vec<Ficha>, AppError> {
        self.load()
            .await?
            .into_iter()
            .map(|f| self.decrypt_ficha(f))
            .collect()
    }

    /// Fichas de un motorista, en orden de inserción
    pub async fn list_by_driver(&self, driver_id: &str) -> Result<Vec<Ficha>, AppError> {
        self.load()
            .await?
            .into_iter()
            .filter(|f| f.driver_id == driver_id)
            .map(|f| self.decrypt_ficha(f))
            .collect()
    }

    pub async fn create(&self, input: NewFicha) -> Result<Ficha, AppError> {
        let NewFicha {
            driver_id,
            driver_name,
            container_count,
            location,
            notes,
        } = input;

        let ficha = StoredFicha {
            id: generate_id(),
            driver_id,
            driver_name,
            container_count,
            status: FichaStatus::Open,
            created_at: chrono::Utc::now(),
            location: StoredLocation {
                responsible_name_encrypted: self.cipher.encrypt(&location.responsible_name),
                responsible_phone_encrypted: self.cipher.encrypt(&location.responsible_phone),
                site_name: location.site_name,
                address: location.address,
                city: location.city,
                state: location.state,
                postal_code: location.postal_code,
            },
            notes,
            signature_encrypted: None,
        };

        let stored = self
            .store
            .update(FICHAS_COLLECTION, |fichas: &mut Vec<StoredFicha>| {
                fichas.push(ficha.clone());
                Some(ficha)
            })
            .await?
            .ok_or_else(|| AppError::Internal("La ficha no se pudo registrar".to_string()))?;

        info!(ficha_id = %stored.id, driver_id = %stored.driver_id, "📝 Ficha creada");
        self.decrypt_ficha(stored)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Ficha>, AppError> {
        self.load()
            .await?
            .into_iter()
            .find(|f| f.id == id)
            .map(|f| self.decrypt_ficha(f))
            .transpose()
    }

    /// Sobrescribe el estado sin validar la dirección de la transición
    pub async fn update_status(&self, id: &str, status: FichaStatus) -> Result<Option<Ficha>, AppError> {
        match self.update_status_if(id, status, |_| true).await? {
            Some(StatusUpdate::Updated(ficha)) => Ok(Some(ficha)),
            Some(StatusUpdate::Rejected { .. }) | None => Ok(None),
        }
    }

    /// Cambia el estado solo si `accept` admite el estado actual
    ///
    /// La comprobación se hace bajo el lock del almacén, así que no hay
    /// carrera con otra escritura sobre la misma ficha.
    pub async fn update_status_if<F>(
        &self,
        id: &str,
        status: FichaStatus,
        accept: F,
    ) -> Result<Option<StatusUpdate>, AppError>
    where
        F: FnOnce(FichaStatus) -> bool,
    {
        let mut rejected = None;
        let updated = self
            .store
            .update(FICHAS_COLLECTION, |fichas: &mut Vec<StoredFicha>| {
                let ficha = fichas.iter_mut().find(|f| f.id == id)?;
                if !accept(ficha.status) {
                    rejected = Some(ficha.status);
                    return None;
                }
                ficha.status = status;
                Some(ficha.clone())
            })
            .await?;

        if let Some(current) = rejected {
            return Ok(Some(StatusUpdate::Rejected { current }));
        }
        match updated {
            Some(ficha) => {
                info!(ficha_id = %id, status = ?status, "🔄 Estado de ficha actualizado");
                Ok(Some(StatusUpdate::Updated(self.decrypt_ficha(ficha)?)))
            }
            None => Ok(None),
        }
    }

    /// Guarda la firma cifrada, sustituyendo la anterior si existía
    pub async fn attach_signature(&self, id: &str, image_data: &str) -> Result<Option<Ficha>, AppError> {
        let encrypted = self.cipher.encrypt(image_data);

        let updated = self
            .store
            .update(FICHAS_COLLECTION, |fichas: &mut Vec<StoredFicha>| {
                let ficha = fichas.iter_mut().find(|f| f.id == id)?;
                ficha.signature_encrypted = Some(encrypted);
                Some(ficha.clone())
            })
            .await?;

        if updated.is_some() {
            info!(ficha_id = %id, "✍️ Firma registrada");
        }
        updated.map(|f| self.decrypt_ficha(f)).transpose()
    }
}
