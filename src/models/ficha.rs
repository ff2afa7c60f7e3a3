//! Modelo de Ficha
//! 
//! Una ficha documenta una recogida de bombonas. Existen dos vistas:
//! `StoredFicha`, con los campos protegidos cifrados tal como se persiste, y
//! `Ficha`, descifrada, que es la única que sale del repositorio.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estado de la ficha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FichaStatus {
    #[serde(rename = "open", alias = "aberta")]
    Open,
    #[serde(rename = "finalized", alias = "finalizada")]
    Finalized,
}

impl FichaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FichaStatus::Open => "open",
            FichaStatus::Finalized => "finalized",
        }
    }
}

impl FromStr for FichaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" | "aberta" => Ok(FichaStatus::Open),
            "finalized" | "finalizada" => Ok(FichaStatus::Finalized),
            other => Err(format!("Estado de ficha inválido: '{}'", other)),
        }
    }
}

/// Local de recogida tal como se guarda
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLocation {
    #[serde(alias = "nomeLocal")]
    pub site_name: String,
    #[serde(alias = "endereco")]
    pub address: String,
    #[serde(alias = "cidade")]
    pub city: String,
    #[serde(alias = "estado")]
    pub state: String,
    #[serde(alias = "cep")]
    pub postal_code: String,
    #[serde(alias = "responsavelNomeEncrypted")]
    pub responsible_name_encrypted: String,
    #[serde(alias = "responsavelTelefoneEncrypted")]
    pub responsible_phone_encrypted: String,
}

/// Ficha tal como se guarda en la colección `fichas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFicha {
    pub id: String,
    #[serde(alias = "motoristaId")]
    pub driver_id: String,
    #[serde(alias = "motoristaNome")]
    pub driver_name: String,
    #[serde(alias = "quantidadeBombonas")]
    pub container_count: u32,
    pub status: FichaStatus,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "local")]
    pub location: StoredLocation,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "observacoes")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "assinaturaBase64Encrypted")]
    pub signature_encrypted: Option<String>,
}

/// Local de recogida descifrado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub site_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub responsible_name: String,
    pub responsible_phone: String,
}

/// Ficha descifrada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ficha {
    pub id: String,
    pub driver_id: String,
    pub driver_name: String,
    pub container_count: u32,
    pub status: FichaStatus,
    pub created_at: DateTime<Utc>,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Datos para crear una ficha
#[derive(Debug, Clone)]
pub struct NewFicha {
    pub driver_id: String,
    pub driver_name: String,
    pub container_count: u32,
    pub location: Location,
    pub notes: Option<String>,
}
