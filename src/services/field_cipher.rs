//! Cifrado de campos protegidos
//!
//! AES-256-CBC con PKCS#7, clave e IV fijos y salida en hexadecimal. El cifrado
//! es determinista: el mismo texto produce siempre el mismo cifrado. Se mantiene
//! así para poder leer los datos ya cifrados por el despliegue existente.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use thiserror::Error;
use tracing::warn;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

const KEY_CONTEXT: &str = "bombona-tracking field cipher key v1";
const IV_CONTEXT: &str = "bombona-tracking field cipher iv v1";

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("ciphertext is not valid hex")]
    Hex(#[from] hex::FromHexError),

    #[error("ciphertext could not be unpadded (wrong key or corrupted data)")]
    Padding,

    #[error("decrypted bytes are not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Material de clave del cifrado
#[derive(Clone)]
pub struct FieldCipherConfig {
    pub key: [u8; 32],
    pub iv: [u8; 16],
}

impl std::fmt::Debug for FieldCipherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FieldCipherConfig { .. }")
    }
}

impl FieldCipherConfig {
    /// Construir la clave y el IV a partir de los secretos compartidos
    ///
    /// Un secreto de 32 bytes (clave) o 16 bytes (IV) se usa tal cual; con
    /// cualquier otra longitud se deriva con BLAKE3.
    pub fn from_secrets(key_secret: &str, iv_secret: &str) -> Self {
        let key = match <[u8; 32]>::try_from(key_secret.as_bytes()) {
            Ok(raw) => raw,
            Err(_) => blake3::derive_key(KEY_CONTEXT, key_secret.as_bytes()),
        };

        let iv = match <[u8; 16]>::try_from(iv_secret.as_bytes()) {
            Ok(raw) => raw,
            Err(_) => {
                let derived = blake3::derive_key(IV_CONTEXT, iv_secret.as_bytes());
                let mut iv = [0u8; 16];
                iv.copy_from_slice(&derived[..16]);
                iv
            }
        };

        Self { key, iv }
    }
}

#[derive(Debug, Clone)]
pub struct FieldCipher {
    config: FieldCipherConfig,
}

impl FieldCipher {
    pub fn new(config: FieldCipherConfig) -> Self {
        Self { config }
    }

    /// Cifrar un campo; la cadena vacía se queda vacía
    pub fn encrypt(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }

        let ciphertext = Aes256CbcEnc::new(&self.config.key.into(), &self.config.iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        hex::encode(ciphertext)
    }

    /// Descifrar un campo devolviendo el error concreto
    pub fn try_decrypt(&self, ciphertext: &str) -> Result<String, CipherError> {
        if ciphertext.is_empty() {
            return Ok(String::new());
        }

        let bytes = hex::decode(ciphertext)?;
        let plaintext = Aes256CbcDec::new(&self.config.key.into(), &self.config.iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&bytes)
            .map_err(|_| CipherError::Padding)?;

        Ok(String::from_utf8(plaintext)?)
    }

    /// Descifrar un campo; un cifrado ilegible se trata como "sin datos"
    pub fn decrypt(&self, ciphertext: &str) -> String {
        self.try_decrypt(ciphertext).unwrap_or_else(|e| {
            warn!("⚠️ Campo protegido ilegible, se devuelve vacío: {}", e);
            String::new()
        })
    }
}
