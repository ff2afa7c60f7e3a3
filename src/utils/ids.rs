//! Generación de identificadores
//!
//! Los ids son la concatenación del timestamp actual en milisegundos en base 36
//! y un sufijo aleatorio también en base 36. Son únicos en la práctica para un
//! solo proceso, pero no son impredecibles.

use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 11;

/// Codificar un entero sin signo en base 36
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    // Solo contiene ASCII del alfabeto
    String::from_utf8(digits).unwrap_or_default()
}

/// Generar un nuevo id opaco
pub fn generate_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::thread_rng();

    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    format!("{}{}", to_base36(millis), suffix)
}
