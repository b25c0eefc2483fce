// Base64 утилиты

use crate::error::{CoreError, Result};
use base64::{engine::general_purpose, Engine};

pub fn encode(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// Decodes standard Base64, ignoring ASCII whitespace anywhere in the input.
pub fn decode(data: &str) -> Result<Vec<u8>> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| CoreError::MalformedCiphertext(format!("Base64 decode failed: {}", e)))
}
