use super::keyword;
use cipherbench_core::crypto::provider::{TextKey, TextPrimitive};
use cipherbench_core::ProviderError;

/// Vigenère over ASCII letters. Case is kept; everything else passes through
/// without consuming a key letter.
#[derive(Debug, Default, Clone, Copy)]
pub struct Vigenere;

impl Vigenere {
    fn process(text: &str, key: &str, encrypt: bool) -> Result<String, ProviderError> {
        let shifts: Vec<u8> = key
            .bytes()
            .filter(u8::is_ascii_alphabetic)
            .map(|k| k.to_ascii_uppercase() - b'A')
            .collect();
        if shifts.is_empty() {
            return Err(ProviderError::InvalidInput("Key has no letters".to_string()));
        }

        let mut key_index = 0;
        let result = text
            .chars()
            .map(|c| {
                if !c.is_ascii_alphabetic() {
                    return c;
                }
                let base = if c.is_ascii_uppercase() { b'A' } else { b'a' };
                let shift = shifts[key_index % shifts.len()];
                key_index += 1;

                let shift = if encrypt { shift } else { 26 - shift };
                ((c as u8 - base + shift) % 26 + base) as char
            })
            .collect();

        Ok(result)
    }
}

impl TextPrimitive for Vigenere {
    fn encrypt(&self, text: &str, key: TextKey<'_>) -> Result<String, ProviderError> {
        Self::process(text, keyword(key)?, true)
    }

    fn decrypt(&self, text: &str, key: TextKey<'_>) -> Result<String, ProviderError> {
        Self::process(text, keyword(key)?, false)
    }
}
