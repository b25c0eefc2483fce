//! Classical text ciphers.

pub mod playfair;
pub mod rail_fence;
pub mod vigenere;

pub use playfair::Playfair;
pub use rail_fence::RailFence;
pub use vigenere::Vigenere;

use cipherbench_core::crypto::provider::TextKey;
use cipherbench_core::ProviderError;

pub(crate) fn keyword<'a>(key: TextKey<'a>) -> Result<&'a str, ProviderError> {
    match key {
        TextKey::Keyword(keyword) => Ok(keyword),
        TextKey::Rails(_) => Err(ProviderError::InvalidInput(
            "Expected a keyword, got a rail count".to_string(),
        )),
    }
}
