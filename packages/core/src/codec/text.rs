//! Text Cipher Codec
//!
//! String-in/string-out classical ciphers. No binary marshalling happens here;
//! the text is handed to the provider as is, together with the already
//! validated key.

use crate::crypto::descriptor::Algorithm;
use crate::crypto::provider::{TextKey, TextPrimitive};
use crate::error::{CoreError, Result};

/// Validated key for a classical cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassicalKey {
    Keyword(String),
    Rails(usize),
}

impl ClassicalKey {
    fn as_text_key(&self) -> TextKey<'_> {
        match self {
            ClassicalKey::Keyword(keyword) => TextKey::Keyword(keyword),
            ClassicalKey::Rails(rails) => TextKey::Rails(*rails),
        }
    }
}

pub struct TextCodec<'a> {
    algorithm: Algorithm,
    primitive: &'a dyn TextPrimitive,
}

impl<'a> TextCodec<'a> {
    pub fn new(algorithm: Algorithm, primitive: &'a dyn TextPrimitive) -> Self {
        Self {
            algorithm,
            primitive,
        }
    }

    pub fn encode(&self, text: &str, key: &ClassicalKey) -> Result<String> {
        self.primitive
            .encrypt(text, key.as_text_key())
            .map_err(|e| CoreError::processing(self.algorithm, e))
    }

    pub fn decode(&self, text: &str, key: &ClassicalKey) -> Result<String> {
        self.primitive
            .decrypt(text, key.as_text_key())
            .map_err(|e| CoreError::processing(self.algorithm, e))
    }
}
