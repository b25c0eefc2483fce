//! Block Cipher Codec
//!
//! Marshals text into PKCS#7-padded binary buffers for a [`BlockPrimitive`] and
//! renders the output as Base64. Decryption reverses the path and strips the
//! padding only when the trailing byte is plausible.

use crate::codec::buffer::ScopedBuffer;
use crate::crypto::descriptor::Algorithm;
use crate::crypto::provider::BlockPrimitive;
use crate::error::{CoreError, Result};
use crate::utils::b64;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Appends `pad = block_size - len % block_size` bytes of value `pad`.
///
/// A full block of padding is added when `data` is already block-aligned, so
/// the result is always strictly longer than `data`.
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let padding = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + padding);
    padded.extend_from_slice(data);
    padded.resize(data.len() + padding, padding as u8);
    padded
}

/// Strips the padding announced by the last byte.
///
/// A padding byte outside `1..=block_size`, or larger than the buffer, leaves
/// the buffer untouched.
pub fn unpad(data: &[u8], block_size: usize) -> &[u8] {
    match data.last() {
        Some(&p) => {
            let p = p as usize;
            if p >= 1 && p <= block_size && p <= data.len() {
                &data[..data.len() - p]
            } else {
                data
            }
        }
        None => data,
    }
}

/// Key string right-padded with zero bytes and truncated to `block_size`.
pub fn key_bytes(key: &str, block_size: usize) -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0u8; block_size]);
    let raw = key.as_bytes();
    let n = raw.len().min(block_size);
    bytes[..n].copy_from_slice(&raw[..n]);
    bytes
}

pub struct BlockCodec<'a> {
    algorithm: Algorithm,
    block_size: usize,
    primitive: &'a dyn BlockPrimitive,
}

impl<'a> BlockCodec<'a> {
    pub fn new(algorithm: Algorithm, primitive: &'a dyn BlockPrimitive) -> Result<Self> {
        let block_size = algorithm
            .descriptor()
            .block_size()
            .ok_or(CoreError::UnsupportedOperation {
                algorithm,
                operation: "block encryption",
            })?;

        Ok(Self {
            algorithm,
            block_size,
            primitive,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Encrypts `text` and returns the Base64 of the raw ciphertext.
    pub fn encode(&self, text: &str, key: &str) -> Result<String> {
        let padded = Zeroizing::new(pad(text.as_bytes(), self.block_size));
        let key = key_bytes(key, self.block_size);

        debug!(
            target: "codec::block",
            algorithm = %self.algorithm,
            plaintext_len = text.len(),
            padded_len = padded.len(),
            "Encrypting"
        );

        let ciphertext = self.run(&padded, &key, true)?;
        Ok(b64::encode(&ciphertext))
    }

    /// Decrypts Base64 `ciphertext` and returns the unpadded text.
    pub fn decode(&self, ciphertext: &str, key: &str) -> Result<String> {
        let data = b64::decode(ciphertext)?;
        if data.is_empty() {
            return Err(CoreError::MalformedCiphertext(
                "Ciphertext is empty".to_string(),
            ));
        }
        if data.len() % self.block_size != 0 {
            return Err(CoreError::MalformedCiphertext(format!(
                "Length must be a multiple of {}, got {}",
                self.block_size,
                data.len()
            )));
        }

        let key = key_bytes(key, self.block_size);
        let plaintext = self.run(&data, &key, false)?;
        let unpadded = unpad(&plaintext, self.block_size);

        debug!(
            target: "codec::block",
            algorithm = %self.algorithm,
            decrypted_len = plaintext.len(),
            stripped = plaintext.len() - unpadded.len(),
            "Decrypted"
        );

        Ok(String::from_utf8_lossy(unpadded).into_owned())
    }

    fn run(&self, data: &[u8], key: &[u8], encrypt: bool) -> Result<Zeroizing<Vec<u8>>> {
        let allocator = self.primitive.allocator();

        let input = ScopedBuffer::acquire_with(allocator, data)?;
        let key = ScopedBuffer::acquire_with(allocator, key)?;
        let mut output = ScopedBuffer::acquire(allocator, data.len())?;

        if !self.primitive.process(&input, &key, &mut output, encrypt) {
            warn!(
                target: "codec::block",
                algorithm = %self.algorithm,
                encrypt,
                "Primitive reported failure"
            );
            return Err(CoreError::PrimitiveProcessingFailed {
                algorithm: self.algorithm,
                detail: "Please check your input and try again".to_string(),
            });
        }

        Ok(Zeroizing::new(output.to_vec()))
    }
}
