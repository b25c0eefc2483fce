//! AES-128 and DES in ECB mode over whole blocks.
//!
//! Padding is the codec's job; these primitives only see block-aligned buffers.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use cipherbench_core::crypto::provider::BlockPrimitive;
use std::marker::PhantomData;
use tracing::trace;

/// Electronic-codebook wrapper around a RustCrypto block cipher.
pub struct Ecb<C> {
    _cipher: PhantomData<fn() -> C>,
}

impl<C> Ecb<C> {
    pub fn new() -> Self {
        Self {
            _cipher: PhantomData,
        }
    }
}

impl<C> Default for Ecb<C> {
    fn default() -> Self {
        Self::new()
    }
}

pub type Aes128Ecb = Ecb<aes::Aes128>;
pub type DesEcb = Ecb<des::Des>;

impl<C> BlockPrimitive for Ecb<C>
where
    C: BlockEncrypt + BlockDecrypt + KeyInit,
{
    fn process(&self, input: &[u8], key: &[u8], output: &mut [u8], encrypt: bool) -> bool {
        let block_size = C::block_size();
        if input.len() != output.len() || input.len() % block_size != 0 {
            return false;
        }

        let cipher = match C::new_from_slice(key) {
            Ok(cipher) => cipher,
            Err(_) => return false,
        };

        for (in_block, out_block) in input
            .chunks_exact(block_size)
            .zip(output.chunks_exact_mut(block_size))
        {
            let in_block = GenericArray::from_slice(in_block);
            let out_block = GenericArray::from_mut_slice(out_block);
            if encrypt {
                cipher.encrypt_block_b2b(in_block, out_block);
            } else {
                cipher.decrypt_block_b2b(in_block, out_block);
            }
        }

        trace!(target: "primitives::block", blocks = input.len() / block_size, encrypt, "Processed");
        true
    }
}
