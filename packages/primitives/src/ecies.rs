//! ECIES over the toy curve.
//!
//! An ephemeral scalar `k` gives `R = k·G` and the shared point `k·Q`; its
//! x-coordinate is stretched into an AES-128 key with HKDF-SHA256, and the
//! PKCS#7-padded message is encrypted in ECB mode. The wire text is
//! `"Rx,Ry,b0 b1 b2 ..."` with the ciphertext bytes in decimal.

use crate::block::Aes128Ecb;
use crate::curve::{random_scalar, Point, GENERATOR};
use cipherbench_core::codec::block::{pad, unpad};
use cipherbench_core::crypto::provider::{BlockPrimitive, EciesPrimitive};
use cipherbench_core::ProviderError;
use hkdf::Hkdf;
use num_bigint::BigUint;
use sha2::Sha256;
use zeroize::Zeroizing;

const BLOCK_SIZE: usize = 16;
const KDF_INFO: &[u8] = b"cipherbench-ecies-aes128";

#[derive(Debug, Default, Clone, Copy)]
pub struct ToyEcies;

fn derive_key(shared: Point) -> Result<Zeroizing<[u8; BLOCK_SIZE]>, ProviderError> {
    let shared_x = match shared {
        Point::Affine(x, _) => x,
        Point::Infinity => {
            return Err(ProviderError::InvalidInput(
                "Shared point is at infinity".to_string(),
            ))
        }
    };

    let mut key = Zeroizing::new([0u8; BLOCK_SIZE]);
    Hkdf::<Sha256>::new(None, &shared_x.to_be_bytes())
        .expand(KDF_INFO, &mut key[..])
        .map_err(|e| ProviderError::Other(e.to_string()))?;
    Ok(key)
}

fn run_aes(data: &[u8], key: &[u8], encrypt: bool) -> Result<Vec<u8>, ProviderError> {
    let mut output = vec![0u8; data.len()];
    if !Aes128Ecb::new().process(data, key, &mut output, encrypt) {
        return Err(ProviderError::InvalidInput("AES rejected the buffer".to_string()));
    }
    Ok(output)
}

fn parse_wire(text: &str) -> Result<(BigUint, BigUint, Vec<u8>), ProviderError> {
    let malformed = || {
        ProviderError::InvalidInput("Ciphertext must look like \"Rx,Ry,b0 b1 ...\"".to_string())
    };

    let mut parts = text.trim().splitn(3, ',');
    let (rx, ry, body) = match (parts.next(), parts.next(), parts.next()) {
        (Some(rx), Some(ry), Some(body)) => (rx, ry, body),
        _ => return Err(malformed()),
    };

    let rx: BigUint = rx.trim().parse().map_err(|_| malformed())?;
    let ry: BigUint = ry.trim().parse().map_err(|_| malformed())?;
    let bytes = body
        .split_whitespace()
        .map(|b| b.parse::<u8>().map_err(|_| malformed()))
        .collect::<Result<Vec<u8>, _>>()?;

    Ok((rx, ry, bytes))
}

impl EciesPrimitive for ToyEcies {
    fn encrypt(&self, text: &str, x: &BigUint, y: &BigUint) -> Result<String, ProviderError> {
        let recipient = Point::from_coordinates(x, y)?;
        let ephemeral = random_scalar();

        let (rx, ry) = match GENERATOR.multiply(&ephemeral) {
            Point::Affine(rx, ry) => (rx, ry),
            Point::Infinity => {
                return Err(ProviderError::KeyGeneration(
                    "Ephemeral scalar is a multiple of the group order".to_string(),
                ))
            }
        };
        let key = derive_key(recipient.multiply(&ephemeral))?;

        let padded = Zeroizing::new(pad(text.as_bytes(), BLOCK_SIZE));
        let ciphertext = run_aes(&padded, &key[..], true)?;

        let body = ciphertext
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(format!("{},{},{}", rx, ry, body))
    }

    fn decrypt(&self, text: &str, private: &BigUint) -> Result<String, ProviderError> {
        let (rx, ry, ciphertext) = parse_wire(text)?;
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(ProviderError::InvalidInput(format!(
                "Ciphertext length must be a non-zero multiple of {}, got {}",
                BLOCK_SIZE,
                ciphertext.len()
            )));
        }

        let ephemeral = Point::from_coordinates(&rx, &ry)?;
        let key = derive_key(ephemeral.multiply(private))?;

        let plaintext = Zeroizing::new(run_aes(&ciphertext, &key[..], false)?);
        Ok(String::from_utf8_lossy(unpad(&plaintext, BLOCK_SIZE)).into_owned())
    }
}
