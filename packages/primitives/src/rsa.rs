//! Textbook RSA applied byte by byte.
//!
//! Ciphertext is the comma-separated list of `byte^e mod n`. Key generation
//! picks two distinct small primes, so the whole thing is for illustration
//! only.

use cipherbench_core::crypto::provider::{Direction, RsaPrimitive};
use cipherbench_core::{Config, ProviderError};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use rand::Rng;
use std::ops::Range;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct TextbookRsa;

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

fn random_prime(range: Range<u64>, exclude: Option<u64>) -> Result<u64, ProviderError> {
    let candidates: Vec<u64> = range
        .filter(|&n| is_prime(n) && Some(n) != exclude)
        .collect();
    if candidates.is_empty() {
        return Err(ProviderError::KeyGeneration(
            "No primes available in the configured range".to_string(),
        ));
    }
    Ok(candidates[rand::thread_rng().gen_range(0..candidates.len())])
}

/// `a⁻¹ mod m`, if it exists.
fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    let (a, m) = (a as i64, m as i64);
    let gcd = a.extended_gcd(&m);
    if gcd.gcd != 1 {
        return None;
    }
    Some(gcd.x.rem_euclid(m) as u64)
}

/// `(n, e, d)` from two primes. `e` is the smallest value from 3 up coprime to φ.
pub fn derive_keys(p: u64, q: u64) -> Result<(u64, u64, u64), ProviderError> {
    let n = p * q;
    let phi = (p - 1) * (q - 1);
    let e = (3..phi)
        .find(|e| e.gcd(&phi) == 1)
        .ok_or_else(|| ProviderError::KeyGeneration(format!("No public exponent for φ = {}", phi)))?;
    let d = mod_inverse(e, phi)
        .ok_or_else(|| ProviderError::KeyGeneration(format!("{} has no inverse mod {}", e, phi)))?;
    Ok((n, e, d))
}

impl RsaPrimitive for TextbookRsa {
    fn generate_keys(&self) -> Result<String, ProviderError> {
        let range = Config::global().rsa_prime_range();
        let p = random_prime(range.clone(), None)?;
        let q = random_prime(range, Some(p))?;
        let (n, e, d) = derive_keys(p, q)?;

        debug!(target: "primitives::rsa", p, q, n, "Generated key pair");
        Ok(format!("{},{},{}", n, e, d))
    }

    fn process(
        &self,
        text: &str,
        modulus: &BigUint,
        exponent: &BigUint,
        direction: Direction,
    ) -> Result<String, ProviderError> {
        if modulus.is_zero() {
            return Err(ProviderError::InvalidInput("Modulus must be positive".to_string()));
        }

        match direction {
            Direction::Encrypt => Ok(text
                .bytes()
                .map(|b| BigUint::from(b).modpow(exponent, modulus).to_string())
                .collect::<Vec<_>>()
                .join(",")),
            Direction::Decrypt => {
                let bytes = text
                    .split(',')
                    .map(|part| {
                        let value: BigUint = part.trim().parse().map_err(|_| {
                            ProviderError::InvalidInput(format!("{:?} is not a number", part))
                        })?;
                        value
                            .modpow(exponent, modulus)
                            .to_u8()
                            .ok_or_else(|| {
                                ProviderError::InvalidInput(format!(
                                    "{} does not decrypt to a byte; check the key",
                                    part.trim()
                                ))
                            })
                    })
                    .collect::<Result<Vec<u8>, _>>()?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}
