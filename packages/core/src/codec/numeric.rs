//! Numeric Cipher Codec
//!
//! RSA and ECIES operate on decimal-string integers of unbounded size and on
//! curve points written as `"(x, y)"`. This module owns those encodings and
//! the marshalling into provider calls.
//!
//! RSA direction is an explicit [`Direction`] argument; the exponent's sign
//! carries no meaning.

use crate::crypto::descriptor::Algorithm;
use crate::crypto::provider::{Direction, EciesPrimitive, RsaPrimitive};
use crate::error::{CoreError, Result, ValidationError};
use crate::utils::decimal::parse_unsigned;
use num_bigint::BigUint;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurvePoint {
    pub x: BigUint,
    pub y: BigUint,
}

impl CurvePoint {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for CurvePoint {
    type Err = ValidationError;

    /// Accepts `"(x, y)"`, `"x,y"` and variants with surrounding whitespace.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed.strip_prefix('(').unwrap_or(trimmed);
        let inner = inner.strip_suffix(')').unwrap_or(inner);

        let mut parts = inner.split(',');
        let (x, y) = match (parts.next(), parts.next(), parts.next()) {
            (Some(x), Some(y), None) => (x, y),
            _ => return Err(ValidationError::MalformedPoint),
        };

        let x = parse_unsigned("x", x).map_err(|_| ValidationError::MalformedPoint)?;
        let y = parse_unsigned("y", y).map_err(|_| ValidationError::MalformedPoint)?;
        Ok(Self { x, y })
    }
}

/// Validated RSA key material. `private_exponent` is only needed to decrypt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKey {
    pub modulus: BigUint,
    pub public_exponent: BigUint,
    pub private_exponent: Option<BigUint>,
}

/// Freshly generated RSA key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeys {
    pub modulus: BigUint,
    pub public_exponent: BigUint,
    pub private_exponent: BigUint,
}

impl RsaKeys {
    /// `(e, n)`
    pub fn public_key(&self) -> String {
        format!("({}, {})", self.public_exponent, self.modulus)
    }

    /// `(d, n)`
    pub fn private_key(&self) -> String {
        format!("({}, {})", self.private_exponent, self.modulus)
    }

    pub fn as_key(&self) -> RsaKey {
        RsaKey {
            modulus: self.modulus.clone(),
            public_exponent: self.public_exponent.clone(),
            private_exponent: Some(self.private_exponent.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveKeyPair {
    pub private: BigUint,
    pub public: CurvePoint,
}

/// Splits a provider's `"a,b,c"` output into `N` decimal integers.
pub fn parse_key_tuple<const N: usize>(
    algorithm: Algorithm,
    raw: &str,
) -> Result<[BigUint; N]> {
    let malformed = || CoreError::PrimitiveProcessingFailed {
        algorithm,
        detail: format!("Malformed key tuple from provider: {:?}", raw),
    };

    let values: Vec<BigUint> = raw
        .split(',')
        .map(|part| parse_unsigned("key", part))
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| malformed())?;

    values.try_into().map_err(|_| malformed())
}

pub fn parse_rsa_keys(raw: &str) -> Result<RsaKeys> {
    let [modulus, public_exponent, private_exponent] = parse_key_tuple::<3>(Algorithm::Rsa, raw)?;
    Ok(RsaKeys {
        modulus,
        public_exponent,
        private_exponent,
    })
}

pub fn parse_curve_keys(algorithm: Algorithm, raw: &str) -> Result<CurveKeyPair> {
    let [private, x, y] = parse_key_tuple::<3>(algorithm, raw)?;
    Ok(CurveKeyPair {
        private,
        public: CurvePoint::new(x, y),
    })
}

pub struct RsaCodec<'a> {
    primitive: &'a dyn RsaPrimitive,
}

impl<'a> RsaCodec<'a> {
    pub fn new(primitive: &'a dyn RsaPrimitive) -> Self {
        Self { primitive }
    }

    pub fn encode(&self, text: &str, key: &RsaKey) -> Result<String> {
        self.primitive
            .process(text, &key.modulus, &key.public_exponent, Direction::Encrypt)
            .map_err(|e| CoreError::processing(Algorithm::Rsa, e))
    }

    pub fn decode(&self, text: &str, key: &RsaKey) -> Result<String> {
        let d = key
            .private_exponent
            .as_ref()
            .ok_or(ValidationError::MissingField("d"))?;

        self.primitive
            .process(text, &key.modulus, d, Direction::Decrypt)
            .map_err(|e| CoreError::processing(Algorithm::Rsa, e))
    }

    pub fn generate_keys(&self) -> Result<RsaKeys> {
        let raw = self
            .primitive
            .generate_keys()
            .map_err(|e| CoreError::processing(Algorithm::Rsa, e))?;
        parse_rsa_keys(&raw)
    }
}

pub struct EciesCodec<'a> {
    primitive: &'a dyn EciesPrimitive,
}

impl<'a> EciesCodec<'a> {
    pub fn new(primitive: &'a dyn EciesPrimitive) -> Self {
        Self { primitive }
    }

    pub fn encode(&self, text: &str, public: &CurvePoint) -> Result<String> {
        self.primitive
            .encrypt(text, &public.x, &public.y)
            .map_err(|e| CoreError::processing(Algorithm::Ecies, e))
    }

    pub fn decode(&self, text: &str, private: &BigUint) -> Result<String> {
        self.primitive
            .decrypt(text, private)
            .map_err(|e| CoreError::processing(Algorithm::Ecies, e))
    }
}
