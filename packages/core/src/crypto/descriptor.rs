//! Static algorithm catalogue.
//!
//! Every algorithm maps to exactly one [`Family`]; the family selects the codec
//! and the validation rules, the [`KeyShape`] tells validation what key
//! material to expect.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Aes,
    Des,
    Vigenere,
    Playfair,
    RailFence,
    Rsa,
    Ecies,
    #[serde(rename = "dh")]
    DiffieHellman,
    Ecdh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Block,
    Classical,
    Numeric,
    Exchange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyShape {
    /// Byte key whose length equals the block size.
    FixedBytes(usize),
    /// `^[A-Za-z]+$`
    Keyword,
    /// Integer >= 2.
    RailCount,
    /// (n, e, d)
    RsaTriple,
    /// Public point for encryption, private scalar for decryption.
    CurvePoint,
    /// Prime, generator and a private scalar.
    DiffieHellman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    pub algorithm: Algorithm,
    pub name: &'static str,
    pub family: Family,
    pub key_shape: KeyShape,
    /// Provider module performing the algorithm's primitive operations.
    pub module: &'static str,
    /// Provider module producing key material, if the algorithm has key generation.
    pub keygen_module: Option<&'static str>,
}

impl AlgorithmDescriptor {
    /// Block size in bytes for block ciphers.
    pub fn block_size(&self) -> Option<usize> {
        match self.key_shape {
            KeyShape::FixedBytes(size) => Some(size),
            _ => None,
        }
    }
}

pub const DESCRIPTORS: [AlgorithmDescriptor; 9] = [
    AlgorithmDescriptor {
        algorithm: Algorithm::Aes,
        name: "aes",
        family: Family::Block,
        key_shape: KeyShape::FixedBytes(16),
        module: "aes",
        keygen_module: None,
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Des,
        name: "des",
        family: Family::Block,
        key_shape: KeyShape::FixedBytes(8),
        module: "des",
        keygen_module: None,
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Vigenere,
        name: "vigenere",
        family: Family::Classical,
        key_shape: KeyShape::Keyword,
        module: "vigenere",
        keygen_module: None,
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Playfair,
        name: "playfair",
        family: Family::Classical,
        key_shape: KeyShape::Keyword,
        module: "playfair",
        keygen_module: None,
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::RailFence,
        name: "railfence",
        family: Family::Classical,
        key_shape: KeyShape::RailCount,
        module: "railfence",
        keygen_module: None,
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Rsa,
        name: "rsa",
        family: Family::Numeric,
        key_shape: KeyShape::RsaTriple,
        module: "rsa",
        keygen_module: Some("rsa"),
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Ecies,
        name: "ecies",
        family: Family::Numeric,
        key_shape: KeyShape::CurvePoint,
        module: "ecies",
        keygen_module: Some("ecc"),
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::DiffieHellman,
        name: "dh",
        family: Family::Exchange,
        key_shape: KeyShape::DiffieHellman,
        module: "dh",
        keygen_module: None,
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Ecdh,
        name: "ecdh",
        family: Family::Exchange,
        key_shape: KeyShape::CurvePoint,
        module: "ecc",
        keygen_module: Some("ecc"),
    },
];

impl Algorithm {
    pub const ALL: [Algorithm; 9] = [
        Algorithm::Aes,
        Algorithm::Des,
        Algorithm::Vigenere,
        Algorithm::Playfair,
        Algorithm::RailFence,
        Algorithm::Rsa,
        Algorithm::Ecies,
        Algorithm::DiffieHellman,
        Algorithm::Ecdh,
    ];

    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        // DESCRIPTORS is declared in the same order as the enum.
        &DESCRIPTORS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn family(self) -> Family {
        self.descriptor().family
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_uppercase())
    }
}

impl FromStr for Algorithm {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let canonical = match normalized.as_str() {
            "ecc_encryption" => "ecies",
            "rail-fence" | "rail_fence" => "railfence",
            "diffie-hellman" | "diffie_hellman" => "dh",
            other => other,
        };

        DESCRIPTORS
            .iter()
            .find(|d| d.name == canonical)
            .map(|d| d.algorithm)
            .ok_or_else(|| ValidationError::UnknownAlgorithm(s.to_string()))
    }
}
