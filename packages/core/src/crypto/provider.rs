//! Capability contract between the core and the primitive providers.
//!
//! A provider performs the actual mathematics of one algorithm. The core never
//! does; it only marshals values into the shape a provider expects and back.
//! Each family exposes a fixed operation set, modelled as one trait per
//! capability and collected into the tagged [`Provider`] enum.

use crate::error::ProviderError;
use async_trait::async_trait;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroize;

/// Direction of an RSA operation.
///
/// Passed alongside the exponent instead of being folded into its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Allocator owning the memory handed to a block primitive.
pub trait BufferAllocator: Send + Sync {
    /// Returns a zero-filled buffer of `len` bytes, or `None` when the
    /// provider's memory is exhausted.
    fn allocate(&self, len: usize) -> Option<Vec<u8>>;

    /// Takes back a buffer previously returned by [`allocate`](Self::allocate).
    fn release(&self, buffer: Vec<u8>);
}

/// Default allocator: plain heap memory, wiped on release.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    fn allocate(&self, len: usize) -> Option<Vec<u8>> {
        Some(vec![0u8; len])
    }

    fn release(&self, mut buffer: Vec<u8>) {
        buffer.zeroize();
    }
}

static HEAP_ALLOCATOR: HeapAllocator = HeapAllocator;

/// Fixed-block symmetric cipher (AES, DES).
pub trait BlockPrimitive: Send + Sync {
    /// Processes `input` into `output` block by block.
    ///
    /// `input.len()` is the length argument of the contract and always equals
    /// `output.len()`. Returns `false` when the primitive rejects the call.
    fn process(&self, input: &[u8], key: &[u8], output: &mut [u8], encrypt: bool) -> bool;

    /// Allocator the codec must draw the primitive's buffers from.
    fn allocator(&self) -> &dyn BufferAllocator {
        &HEAP_ALLOCATOR
    }
}

/// Key accepted by a text-in/text-out classical cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey<'a> {
    Keyword(&'a str),
    Rails(usize),
}

/// Classical cipher (Vigenère, Playfair, Rail Fence).
pub trait TextPrimitive: Send + Sync {
    fn encrypt(&self, text: &str, key: TextKey<'_>) -> Result<String, ProviderError>;
    fn decrypt(&self, text: &str, key: TextKey<'_>) -> Result<String, ProviderError>;
}

pub trait RsaPrimitive: Send + Sync {
    /// Returns `"n,e,d"` as decimal strings.
    fn generate_keys(&self) -> Result<String, ProviderError>;

    fn process(
        &self,
        text: &str,
        modulus: &BigUint,
        exponent: &BigUint,
        direction: Direction,
    ) -> Result<String, ProviderError>;
}

pub trait EciesPrimitive: Send + Sync {
    fn encrypt(&self, text: &str, x: &BigUint, y: &BigUint) -> Result<String, ProviderError>;
    fn decrypt(&self, text: &str, private: &BigUint) -> Result<String, ProviderError>;
}

/// Elliptic-curve key pairs and scalar multiplication for ECDH.
pub trait CurvePrimitive: Send + Sync {
    /// Returns `"priv,x,y"` as decimal strings.
    fn generate_keys(&self) -> Result<String, ProviderError>;

    /// x-coordinate of `own_private * (x, y)` as a decimal string.
    fn compute_secret(
        &self,
        own_private: &BigUint,
        x: &BigUint,
        y: &BigUint,
    ) -> Result<String, ProviderError>;
}

pub trait DiffieHellmanPrimitive: Send + Sync {
    /// `generator^private mod prime`
    fn compute_public(
        &self,
        generator: &BigUint,
        prime: &BigUint,
        private: &BigUint,
    ) -> Result<BigUint, ProviderError>;

    /// `counterparty_public^own_private mod prime`
    fn compute_secret(
        &self,
        counterparty_public: &BigUint,
        prime: &BigUint,
        own_private: &BigUint,
    ) -> Result<BigUint, ProviderError>;
}

/// A loaded provider, tagged by the capability it offers.
#[derive(Clone)]
pub enum Provider {
    Block(Arc<dyn BlockPrimitive>),
    Text(Arc<dyn TextPrimitive>),
    Rsa(Arc<dyn RsaPrimitive>),
    Ecies(Arc<dyn EciesPrimitive>),
    Curve(Arc<dyn CurvePrimitive>),
    DiffieHellman(Arc<dyn DiffieHellmanPrimitive>),
}

impl Provider {
    pub fn capability(&self) -> &'static str {
        match self {
            Provider::Block(_) => "block",
            Provider::Text(_) => "text",
            Provider::Rsa(_) => "rsa",
            Provider::Ecies(_) => "ecies",
            Provider::Curve(_) => "curve",
            Provider::DiffieHellman(_) => "diffie-hellman",
        }
    }

    pub fn as_block(&self) -> Option<&dyn BlockPrimitive> {
        match self {
            Provider::Block(p) => Some(p.as_ref()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&dyn TextPrimitive> {
        match self {
            Provider::Text(p) => Some(p.as_ref()),
            _ => None,
        }
    }

    pub fn as_rsa(&self) -> Option<&dyn RsaPrimitive> {
        match self {
            Provider::Rsa(p) => Some(p.as_ref()),
            _ => None,
        }
    }

    pub fn as_ecies(&self) -> Option<&dyn EciesPrimitive> {
        match self {
            Provider::Ecies(p) => Some(p.as_ref()),
            _ => None,
        }
    }

    pub fn as_curve(&self) -> Option<&dyn CurvePrimitive> {
        match self {
            Provider::Curve(p) => Some(p.as_ref()),
            _ => None,
        }
    }

    pub fn as_diffie_hellman(&self) -> Option<&dyn DiffieHellmanPrimitive> {
        match self {
            Provider::DiffieHellman(p) => Some(p.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Provider").field(&self.capability()).finish()
    }
}

/// Source of provider instances, consulted by the registry on first use of a module.
///
/// Loading may suspend (fetching and instantiating the implementation).
#[async_trait]
pub trait ProviderLoader: Send + Sync {
    async fn load(&self, module: &str) -> Result<Provider, ProviderError>;
}
