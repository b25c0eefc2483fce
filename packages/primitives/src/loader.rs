use crate::block::{Aes128Ecb, DesEcb};
use crate::classical::{Playfair, RailFence, Vigenere};
use crate::curve::ToyCurve;
use crate::diffie_hellman::ModularDiffieHellman;
use crate::ecies::ToyEcies;
use crate::rsa::TextbookRsa;
use async_trait::async_trait;
use cipherbench_core::{Provider, ProviderError, ProviderLoader};
use std::sync::Arc;
use tracing::debug;

/// Module names served by [`BuiltinLoader`].
pub const MODULES: [&str; 9] = [
    "aes", "des", "vigenere", "playfair", "railfence", "rsa", "ecies", "ecc", "dh",
];

/// Serves the reference providers compiled into this crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinLoader;

impl BuiltinLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProviderLoader for BuiltinLoader {
    async fn load(&self, module: &str) -> Result<Provider, ProviderError> {
        let provider = match module {
            "aes" => Provider::Block(Arc::new(Aes128Ecb::new())),
            "des" => Provider::Block(Arc::new(DesEcb::new())),
            "vigenere" => Provider::Text(Arc::new(Vigenere)),
            "playfair" => Provider::Text(Arc::new(Playfair)),
            "railfence" => Provider::Text(Arc::new(RailFence)),
            "rsa" => Provider::Rsa(Arc::new(TextbookRsa)),
            "ecies" => Provider::Ecies(Arc::new(ToyEcies)),
            "ecc" => Provider::Curve(Arc::new(ToyCurve)),
            "dh" => Provider::DiffieHellman(Arc::new(ModularDiffieHellman)),
            other => return Err(ProviderError::UnknownModule(other.to_string())),
        };

        debug!(target: "primitives::loader", module, capability = provider.capability(), "Instantiated");
        Ok(provider)
    }
}
