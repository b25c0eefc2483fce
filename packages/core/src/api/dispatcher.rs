//! Operation Dispatcher
//!
//! Single entry point for user actions. Every request is validated before a
//! provider is resolved or a buffer acquired; then the descriptor selects the
//! codec, the registry supplies the provider, and the codec result (or the
//! first error) is returned unchanged.

use crate::api::request::{Action, KeyMaterial};
use crate::api::validation::{validate_key, validate_rail_count, validate_text, ValidatedKey};
use crate::codec::numeric::parse_curve_keys;
use crate::codec::{BlockCodec, CurveKeyPair, CurvePoint, EciesCodec, RsaCodec, RsaKeys, TextCodec};
use crate::crypto::descriptor::{Algorithm, Family};
use crate::crypto::provider::{Provider, ProviderLoader};
use crate::crypto::registry::ProviderRegistry;
use crate::error::{CoreError, Result};
use crate::utils::decimal::parse_unsigned;
use crate::visualizer::RailFenceGrid;
use num_bigint::BigUint;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Key material produced by [`Dispatcher::generate_keys`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedKeys {
    Rsa(RsaKeys),
    Curve(CurveKeyPair),
}

/// Flat, display-ready rendering of [`GeneratedKeys`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyReport {
    pub algorithm: Algorithm,
    pub public: String,
    pub private: String,
}

impl GeneratedKeys {
    pub fn report(&self, algorithm: Algorithm) -> KeyReport {
        match self {
            GeneratedKeys::Rsa(keys) => KeyReport {
                algorithm,
                public: keys.public_key(),
                private: keys.private_key(),
            },
            GeneratedKeys::Curve(pair) => KeyReport {
                algorithm,
                public: pair.public.to_string(),
                private: pair.private.to_string(),
            },
        }
    }
}

pub struct Dispatcher {
    registry: Arc<ProviderRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn with_loader(loader: Arc<dyn ProviderLoader>) -> Self {
        Self::new(Arc::new(ProviderRegistry::new(loader)))
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Encrypts or decrypts `text` with `algorithm`.
    ///
    /// # Errors
    ///
    /// Validation errors are raised before the provider is resolved. After
    /// that, the codec's error is returned as is.
    pub async fn execute(
        &self,
        algorithm: Algorithm,
        action: Action,
        text: &str,
        key: &KeyMaterial,
    ) -> Result<String> {
        let result = self.run(algorithm, action, text, key).await;

        match &result {
            Ok(output) => info!(
                target: "dispatcher",
                algorithm = %algorithm,
                action = %action,
                output_len = output.len(),
                "Operation completed"
            ),
            Err(err) if err.is_validation() => debug!(
                target: "dispatcher",
                algorithm = %algorithm,
                action = %action,
                error = %err,
                "Request rejected"
            ),
            Err(err) => warn!(
                target: "dispatcher",
                algorithm = %algorithm,
                action = %action,
                error = %err,
                "Operation failed"
            ),
        }

        result
    }

    async fn run(
        &self,
        algorithm: Algorithm,
        action: Action,
        text: &str,
        key: &KeyMaterial,
    ) -> Result<String> {
        validate_text(text)?;
        let descriptor = algorithm.descriptor();
        if descriptor.family == Family::Exchange {
            return Err(CoreError::UnsupportedOperation {
                algorithm,
                operation: "encryption",
            });
        }
        let key = validate_key(algorithm, action, key)?;

        let module = descriptor.module;
        let provider = self.registry.get(module).await?;
        debug!(
            target: "dispatcher",
            algorithm = %algorithm,
            action = %action,
            module,
            "Dispatching"
        );

        match key {
            ValidatedKey::Block(secret) => {
                let codec = BlockCodec::new(algorithm, require(module, "block", provider.as_block())?)?;
                match action {
                    Action::Encrypt => codec.encode(text, &secret),
                    Action::Decrypt => codec.decode(text, &secret),
                }
            }
            ValidatedKey::Classical(key) => {
                let codec = TextCodec::new(algorithm, require(module, "text", provider.as_text())?);
                match action {
                    Action::Encrypt => codec.encode(text, &key),
                    Action::Decrypt => codec.decode(text, &key),
                }
            }
            ValidatedKey::Rsa(key) => {
                let codec = RsaCodec::new(require(module, "rsa", provider.as_rsa())?);
                match action {
                    Action::Encrypt => codec.encode(text, &key),
                    Action::Decrypt => codec.decode(text, &key),
                }
            }
            ValidatedKey::EciesPublic(point) => {
                EciesCodec::new(require(module, "ecies", provider.as_ecies())?).encode(text, &point)
            }
            ValidatedKey::EciesPrivate(private) => {
                EciesCodec::new(require(module, "ecies", provider.as_ecies())?).decode(text, &private)
            }
        }
    }

    /// Generates fresh key material for RSA, ECIES or ECDH.
    pub async fn generate_keys(&self, algorithm: Algorithm) -> Result<GeneratedKeys> {
        let module = algorithm
            .descriptor()
            .keygen_module
            .ok_or(CoreError::UnsupportedOperation {
                algorithm,
                operation: "key generation",
            })?;
        let provider = self.registry.get(module).await?;

        let keys = match algorithm {
            Algorithm::Rsa => {
                RsaCodec::new(require(module, "rsa", provider.as_rsa())?)
                    .generate_keys()
                    .map(GeneratedKeys::Rsa)?
            }
            _ => {
                let raw = require(module, "curve", provider.as_curve())?
                    .generate_keys()
                    .map_err(|e| CoreError::processing(algorithm, e))?;
                GeneratedKeys::Curve(parse_curve_keys(algorithm, &raw)?)
            }
        };

        debug!(target: "dispatcher", algorithm = %algorithm, module, "Keys generated");
        Ok(keys)
    }

    /// Lays `text` out on a Rail Fence grid after the same checks as Rail Fence encryption.
    pub fn visualize(&self, text: &str, rails: &str) -> Result<RailFenceGrid> {
        validate_text(text)?;
        let rails = validate_rail_count(rails)?;
        Ok(RailFenceGrid::build(text, rails)?)
    }

    /// `generator^private mod prime` via the Diffie-Hellman provider.
    pub async fn dh_compute_public(
        &self,
        generator: &BigUint,
        prime: &BigUint,
        private: &BigUint,
    ) -> Result<BigUint> {
        let provider = self.exchange_provider(Algorithm::DiffieHellman).await?;
        require(provider.module, "diffie-hellman", provider.inner.as_diffie_hellman())?
            .compute_public(generator, prime, private)
            .map_err(|e| CoreError::processing(Algorithm::DiffieHellman, e))
    }

    /// `counterparty_public^own_private mod prime` via the Diffie-Hellman provider.
    pub async fn dh_compute_secret(
        &self,
        counterparty_public: &BigUint,
        prime: &BigUint,
        own_private: &BigUint,
    ) -> Result<BigUint> {
        let provider = self.exchange_provider(Algorithm::DiffieHellman).await?;
        require(provider.module, "diffie-hellman", provider.inner.as_diffie_hellman())?
            .compute_secret(counterparty_public, prime, own_private)
            .map_err(|e| CoreError::processing(Algorithm::DiffieHellman, e))
    }

    /// Shared x-coordinate of `own_private * counterparty_public` via the curve provider.
    pub async fn ecdh_compute_secret(
        &self,
        own_private: &BigUint,
        counterparty_public: &CurvePoint,
    ) -> Result<BigUint> {
        let provider = self.exchange_provider(Algorithm::Ecdh).await?;
        let raw = require(provider.module, "curve", provider.inner.as_curve())?
            .compute_secret(own_private, &counterparty_public.x, &counterparty_public.y)
            .map_err(|e| CoreError::processing(Algorithm::Ecdh, e))?;

        parse_unsigned("secret", &raw).map_err(|_| CoreError::PrimitiveProcessingFailed {
            algorithm: Algorithm::Ecdh,
            detail: format!("Malformed shared secret from provider: {:?}", raw),
        })
    }

    async fn exchange_provider(&self, algorithm: Algorithm) -> Result<ResolvedProvider> {
        let module = algorithm.descriptor().module;
        let inner = self.registry.get(module).await?;
        Ok(ResolvedProvider { module, inner })
    }
}

struct ResolvedProvider {
    module: &'static str,
    inner: Provider,
}

fn require<'p, T: ?Sized>(
    module: &str,
    expected: &'static str,
    primitive: Option<&'p T>,
) -> Result<&'p T> {
    primitive.ok_or_else(|| CoreError::ProviderMismatch {
        module: module.to_string(),
        expected,
    })
}
