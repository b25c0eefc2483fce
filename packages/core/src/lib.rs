// cipherbench core
// Provider-agnostic cipher workbench: validation, codecs, dispatch, key exchange

#![warn(clippy::all)]
#![allow(clippy::should_implement_trait)]

// Модули
pub mod api;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod utils;
pub mod visualizer;

#[cfg(test)]
mod test_support;

// Re-exports для удобства
pub use api::{Action, Dispatcher, GeneratedKeys, KeyMaterial, KeyReport};
pub use config::Config;
pub use crypto::handshake::{
    AgreementOutcome, DhParams, DiffieHellman, Ecdh, KeyAgreement, KeyExchangeSession, PartyState,
    Role,
};
pub use crypto::{Algorithm, Direction, Provider, ProviderLoader, ProviderRegistry};
pub use error::{CoreError, ProviderError, Result, ValidationError};
pub use visualizer::RailFenceGrid;
