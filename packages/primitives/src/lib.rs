// cipherbench reference primitives
// Provider implementations the core loads through the registry

#![warn(clippy::all)]

pub mod block;
pub mod classical;
pub mod curve;
pub mod diffie_hellman;
pub mod ecies;
pub mod loader;
pub mod rsa;

pub use loader::BuiltinLoader;

use cipherbench_core::Dispatcher;
use std::sync::Arc;

/// Dispatcher backed by the builtin providers.
pub fn builtin_dispatcher() -> Dispatcher {
    Dispatcher::with_loader(Arc::new(BuiltinLoader::new()))
}
