// Публичный API
// Entry point for user actions: requests, validation and dispatch.

pub mod dispatcher;
pub mod request;
pub mod validation;

pub use dispatcher::{Dispatcher, GeneratedKeys, KeyReport};
pub use request::{Action, KeyMaterial};
pub use validation::ValidatedKey;
