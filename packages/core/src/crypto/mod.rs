//! Криптографический модуль
//!
//! # Архитектура
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  (CLI, tests)                                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Dispatcher (api)                         │
//! │  - Валидация до любого обращения к провайдеру               │
//! │  - Выбор кодека по дескриптору алгоритма                    │
//! └─────────────────────────────────────────────────────────────┘
//!                │                           │
//!                ▼                           ▼
//! ┌───────────────────────────┐  ┌──────────────────────────┐
//! │   Codecs                  │  │  KeyAgreement (handshake)│
//! │  - Block (PKCS#7, Base64) │  │  - Diffie-Hellman        │
//! │  - Text (classical)       │  │  - ECDH                  │
//! │  - Numeric (RSA, ECIES)   │  │  - Party state machine   │
//! └───────────────────────────┘  └──────────────────────────┘
//!                │                           │
//!                └─────────────┬─────────────┘
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              ProviderRegistry                               │
//! │  - Один провайдер на модуль, загрузка при первом запросе    │
//! │  - Конкурентные запросы ждут одну загрузку                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Provider (ProviderLoader)                      │
//! │  - Вся математика алгоритмов живёт здесь, не в core         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Модули
//!
//! - [`descriptor`]: каталог алгоритмов
//! - [`provider`]: capability traits и [`Provider`]
//! - [`registry`]: кэш загруженных провайдеров
//! - [`handshake`]: симулятор обмена ключами

pub mod descriptor;
pub mod handshake;
pub mod provider;
pub mod registry;

// ============================================================================
// Re-exports для удобства
// ============================================================================

pub use descriptor::{Algorithm, AlgorithmDescriptor, Family, KeyShape};
pub use provider::{Direction, Provider, ProviderLoader};
pub use registry::ProviderRegistry;
