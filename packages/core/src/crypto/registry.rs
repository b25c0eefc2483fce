//! Provider Registry
//!
//! Loads and caches one [`Provider`] per module name. This is the only shared
//! mutable state of the core; it is constructed once and injected into the
//! dispatcher rather than living in a process-wide static.
//!
//! ## Concurrency contract
//!
//! Each module name owns a slot holding a [`tokio::sync::OnceCell`]. The slot is
//! created under a short synchronous lock, and the load itself runs inside the
//! cell, so concurrent first requests for the same module wait on the one
//! in-flight load instead of starting their own. A failed load leaves the cell
//! empty and the next request retries.

use crate::crypto::provider::{Provider, ProviderLoader};
use crate::error::{CoreError, ProviderError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

type Slot = Arc<OnceCell<Provider>>;

pub struct ProviderRegistry {
    loader: Arc<dyn ProviderLoader>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl ProviderRegistry {
    pub fn new(loader: Arc<dyn ProviderLoader>) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the provider for `module`, loading it on first use.
    ///
    /// # Errors
    ///
    /// [`CoreError::ProviderUnavailable`] when the loader fails; nothing is cached
    /// in that case.
    pub async fn get(&self, module: &str) -> Result<Provider> {
        let slot = self.slot(module);

        if let Some(provider) = slot.get() {
            return Ok(provider.clone());
        }

        let provider = slot
            .get_or_try_init(|| async {
                debug!(target: "registry", module, "Loading provider");
                let provider = self.loader.load(module).await?;
                info!(
                    target: "registry",
                    module,
                    capability = provider.capability(),
                    "Provider loaded"
                );
                Ok::<_, ProviderError>(provider)
            })
            .await
            .map_err(|source| {
                error!(target: "registry", module, error = %source, "Failed to load provider");
                CoreError::ProviderUnavailable {
                    module: module.to_string(),
                    source,
                }
            })?;

        Ok(provider.clone())
    }

    /// Whether `module` has a successfully loaded provider.
    pub fn is_loaded(&self, module: &str) -> bool {
        self.lock_slots()
            .get(module)
            .map(|slot| slot.initialized())
            .unwrap_or(false)
    }

    pub fn loaded_modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = self
            .lock_slots()
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(name, _)| name.clone())
            .collect();
        modules.sort();
        modules
    }

    fn slot(&self, module: &str) -> Slot {
        self.lock_slots()
            .entry(module.to_string())
            .or_default()
            .clone()
    }

    fn lock_slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot>> {
        // The map is only touched by short, panic-free critical sections.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
