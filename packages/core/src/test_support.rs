// Mock providers for unit tests. None of these do real cryptography.

use crate::api::Dispatcher;
use crate::crypto::provider::{
    BlockPrimitive, BufferAllocator, CurvePrimitive, DiffieHellmanPrimitive, Direction,
    EciesPrimitive, Provider, ProviderLoader, RsaPrimitive, TextKey, TextPrimitive,
};
use crate::error::ProviderError;
use async_trait::async_trait;
use num_bigint::BigUint;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Heap allocator that counts live and total allocations and can run dry.
#[derive(Debug, Default)]
pub struct CountingAllocator {
    live: AtomicUsize,
    total: AtomicUsize,
    limit: Option<usize>,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every allocation after the first `limit`.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn total_allocations(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl BufferAllocator for CountingAllocator {
    fn allocate(&self, len: usize) -> Option<Vec<u8>> {
        if let Some(limit) = self.limit {
            if self.total.load(Ordering::SeqCst) >= limit {
                return None;
            }
        }
        self.total.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Some(vec![0u8; len])
    }

    fn release(&self, _buffer: Vec<u8>) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// XORs every block with the key. Its own inverse.
#[derive(Debug, Default)]
pub struct XorBlock {
    pub allocator: CountingAllocator,
    failing: bool,
}

impl XorBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_allocation_limit(limit: usize) -> Self {
        Self {
            allocator: CountingAllocator::with_limit(limit),
            failing: false,
        }
    }
}

impl BlockPrimitive for XorBlock {
    fn process(&self, input: &[u8], key: &[u8], output: &mut [u8], _encrypt: bool) -> bool {
        if self.failing
            || key.is_empty()
            || input.len() != output.len()
            || input.len() % key.len() != 0
        {
            return false;
        }
        for (i, (out, byte)) in output.iter_mut().zip(input).enumerate() {
            *out = byte ^ key[i % key.len()];
        }
        true
    }

    fn allocator(&self) -> &dyn BufferAllocator {
        &self.allocator
    }
}

/// Echoes `"{direction}|{text}|{key}"`.
#[derive(Debug, Default)]
pub struct RecordingText;

fn render_text_key(key: TextKey<'_>) -> String {
    match key {
        TextKey::Keyword(keyword) => keyword.to_string(),
        TextKey::Rails(rails) => rails.to_string(),
    }
}

impl TextPrimitive for RecordingText {
    fn encrypt(&self, text: &str, key: TextKey<'_>) -> Result<String, ProviderError> {
        Ok(format!("encrypt|{}|{}", text, render_text_key(key)))
    }

    fn decrypt(&self, text: &str, key: TextKey<'_>) -> Result<String, ProviderError> {
        Ok(format!("decrypt|{}|{}", text, render_text_key(key)))
    }
}

/// Textbook per-byte RSA with the fixed key (n, e, d) = (3233, 17, 2753).
#[derive(Debug, Default)]
pub struct ToyRsa {
    calls: Mutex<Vec<(BigUint, Direction)>>,
}

impl ToyRsa {
    pub fn calls(&self) -> Vec<(BigUint, Direction)> {
        self.calls.lock().unwrap().clone()
    }
}

impl RsaPrimitive for ToyRsa {
    fn generate_keys(&self) -> Result<String, ProviderError> {
        Ok("3233,17,2753".to_string())
    }

    fn process(
        &self,
        text: &str,
        modulus: &BigUint,
        exponent: &BigUint,
        direction: Direction,
    ) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push((exponent.clone(), direction));

        match direction {
            Direction::Encrypt => Ok(text
                .bytes()
                .map(|b| BigUint::from(b).modpow(exponent, modulus).to_string())
                .collect::<Vec<_>>()
                .join(",")),
            Direction::Decrypt => {
                let bytes = text
                    .split(',')
                    .map(|c| {
                        let c: BigUint = c
                            .trim()
                            .parse()
                            .map_err(|_| ProviderError::InvalidInput(c.to_string()))?;
                        u8::try_from(c.modpow(exponent, modulus))
                            .map_err(|_| ProviderError::InvalidInput("not a byte".into()))
                    })
                    .collect::<Result<Vec<u8>, _>>()?;
                String::from_utf8(bytes).map_err(|e| ProviderError::InvalidInput(e.to_string()))
            }
        }
    }
}

/// Echoes `"enc|{text}|{x}|{y}"` and `"dec|{text}|{private}"`.
#[derive(Debug, Default)]
pub struct RecordingEcies;

impl EciesPrimitive for RecordingEcies {
    fn encrypt(&self, text: &str, x: &BigUint, y: &BigUint) -> Result<String, ProviderError> {
        Ok(format!("enc|{}|{}|{}", text, x, y))
    }

    fn decrypt(&self, text: &str, private: &BigUint) -> Result<String, ProviderError> {
        Ok(format!("dec|{}|{}", text, private))
    }
}

const TOY_GROUP_PRIME: u32 = 3851;
const TOY_GROUP_GENERATOR: u32 = 2;

/// Stands in for a curve with the multiplicative group mod a small prime.
/// Public "points" are `(g^k, 1)` and the secret is `x^k`.
#[derive(Debug, Default)]
pub struct ToyCurve;

impl CurvePrimitive for ToyCurve {
    fn generate_keys(&self) -> Result<String, ProviderError> {
        let private = BigUint::from(rand::thread_rng().gen_range(50u32..250));
        let x = BigUint::from(TOY_GROUP_GENERATOR).modpow(&private, &BigUint::from(TOY_GROUP_PRIME));
        Ok(format!("{},{},1", private, x))
    }

    fn compute_secret(
        &self,
        own_private: &BigUint,
        x: &BigUint,
        _y: &BigUint,
    ) -> Result<String, ProviderError> {
        Ok(x.modpow(own_private, &BigUint::from(TOY_GROUP_PRIME)).to_string())
    }
}

#[derive(Debug, Default)]
pub struct ToyDiffieHellman;

impl DiffieHellmanPrimitive for ToyDiffieHellman {
    fn compute_public(
        &self,
        generator: &BigUint,
        prime: &BigUint,
        private: &BigUint,
    ) -> Result<BigUint, ProviderError> {
        Ok(generator.modpow(private, prime))
    }

    fn compute_secret(
        &self,
        counterparty_public: &BigUint,
        prime: &BigUint,
        own_private: &BigUint,
    ) -> Result<BigUint, ProviderError> {
        Ok(counterparty_public.modpow(own_private, prime))
    }
}

/// Loader over the mocks above, counting load attempts per module.
#[derive(Debug, Default)]
pub struct MockLoader {
    delay: Option<Duration>,
    failures_left: AtomicUsize,
    aliases: HashMap<String, String>,
    loads: Mutex<HashMap<String, usize>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The first `n` load attempts, whatever the module, fail with `LoadFailed`.
    pub fn failing_first(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    /// Serves `target`'s provider when `module` is requested.
    pub fn with_alias(mut self, module: &str, target: &str) -> Self {
        self.aliases.insert(module.to_string(), target.to_string());
        self
    }

    pub fn load_count(&self, module: &str) -> usize {
        self.loads.lock().unwrap().get(module).copied().unwrap_or(0)
    }

    pub fn total_loads(&self) -> usize {
        self.loads.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl ProviderLoader for MockLoader {
    async fn load(&self, module: &str) -> Result<Provider, ProviderError> {
        *self.loads.lock().unwrap().entry(module.to_string()).or_default() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(ProviderError::LoadFailed(format!("{} (injected)", module)));
        }

        let target = self.aliases.get(module).map(String::as_str).unwrap_or(module);
        match target {
            "aes" | "des" => Ok(Provider::Block(Arc::new(XorBlock::new()))),
            "vigenere" | "playfair" | "railfence" => Ok(Provider::Text(Arc::new(RecordingText))),
            "rsa" => Ok(Provider::Rsa(Arc::new(ToyRsa::default()))),
            "ecies" => Ok(Provider::Ecies(Arc::new(RecordingEcies))),
            "ecc" => Ok(Provider::Curve(Arc::new(ToyCurve))),
            "dh" => Ok(Provider::DiffieHellman(Arc::new(ToyDiffieHellman))),
            other => Err(ProviderError::UnknownModule(other.to_string())),
        }
    }
}

pub fn mock_dispatcher() -> Dispatcher {
    Dispatcher::with_loader(Arc::new(MockLoader::new()))
}
