// Diffie-Hellman over the multiplicative group mod p

use super::{KeyAgreement, Party};
use crate::api::Dispatcher;
use crate::config::Config;
use crate::crypto::descriptor::Algorithm;
use crate::error::{Result, ValidationError};
use crate::utils::decimal::parse_unsigned;
use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::One;
use rand::Rng;
use serde::Serialize;
use std::ops::Range;

/// Public domain parameters `(p, g)`.
///
/// Primality of `p` is not checked; the simulator is a teaching tool and
/// accepts whatever the user types as long as the group is non-trivial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DhParams {
    pub prime: BigUint,
    pub generator: BigUint,
}

impl DhParams {
    /// `prime >= 3` and `1 <= generator < prime`.
    pub fn new(prime: BigUint, generator: BigUint) -> std::result::Result<Self, ValidationError> {
        if prime < BigUint::from(3u32) {
            return Err(ValidationError::InvalidDomainParameter("prime"));
        }
        if generator < BigUint::one() || generator >= prime {
            return Err(ValidationError::InvalidDomainParameter("generator"));
        }
        Ok(Self { prime, generator })
    }

    pub fn parse(prime: &str, generator: &str) -> std::result::Result<Self, ValidationError> {
        Self::new(
            parse_unsigned("prime", prime)?,
            parse_unsigned("generator", generator)?,
        )
    }
}

impl Default for DhParams {
    fn default() -> Self {
        let config = Config::global();
        Self::new(
            BigUint::from(config.dh_default_prime),
            BigUint::from(config.dh_default_generator),
        )
        .unwrap_or_else(|_| Self {
            prime: BigUint::from(23u32),
            generator: BigUint::from(5u32),
        })
    }
}

pub struct DiffieHellman {
    params: DhParams,
    private_range: Range<u64>,
}

impl DiffieHellman {
    pub fn new(params: DhParams) -> Self {
        Self {
            params,
            private_range: Config::global().dh_private_range(),
        }
    }

    /// Overrides the range private scalars are drawn from. An empty range is ignored.
    pub fn with_private_range(mut self, range: Range<u64>) -> Self {
        if !range.is_empty() {
            self.private_range = range;
        }
        self
    }

    pub fn params(&self) -> &DhParams {
        &self.params
    }

    fn draw_private(&self) -> BigUint {
        BigUint::from(rand::thread_rng().gen_range(self.private_range.clone()))
    }
}

#[async_trait]
impl KeyAgreement for DiffieHellman {
    type Public = BigUint;

    fn algorithm(&self) -> Algorithm {
        Algorithm::DiffieHellman
    }

    async fn generate(&self, dispatcher: &Dispatcher, party: &mut Party<BigUint>) -> Result<()> {
        let private = self.draw_private();
        party.set_private(private.clone());

        let public = dispatcher
            .dh_compute_public(&self.params.generator, &self.params.prime, &private)
            .await?;
        party.set_public(public);
        Ok(())
    }

    async fn compute_secret(
        &self,
        dispatcher: &Dispatcher,
        own_private: &BigUint,
        counterparty_public: &BigUint,
    ) -> Result<BigUint> {
        dispatcher
            .dh_compute_secret(counterparty_public, &self.params.prime, own_private)
            .await
    }
}
