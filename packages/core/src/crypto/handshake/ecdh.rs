// ECDH over the provider's curve

use super::{KeyAgreement, Party};
use crate::api::{Dispatcher, GeneratedKeys};
use crate::codec::CurvePoint;
use crate::crypto::descriptor::Algorithm;
use crate::error::{CoreError, Result};
use async_trait::async_trait;
use num_bigint::BigUint;

/// Key pairs come from the curve provider in one call, so a party goes from
/// uninitialized straight to having both keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ecdh;

#[async_trait]
impl KeyAgreement for Ecdh {
    type Public = CurvePoint;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Ecdh
    }

    async fn generate(&self, dispatcher: &Dispatcher, party: &mut Party<CurvePoint>) -> Result<()> {
        let pair = match dispatcher.generate_keys(Algorithm::Ecdh).await? {
            GeneratedKeys::Curve(pair) => pair,
            GeneratedKeys::Rsa(_) => {
                return Err(CoreError::UnsupportedOperation {
                    algorithm: Algorithm::Ecdh,
                    operation: "RSA key generation",
                })
            }
        };

        party.set_private(pair.private);
        party.set_public(pair.public);
        Ok(())
    }

    async fn compute_secret(
        &self,
        dispatcher: &Dispatcher,
        own_private: &BigUint,
        counterparty_public: &CurvePoint,
    ) -> Result<BigUint> {
        dispatcher
            .ecdh_compute_secret(own_private, counterparty_public)
            .await
    }
}
