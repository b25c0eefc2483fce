use cipherbench_core::crypto::provider::DiffieHellmanPrimitive;
use cipherbench_core::ProviderError;
use num_bigint::BigUint;
use num_traits::Zero;

/// Modular exponentiation over unbounded integers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModularDiffieHellman;

fn check_prime(prime: &BigUint) -> Result<(), ProviderError> {
    if prime.is_zero() {
        return Err(ProviderError::InvalidInput("Prime must be positive".to_string()));
    }
    Ok(())
}

impl DiffieHellmanPrimitive for ModularDiffieHellman {
    fn compute_public(
        &self,
        generator: &BigUint,
        prime: &BigUint,
        private: &BigUint,
    ) -> Result<BigUint, ProviderError> {
        check_prime(prime)?;
        Ok(generator.modpow(private, prime))
    }

    fn compute_secret(
        &self,
        counterparty_public: &BigUint,
        prime: &BigUint,
        own_private: &BigUint,
    ) -> Result<BigUint, ProviderError> {
        check_prime(prime)?;
        Ok(counterparty_public.modpow(own_private, prime))
    }
}
