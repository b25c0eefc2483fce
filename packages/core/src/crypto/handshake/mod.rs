//! Key Agreement Simulator
//!
//! Drives a two-party key exchange (Diffie-Hellman or ECDH) through the
//! [`Dispatcher`], once per party, and reports whether both sides arrived at
//! the same shared secret.
//!
//! ## Dataflow
//! ```text
//! Party A                                    Party B
//! =======                                    =======
//! generate(A)                                generate(B)
//!   private_A ← scalar                         private_B ← scalar
//!   public_A  ← provider(private_A)            public_B  ← provider(private_B)
//!
//!                    compute_secrets()
//!   secret_A ← provider(private_A, public_B)
//!                                              secret_B ← provider(private_B, public_A)
//!
//!                 agrees() ⇔ secret_A == secret_B
//! ```
//!
//! Each party walks `Uninitialized → PrivateGenerated → PublicComputed →
//! SecretComputed`. Regenerating a party's keys drops any secret computed from
//! the old ones.

use crate::api::Dispatcher;
use crate::crypto::descriptor::Algorithm;
use crate::error::{CoreError, Result};
use async_trait::async_trait;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

pub mod diffie_hellman;
pub mod ecdh;

pub use diffie_hellman::{DhParams, DiffieHellman};
pub use ecdh::Ecdh;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    A,
    B,
}

impl Role {
    pub fn counterparty(self) -> Role {
        match self {
            Role::A => Role::B,
            Role::B => Role::A,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::A => f.write_str("A"),
            Role::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyState {
    Uninitialized,
    PrivateGenerated,
    PublicComputed,
    SecretComputed,
}

/// One side of the exchange. `P` is the shape of a public key.
#[derive(Debug, Clone)]
pub struct Party<P> {
    role: Role,
    private: Option<BigUint>,
    public: Option<P>,
    secret: Option<BigUint>,
}

impl<P> Party<P> {
    fn new(role: Role) -> Self {
        Self {
            role,
            private: None,
            public: None,
            secret: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> PartyState {
        match (&self.private, &self.public, &self.secret) {
            (Some(_), Some(_), Some(_)) => PartyState::SecretComputed,
            (Some(_), Some(_), None) => PartyState::PublicComputed,
            (Some(_), None, _) => PartyState::PrivateGenerated,
            (None, _, _) => PartyState::Uninitialized,
        }
    }

    pub fn private(&self) -> Option<&BigUint> {
        self.private.as_ref()
    }

    pub fn public(&self) -> Option<&P> {
        self.public.as_ref()
    }

    pub fn secret(&self) -> Option<&BigUint> {
        self.secret.as_ref()
    }

    /// Records a fresh private scalar, discarding everything derived from the old one.
    pub fn set_private(&mut self, private: BigUint) {
        self.private = Some(private);
        self.public = None;
        self.secret = None;
    }

    /// Records the public key. Ignored until a private scalar exists.
    pub fn set_public(&mut self, public: P) {
        if self.private.is_some() {
            self.public = Some(public);
            self.secret = None;
        }
    }

    fn keys(&self) -> Result<(&BigUint, &P)> {
        match (&self.private, &self.public) {
            (Some(private), Some(public)) => Ok((private, public)),
            _ => Err(CoreError::KeysNotGenerated(self.role)),
        }
    }
}

/// Протокол установки ключей (Key Agreement)
///
/// Implementations resolve their provider through the [`Dispatcher`] and never
/// do the group arithmetic themselves.
#[async_trait]
pub trait KeyAgreement: Send + Sync {
    /// Public key as exchanged between the parties.
    type Public: Clone + fmt::Debug + fmt::Display + Send + Sync;

    fn algorithm(&self) -> Algorithm;

    /// Fills in `party`'s private scalar and public key.
    ///
    /// On a provider failure after the scalar was drawn the party is left in
    /// [`PartyState::PrivateGenerated`].
    async fn generate(&self, dispatcher: &Dispatcher, party: &mut Party<Self::Public>) -> Result<()>;

    /// Shared secret from one party's private scalar and the other's public key.
    async fn compute_secret(
        &self,
        dispatcher: &Dispatcher,
        own_private: &BigUint,
        counterparty_public: &Self::Public,
    ) -> Result<BigUint>;
}

/// Both parties' secrets after [`KeyExchangeSession::compute_secrets`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgreementOutcome {
    pub secret_a: BigUint,
    pub secret_b: BigUint,
}

impl AgreementOutcome {
    pub fn agrees(&self) -> bool {
        self.secret_a == self.secret_b
    }
}

pub struct KeyExchangeSession<K: KeyAgreement> {
    agreement: K,
    party_a: Party<K::Public>,
    party_b: Party<K::Public>,
}

impl<K: KeyAgreement> KeyExchangeSession<K> {
    pub fn new(agreement: K) -> Self {
        Self {
            agreement,
            party_a: Party::new(Role::A),
            party_b: Party::new(Role::B),
        }
    }

    pub fn agreement(&self) -> &K {
        &self.agreement
    }

    pub fn party(&self, role: Role) -> &Party<K::Public> {
        match role {
            Role::A => &self.party_a,
            Role::B => &self.party_b,
        }
    }

    pub fn state(&self, role: Role) -> PartyState {
        self.party(role).state()
    }

    /// Generates keys for `role`, advancing it to [`PartyState::PublicComputed`].
    ///
    /// The counterparty's secret, if any, was derived from this party's old
    /// public key and is dropped.
    pub async fn generate(&mut self, dispatcher: &Dispatcher, role: Role) -> Result<&K::Public> {
        let algorithm = self.agreement.algorithm();
        let (party, other) = match role {
            Role::A => (&mut self.party_a, &mut self.party_b),
            Role::B => (&mut self.party_b, &mut self.party_a),
        };

        other.secret = None;
        self.agreement.generate(dispatcher, party).await?;
        let (_, public) = party.keys()?;

        debug!(
            target: "handshake",
            algorithm = %algorithm,
            role = %role,
            public = %public,
            "Party keys generated"
        );

        Ok(public)
    }

    /// Computes both parties' secrets, advancing both to [`PartyState::SecretComputed`].
    ///
    /// # Errors
    ///
    /// [`CoreError::KeysNotGenerated`] naming the first party (A before B)
    /// whose keys are missing. A disagreement is not an error.
    pub async fn compute_secrets(&mut self, dispatcher: &Dispatcher) -> Result<AgreementOutcome> {
        let (private_a, public_a) = self.party_a.keys()?;
        let (private_b, public_b) = self.party_b.keys()?;

        let secret_a = self
            .agreement
            .compute_secret(dispatcher, private_a, public_b)
            .await?;
        let secret_b = self
            .agreement
            .compute_secret(dispatcher, private_b, public_a)
            .await?;

        self.party_a.secret = Some(secret_a.clone());
        self.party_b.secret = Some(secret_b.clone());

        let outcome = AgreementOutcome { secret_a, secret_b };
        let algorithm = self.agreement.algorithm();
        if outcome.agrees() {
            info!(target: "handshake", algorithm = %algorithm, "Shared secrets agree");
        } else {
            warn!(
                target: "handshake",
                algorithm = %algorithm,
                secret_a = %outcome.secret_a,
                secret_b = %outcome.secret_b,
                "Shared secrets disagree"
            );
        }

        Ok(outcome)
    }
}
