// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ed25519 provider keypair: identity derivation and payload signing.
//!
//! The provider's identity on the network is its hex-encoded Ed25519 public
//! key. The keypair signs outbound offer payloads so subscriber endpoints can
//! verify that an offer really originated from the provider they pay.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use offercast_core::{OffercastError, ProviderId};

/// An Ed25519 provider keypair.
pub struct ProviderKeypair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl ProviderKeypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = VerifyingKey::from(&signing_key);
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Reconstruct a keypair from a hex-encoded 32-byte seed, as configured
    /// in `provider.signing_key`.
    pub fn from_hex(seed_hex: &str) -> Result<Self, OffercastError> {
        let bytes = hex::decode(seed_hex.trim())
            .map_err(|e| OffercastError::Config(format!("provider.signing_key is not hex: {e}")))?;
        let seed: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            OffercastError::Config(format!(
                "provider.signing_key must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        let signing_key = SigningKey::from_bytes(&seed);
        let verifying_key = VerifyingKey::from(&signing_key);
        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    /// The seed bytes (for persistence).
    pub fn seed_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// The hex-encoded public key. This string is the provider identity.
    pub fn public_hex(&self) -> String {
        hex::encode(self.verifying_key.to_bytes())
    }

    /// The provider identity derived from this keypair.
    pub fn provider_id(&self) -> ProviderId {
        ProviderId(self.public_hex())
    }

    /// Startup guard: the configured identity must match the key actually
    /// loaded, otherwise offers would be signed by a different provider than
    /// the one subscribers pay.
    pub fn verify_identity(&self, configured: &ProviderId) -> Result<(), OffercastError> {
        if configured.0 != self.public_hex() {
            return Err(OffercastError::Config(
                "provider.identity does not match the public key derived from provider.signing_key"
                    .into(),
            ));
        }
        Ok(())
    }

    /// Sign arbitrary bytes (the serialized offer payload) with the private
    /// key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// Verify a signature against this keypair's public key using strict
    /// mode, which rejects weak public keys.
    pub fn verify_strict(
        &self,
        message: &[u8],
        signature: &Signature,
    ) -> Result<(), OffercastError> {
        self.verifying_key
            .verify_strict(message, signature)
            .map_err(|e| {
                OffercastError::Internal(format!("Ed25519 signature verification failed: {e}"))
            })
    }

    /// Non-strict verification; prefer [`ProviderKeypair::verify_strict`].
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), OffercastError> {
        self.verifying_key.verify(message, signature).map_err(|e| {
            OffercastError::Internal(format!("Ed25519 signature verification failed: {e}"))
        })
    }
}

impl std::fmt::Debug for ProviderKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the seed.
        f.debug_struct("ProviderKeypair")
            .field("public_hex", &self.public_hex())
            .finish_non_exhaustive()
    }
}
