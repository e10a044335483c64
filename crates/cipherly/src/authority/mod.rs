//! Envelope sealing against the policy authority.
//!
//! The authority is the point where access-policy enforcement is delegated:
//! it encrypts a data-encryption key such that only identities on the
//! envelope's email list — verified out-of-band via their bearer credential
//! — can recover it. This engine only speaks the two-operation contract;
//! the authority's internals stay opaque.
//!
//! [`Authority`] keeps that contract behind a narrow trait so the schemes
//! can run against [`HttpAuthority`] in production and [`MemoryAuthority`]
//! in tests, without a network dependency.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use common::CipherlyError;

use crate::crypto::SymmetricKey;

pub use http::HttpAuthority;
pub use memory::MemoryAuthority;

/// A data-encryption key paired with the identities authorized to recover
/// it. Purely in-memory: produced right before sealing, consumed right
/// after unsealing, never serialised or logged by this engine.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// The raw content key. [`SymmetricKey`]'s `Debug` impl redacts it.
    pub dek: SymmetricKey,
    /// Email identities allowed to unseal.
    pub emails: Vec<String>,
}

/// The sealed form exchanged with the authority; structurally identical to
/// the `k`/`n`/`se` fields embedded in an auth payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedEnvelope {
    /// Identifies which authority key sealed the envelope.
    pub key_id: String,
    /// Authority-side AEAD nonce. Opaque to this engine.
    pub nonce: Vec<u8>,
    /// The sealed blob. Opaque to this engine.
    pub data: Vec<u8>,
}

/// The policy authority's two-operation contract.
///
/// Both calls are single network round trips and the only suspension points
/// in the engine. Failures are terminal — sealing failures are typically
/// policy or auth errors, not transient, so retry policy (if any) belongs to
/// the caller.
#[async_trait]
pub trait Authority: Send + Sync {
    /// Seal a DEK under an email-list policy.
    ///
    /// # Errors
    ///
    /// [`CipherlyError::Seal`] if the authority rejects the request,
    /// [`CipherlyError::Transport`] if it cannot be reached.
    async fn seal(&self, envelope: &Envelope) -> Result<SealedEnvelope, CipherlyError>;

    /// Recover the DEK and resolved email list from a sealed envelope,
    /// presenting the caller's bearer credential.
    ///
    /// # Errors
    ///
    /// [`CipherlyError::Unseal`] if the authority rejects the request
    /// (401/403 for authorization denial), [`CipherlyError::Transport`] if
    /// it cannot be reached.
    async fn unseal(
        &self,
        sealed: &SealedEnvelope,
        bearer_token: &str,
    ) -> Result<Envelope, CipherlyError>;
}
