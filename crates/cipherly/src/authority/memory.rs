//! In-process policy authority.
//!
//! Behaves like the real service — msgpack-encodes the envelope and seals
//! it under a named 256-bit KEK with AES-256-GCM — but runs entirely in
//! memory and skips credential verification: the bearer token is taken *as*
//! the caller's verified email identity. That makes it a deterministic
//! stand-in for tests and offline use; it is not an identity provider.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    AeadCore, Aes256Gcm,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use common::CipherlyError;

use crate::crypto::{SymmetricKey, KEY_LEN};

use super::{Authority, Envelope, SealedEnvelope};

/// What actually gets sealed: the same shape the real authority encrypts
/// under its KEK.
#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    dek: String,
    emails: Vec<String>,
}

/// In-memory authority holding one or more named key-encryption keys.
pub struct MemoryAuthority {
    keks: HashMap<String, Aes256Gcm>,
    active_kid: String,
}

impl MemoryAuthority {
    /// An authority with a single random KEK under key id `"v1"`.
    pub fn new() -> Self {
        let mut kek = [0u8; KEY_LEN];
        use aes_gcm::aead::rand_core::RngCore;
        OsRng.fill_bytes(&mut kek);
        Self::with_kek("v1", &kek)
    }

    /// An authority with a single caller-supplied KEK, for reproducible
    /// fixtures. `kek` must be [`KEY_LEN`] bytes.
    pub fn with_kek(kid: &str, kek: &[u8; KEY_LEN]) -> Self {
        let mut keks = HashMap::new();
        keks.insert(kid.to_string(), Aes256Gcm::new(kek.into()));
        Self {
            keks,
            active_kid: kid.to_string(),
        }
    }
}

impl Default for MemoryAuthority {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authority for MemoryAuthority {
    async fn seal(&self, envelope: &Envelope) -> Result<SealedEnvelope, CipherlyError> {
        let wire = WireEnvelope {
            dek: URL_SAFE_NO_PAD.encode(envelope.dek.as_bytes()),
            emails: envelope.emails.clone(),
        };
        let buf = rmp_serde::to_vec(&wire).map_err(|e| CipherlyError::Seal {
            status: 500,
            message: e.to_string(),
        })?;

        let kek = self.keks.get(&self.active_kid).ok_or(CipherlyError::Seal {
            status: 500,
            message: "active KEK missing".into(),
        })?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let data = kek
            .encrypt(&nonce, buf.as_slice())
            .map_err(|_| CipherlyError::Seal {
                status: 500,
                message: "KEK encryption failed".into(),
            })?;

        Ok(SealedEnvelope {
            key_id: self.active_kid.clone(),
            nonce: nonce.to_vec(),
            data,
        })
    }

    async fn unseal(
        &self,
        sealed: &SealedEnvelope,
        bearer_token: &str,
    ) -> Result<Envelope, CipherlyError> {
        // Everything wrong with the sealed blob or the caller's identity
        // collapses into 401, exactly like the real authority: an attacker
        // learns nothing about which part failed.
        let denied = || CipherlyError::Unseal {
            status: 401,
            message: "Unauthorized".into(),
        };

        let kek = self.keks.get(&sealed.key_id).ok_or_else(denied)?;
        if sealed.nonce.len() != 12 {
            return Err(denied());
        }
        let plaintext = kek
            .decrypt(sealed.nonce.as_slice().into(), sealed.data.as_slice())
            .map_err(|_| denied())?;
        let wire: WireEnvelope = rmp_serde::from_slice(&plaintext).map_err(|_| denied())?;

        if !wire.emails.iter().any(|e| e == bearer_token) {
            return Err(denied());
        }

        let dek_bytes = URL_SAFE_NO_PAD.decode(&wire.dek).map_err(|_| denied())?;
        let dek = SymmetricKey::from_bytes(&dek_bytes).map_err(|_| denied())?;

        Ok(Envelope {
            dek,
            emails: wire.emails,
        })
    }
}
