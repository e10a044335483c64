//! AES-256-GCM encryption and decryption of payload content.
//!
//! Every encryption uses a fresh random 96-bit IV; the IV is stored next to
//! the ciphertext in the payload, so it is never reused across plaintexts.
//! No associated data is used. Decryption verifies the GCM tag and fails
//! closed — a tag mismatch yields [`CipherError::Integrity`] and never
//! partial plaintext.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM IV (12 bytes = 96 bits).
pub const IV_LEN: usize = common::payload::IV_LEN;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key material is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The IV is the wrong length (must be [`IV_LEN`] bytes).
    #[error("invalid IV length: expected {IV_LEN} bytes, got {0}")]
    InvalidIvLength(usize),

    /// AEAD tag verification failed — wrong key or tampered ciphertext.
    /// The two causes are indistinguishable by design.
    #[error("aead integrity check failed")]
    Integrity,
}

impl From<CipherError> for common::CipherlyError {
    fn from(e: CipherError) -> Self {
        match e {
            // Bad lengths come from payload fields, so they surface as a
            // payload-shape problem rather than a crypto failure.
            CipherError::InvalidKeyLength(_) | CipherError::InvalidIvLength(_) => {
                common::CipherlyError::MalformedPayload(e.to_string())
            }
            CipherError::Integrity => common::CipherlyError::Integrity,
        }
    }
}

/// A 256-bit AES-GCM key.
///
/// Cloned into call stacks where needed; the backing memory is overwritten
/// with zeroes on drop to minimise how long raw key material lives in RAM.
#[derive(Clone)]
pub struct SymmetricKey(Box<[u8; KEY_LEN]>);

impl SymmetricKey {
    /// Generate a fresh random key from the OS CSPRNG.
    pub fn generate() -> Self {
        Self(Box::new(random_bytes::<KEY_LEN>()))
    }

    /// Import raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] unless `bytes` is exactly
    /// [`KEY_LEN`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        if bytes.len() != KEY_LEN {
            return Err(CipherError::InvalidKeyLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Export the raw key bytes, e.g. for sealing by the authority.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub(crate) fn from_array(bytes: [u8; KEY_LEN]) -> Self {
        Self(Box::new(bytes))
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// `N` cryptographically secure random bytes from the OS CSPRNG.
///
/// Used for salts ([`crate::crypto::SALT_LEN`] bytes), IVs ([`IV_LEN`]
/// bytes), and symmetric keys ([`KEY_LEN`] bytes).
pub fn random_bytes<const N: usize>() -> [u8; N] {
    use aes_gcm::aead::rand_core::RngCore;
    let mut buf = [0u8; N];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Encrypt `plaintext` with AES-256-GCM under `key` and `iv`.
///
/// The returned buffer is ciphertext followed by the 16-byte GCM tag.
///
/// # Errors
///
/// Returns [`CipherError::InvalidIvLength`] if `iv` is not [`IV_LEN`] bytes.
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey, iv: &[u8]) -> Result<Vec<u8>, CipherError> {
    check_iv(iv)?;
    build_cipher(key)
        .encrypt(Nonce::from_slice(iv), plaintext)
        .map_err(|_| CipherError::Integrity)
}

/// Decrypt AES-256-GCM `ciphertext` (with trailing tag) under `key` and `iv`.
///
/// # Errors
///
/// Returns [`CipherError::InvalidIvLength`] if `iv` is not [`IV_LEN`] bytes,
/// or [`CipherError::Integrity`] if tag verification fails (wrong key or
/// tampered data).
pub fn decrypt(ciphertext: &[u8], key: &SymmetricKey, iv: &[u8]) -> Result<Vec<u8>, CipherError> {
    check_iv(iv)?;
    build_cipher(key)
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| CipherError::Integrity)
}

fn build_cipher(key: &SymmetricKey) -> Aes256Gcm {
    Aes256Gcm::new(key.as_bytes().into())
}

fn check_iv(iv: &[u8]) -> Result<(), CipherError> {
    if iv.len() != IV_LEN {
        return Err(CipherError::InvalidIvLength(iv.len()));
    }
    Ok(())
}
