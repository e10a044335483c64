//! Cryptographic primitives: AES-256-GCM and password key derivation.
//!
//! This module is intentionally free of payload and HTTP concerns. It
//! provides the low-level operations the two schemes are built from: random
//! generation, symmetric key handling, PBKDF2 derivation, and AEAD
//! encrypt/decrypt.
//!
//! The only ambient dependency is the OS CSPRNG. No operation retries;
//! cryptographic failures are terminal for the call.

pub mod cipher;
pub mod kdf;

pub use cipher::{decrypt, encrypt, random_bytes, CipherError, SymmetricKey, IV_LEN, KEY_LEN};
pub use kdf::{derive_key, PBKDF2_ITERATIONS};

/// Byte length of a password-derivation salt.
pub const SALT_LEN: usize = common::payload::SALT_LEN;
