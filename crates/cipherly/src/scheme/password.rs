//! Password scheme: PBKDF2-derived key, AES-256-GCM content encryption.

use common::payload::{EncryptionScheme, PasswordPayload, Payload, IV_LEN, SALT_LEN};
use common::CipherlyError;
use tracing::debug;

use crate::crypto::{cipher, kdf};

/// Encrypt `plaintext` under a shared password.
///
/// A fresh salt and IV are drawn per call, so two encryptions of identical
/// inputs are never linkable.
pub fn encrypt(
    plaintext: &[u8],
    password: &str,
    filename: Option<String>,
) -> Result<Payload, CipherlyError> {
    let salt = cipher::random_bytes::<SALT_LEN>();
    let iv = cipher::random_bytes::<IV_LEN>();
    encrypt_with(plaintext, password, filename, salt, iv)
}

/// Deterministic core of [`encrypt`], with the random material pinned.
/// Unit tests call this directly to get reproducible payloads.
fn encrypt_with(
    plaintext: &[u8],
    password: &str,
    filename: Option<String>,
    salt: [u8; SALT_LEN],
    iv: [u8; IV_LEN],
) -> Result<Payload, CipherlyError> {
    let key = kdf::derive_key(password.as_bytes(), &salt);
    let ciphertext = cipher::encrypt(plaintext, &key, &iv)?;
    debug!(len = ciphertext.len(), "password payload encrypted");
    Ok(Payload::Password(PasswordPayload {
        scheme: EncryptionScheme::Password,
        filename,
        salt: salt.to_vec(),
        iv: iv.to_vec(),
        ciphertext,
    }))
}

/// Decrypt a password payload with the supplied password.
///
/// The key is re-derived from the supplied password and the payload's
/// embedded salt. A wrong password yields [`CipherlyError::Integrity`],
/// indistinguishable from tampering: there is no password-correctness
/// oracle.
pub fn decrypt(payload: &PasswordPayload, password: &str) -> Result<Vec<u8>, CipherlyError> {
    let key = kdf::derive_key(password.as_bytes(), &payload.salt);
    Ok(cipher::decrypt(&payload.ciphertext, &key, &payload.iv)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let payload = encrypt(b"Some secret", "p@ss", None).unwrap();
        let Payload::Password(inner) = &payload else {
            panic!("expected password payload");
        };
        assert_eq!(decrypt(inner, "p@ss").unwrap(), b"Some secret");
    }

    #[test]
    fn wrong_password_is_integrity_failure() {
        let Payload::Password(inner) = encrypt(b"Some secret", "p@ss", None).unwrap() else {
            panic!("expected password payload");
        };
        assert!(matches!(
            decrypt(&inner, "wrong"),
            Err(CipherlyError::Integrity)
        ));
    }

    #[test]
    fn repeated_encryption_is_unlinkable() {
        let Payload::Password(a) = encrypt(b"same input", "p@ss", None).unwrap() else {
            panic!()
        };
        let Payload::Password(b) = encrypt(b"same input", "p@ss", None).unwrap() else {
            panic!()
        };
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn filename_carried_in_header() {
        let payload = encrypt(b"secret file", "p@ss", Some("plain.txt".into())).unwrap();
        assert_eq!(payload.filename(), Some("plain.txt"));
    }

    #[test]
    fn pinned_randomness_is_reproducible() {
        let salt = [0x11u8; 16];
        let iv = [0x22u8; 12];
        let a = encrypt_with(b"x", "p@ss", None, salt, iv).unwrap();
        let b = encrypt_with(b"x", "p@ss", None, salt, iv).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tampered_ciphertext_is_integrity_failure() {
        let Payload::Password(mut inner) = encrypt(b"Some secret", "p@ss", None).unwrap() else {
            panic!()
        };
        inner.ciphertext[0] ^= 0x01;
        assert!(matches!(
            decrypt(&inner, "p@ss"),
            Err(CipherlyError::Integrity)
        ));
    }
}
