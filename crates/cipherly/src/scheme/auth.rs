//! Auth scheme: per-payload DEK, sealed by the policy authority.

use common::payload::{AuthPayload, EncryptionScheme, Payload, IV_LEN};
use common::CipherlyError;
use tracing::debug;

use crate::authority::{Authority, Envelope, SealedEnvelope};
use crate::crypto::{cipher, SymmetricKey};

/// Encrypt `plaintext` for the identities in `emails`.
///
/// A fresh data-encryption key encrypts the content locally; only that key
/// — never the content — travels to the authority for sealing. If sealing
/// fails the locally-encrypted material is discarded with no partial
/// mutation anywhere.
pub async fn encrypt(
    plaintext: &[u8],
    emails: Vec<String>,
    filename: Option<String>,
    authority: &dyn Authority,
) -> Result<Payload, CipherlyError> {
    let dek = SymmetricKey::generate();
    let iv = cipher::random_bytes::<IV_LEN>();
    let ciphertext = cipher::encrypt(plaintext, &dek, &iv)?;

    let sealed = authority.seal(&Envelope { dek, emails }).await?;
    debug!(kid = %sealed.key_id, len = ciphertext.len(), "auth payload encrypted");

    Ok(Payload::Auth(AuthPayload {
        scheme: EncryptionScheme::Auth,
        filename,
        key_id: sealed.key_id,
        nonce: sealed.nonce,
        sealed: sealed.data,
        iv: iv.to_vec(),
        ciphertext,
    }))
}

/// Decrypt an auth payload, presenting `bearer_token` to the authority.
///
/// Two distinct failure modes: [`CipherlyError::Unseal`] means the
/// authority refused (identity not authorized, credential invalid or
/// expired); [`CipherlyError::Integrity`] *after* a successful unseal means
/// the artifact itself is corrupt or tampered — a correctly-authorized
/// recipient should never see it otherwise.
pub async fn decrypt(
    payload: &AuthPayload,
    bearer_token: &str,
    authority: &dyn Authority,
) -> Result<Vec<u8>, CipherlyError> {
    let sealed = SealedEnvelope {
        key_id: payload.key_id.clone(),
        nonce: payload.nonce.clone(),
        data: payload.sealed.clone(),
    };
    let envelope = authority.unseal(&sealed, bearer_token).await?;
    Ok(cipher::decrypt(&payload.ciphertext, &envelope.dek, &payload.iv)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::MemoryAuthority;

    fn emails(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn round_trip_with_authorized_identity() {
        let authority = MemoryAuthority::new();
        let payload = encrypt(b"secret file", emails(&["a@test.com"]), None, &authority)
            .await
            .unwrap();
        let Payload::Auth(inner) = &payload else {
            panic!("expected auth payload");
        };
        let plaintext = decrypt(inner, "a@test.com", &authority).await.unwrap();
        assert_eq!(plaintext, b"secret file");
    }

    #[tokio::test]
    async fn any_listed_identity_may_decrypt() {
        let authority = MemoryAuthority::new();
        let payload = encrypt(
            b"shared",
            emails(&["a@test.com", "b@test.com"]),
            None,
            &authority,
        )
        .await
        .unwrap();
        let Payload::Auth(inner) = &payload else { panic!() };
        assert_eq!(decrypt(inner, "b@test.com", &authority).await.unwrap(), b"shared");
    }

    #[tokio::test]
    async fn unauthorized_identity_is_unseal_failure() {
        let authority = MemoryAuthority::new();
        let Payload::Auth(inner) = encrypt(b"x", emails(&["a@test.com"]), None, &authority)
            .await
            .unwrap()
        else {
            panic!()
        };
        let err = decrypt(&inner, "eve@test.com", &authority).await.unwrap_err();
        assert!(err.is_authorization_denial());
    }

    #[tokio::test]
    async fn tampered_ciphertext_fails_after_successful_unseal() {
        let authority = MemoryAuthority::new();
        let Payload::Auth(mut inner) = encrypt(b"x", emails(&["a@test.com"]), None, &authority)
            .await
            .unwrap()
        else {
            panic!()
        };
        inner.ciphertext[0] ^= 0x01;
        // The unseal itself succeeds; only the content integrity check fails.
        assert!(matches!(
            decrypt(&inner, "a@test.com", &authority).await,
            Err(CipherlyError::Integrity)
        ));
    }

    #[tokio::test]
    async fn filename_carried_in_header() {
        let authority = MemoryAuthority::new();
        let payload = encrypt(
            b"secret file",
            emails(&["a@test.com"]),
            Some("plain.txt".into()),
            &authority,
        )
        .await
        .unwrap();
        let Payload::Auth(inner) = &payload else { panic!() };
        assert_eq!(inner.filename.as_deref(), Some("plain.txt"));
    }
}
