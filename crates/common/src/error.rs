//! Error taxonomy shared across crates.

use thiserror::Error;

/// Top-level engine error type.
///
/// The engine never retries: every variant is terminal for the call that
/// produced it, and the caller decides what to present. Two pairs of
/// variants are deliberately kept apart:
/// - [`CipherlyError::Integrity`] covers both a wrong password and a
///   tampered ciphertext — AEAD tag verification cannot tell them apart and
///   collapsing them avoids a password-correctness oracle.
/// - [`CipherlyError::Unseal`] (the authority answered and said no) is
///   distinct from [`CipherlyError::Transport`] (the authority never
///   answered), so "not authorized" and "network failure" render differently
///   without the engine modelling every authority error code.
#[derive(Debug, Error)]
pub enum CipherlyError {
    /// No `#` frame marker was found in the input.
    #[error("payload is missing the frame header")]
    MissingHeader,

    /// The frame's URL prefix targets a different deployment.
    #[error("payload is not intended for this cipherly instance")]
    WrongInstance,

    /// The binary body decoded, but its shape matches neither known variant.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// AEAD tag verification failed — wrong key or tampered ciphertext.
    #[error("integrity check failed: wrong credential or tampered ciphertext")]
    Integrity,

    /// The authority rejected a seal request.
    #[error("authority rejected seal request ({status}): {message}")]
    Seal {
        /// HTTP status returned by the authority.
        status: u16,
        /// Raw response body, for caller-level interpretation.
        message: String,
    },

    /// The authority rejected an unseal request (401/403 for authorization
    /// denial; other statuses pass through untouched).
    #[error("authority rejected unseal request ({status}): {message}")]
    Unseal {
        /// HTTP status returned by the authority.
        status: u16,
        /// Raw response body, for caller-level interpretation.
        message: String,
    },

    /// The authority could not be reached or returned an unreadable response.
    #[error("authority unreachable: {0}")]
    Transport(String),
}

impl CipherlyError {
    /// Returns `true` if this error represents an authorization denial by
    /// the authority, as opposed to a cryptographic or transport failure.
    pub fn is_authorization_denial(&self) -> bool {
        matches!(
            self,
            CipherlyError::Unseal {
                status: 401 | 403,
                ..
            }
        )
    }
}
