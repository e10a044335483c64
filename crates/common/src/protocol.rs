//! Request and response types exchanged with the policy authority.
//!
//! These are the JSON bodies of the authority's two endpoints. All binary
//! values cross the wire as base64url-no-pad strings; decoding back to bytes
//! happens in the sealing client, not here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// POST /api/seal
// ---------------------------------------------------------------------------

/// Request body for `POST /api/seal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealRequest {
    /// Raw data-encryption key, base64url-encoded.
    pub dek: String,
    /// Email identities authorized to later unseal the key.
    pub emails: Vec<String>,
}

/// Successful response body for `POST /api/seal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealResponse {
    /// Identifies the authority key that sealed the envelope.
    pub kid: String,
    /// Authority-side AEAD nonce, base64url-encoded.
    pub nonce: String,
    /// Sealed envelope blob, base64url-encoded.
    pub data: String,
}

// ---------------------------------------------------------------------------
// POST /api/unseal
// ---------------------------------------------------------------------------

/// Request body for `POST /api/unseal`. The caller's identity travels
/// separately as a bearer token in the `Authorization` header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsealRequest {
    /// Identifies the authority key that sealed the envelope.
    pub kid: String,
    /// Authority-side AEAD nonce, base64url-encoded.
    pub nonce: String,
    /// Sealed envelope blob, base64url-encoded.
    pub data: String,
}

/// Successful response body for `POST /api/unseal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsealResponse {
    /// Recovered data-encryption key, base64url-encoded.
    pub dek: String,
    /// The email list the envelope was sealed under.
    pub emails: Vec<String>,
}
