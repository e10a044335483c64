//! Payload codec: typed payload values ⇄ framed byte artifacts.
//!
//! # Artifact format
//!
//! ```text
//! <decrypt-landing-url> "#" [base64url-no-pad if textual] <msgpack payload>
//! ```
//!
//! The payload serialises to a field-name-keyed msgpack map (order
//! independent; absent optionals omitted), prefixed with the UTF-8 bytes of
//! this instance's decrypt landing URL terminated by a single `#`. Embedding
//! the URL lets a recipient paste an artifact anywhere and still reach the
//! right decrypt flow, and lets decoding reject artifacts minted for a
//! different deployment before any key derivation or network round trip.
//!
//! Textual transports (clipboard) additionally base64url-encode the body so
//! the whole artifact stays printable; file transports carry the body as raw
//! binary. Only bytes before the *first* `#` are ever interpreted as the
//! prefix, so a binary body may contain `#` freely — the configured landing
//! URL itself is validated to contain no `#` (see [`crate::config::Config`]).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;

use common::payload::{AuthPayload, EncryptionScheme, PasswordPayload, Payload};
use common::CipherlyError;

/// How the artifact travels: printable text or a raw binary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Clipboard-style text; the body is base64url-encoded.
    Text,
    /// Downloadable file; the body stays binary.
    File,
}

/// Minimal view of the payload header, decoded first to select the variant.
#[derive(Deserialize)]
struct PayloadHeader {
    #[serde(rename = "es")]
    scheme: EncryptionScheme,
}

/// Serialise `payload` and frame it for the given transport.
///
/// # Errors
///
/// Returns [`CipherlyError::MalformedPayload`] if the payload's embedded
/// discriminator disagrees with its variant (a constructor bug upstream).
pub fn encode(
    payload: &Payload,
    decrypt_url: &str,
    transport: Transport,
) -> Result<Vec<u8>, CipherlyError> {
    let body = match payload {
        Payload::Password(p) => {
            check_discriminator(p.scheme, EncryptionScheme::Password)?;
            rmp_serde::to_vec_named(p)
        }
        Payload::Auth(p) => {
            check_discriminator(p.scheme, EncryptionScheme::Auth)?;
            rmp_serde::to_vec_named(p)
        }
    }
    .map_err(|e| CipherlyError::MalformedPayload(e.to_string()))?;

    let mut out = decrypt_url.as_bytes().to_vec();
    match transport {
        Transport::Text => out.extend_from_slice(URL_SAFE_NO_PAD.encode(&body).as_bytes()),
        Transport::File => out.extend_from_slice(&body),
    }
    Ok(out)
}

/// Unframe `data` and deserialise it into a typed payload.
///
/// Frame validation happens before any cryptography: a missing `#` marker is
/// [`CipherlyError::MissingHeader`], a prefix that is not exactly this
/// instance's `decrypt_url` is [`CipherlyError::WrongInstance`], and
/// anything that fails to decode into one of the two known variants is
/// [`CipherlyError::MalformedPayload`].
pub fn decode(
    data: &[u8],
    decrypt_url: &str,
    transport: Transport,
) -> Result<Payload, CipherlyError> {
    let end_of_url = data
        .iter()
        .position(|&b| b == b'#')
        .ok_or(CipherlyError::MissingHeader)?
        + 1;

    let prefix = std::str::from_utf8(&data[..end_of_url])
        .map_err(|_| CipherlyError::WrongInstance)?;
    if prefix != decrypt_url {
        return Err(CipherlyError::WrongInstance);
    }

    let body = match transport {
        Transport::Text => URL_SAFE_NO_PAD
            .decode(&data[end_of_url..])
            .map_err(|e| CipherlyError::MalformedPayload(format!("invalid base64 body: {e}")))?,
        Transport::File => data[end_of_url..].to_vec(),
    };

    let header: PayloadHeader = rmp_serde::from_slice(&body)
        .map_err(|e| CipherlyError::MalformedPayload(format!("unreadable header: {e}")))?;

    match header.scheme {
        EncryptionScheme::Password => {
            let payload: PasswordPayload = rmp_serde::from_slice(&body)
                .map_err(|e| CipherlyError::MalformedPayload(e.to_string()))?;
            Ok(Payload::Password(payload))
        }
        EncryptionScheme::Auth => {
            let payload: AuthPayload = rmp_serde::from_slice(&body)
                .map_err(|e| CipherlyError::MalformedPayload(e.to_string()))?;
            Ok(Payload::Auth(payload))
        }
    }
}

fn check_discriminator(
    actual: EncryptionScheme,
    expected: EncryptionScheme,
) -> Result<(), CipherlyError> {
    if actual != expected {
        return Err(CipherlyError::MalformedPayload(format!(
            "discriminator {actual:?} does not match encoded variant {expected:?}"
        )));
    }
    Ok(())
}
