//! Payload types serialised into the portable ciphertext artifact.
//!
//! Both variants share a small header (`es` discriminator, optional `fn`
//! filename) followed by variant-specific fields. Field names are one or two
//! characters because they are written verbatim into every artifact as
//! msgpack map keys; the Rust side uses full names and `#[serde(rename)]`.
//!
//! Byte fields go through `serde_bytes` so they serialise as msgpack `bin`
//! values rather than integer arrays, and the optional filename is omitted
//! from the map entirely when absent.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length in bytes of the PBKDF2 salt stored in a password payload.
pub const SALT_LEN: usize = 16;

/// Length in bytes of an AES-GCM IV (96 bits).
pub const IV_LEN: usize = 12;

/// Discriminator selecting which payload variant an artifact carries.
///
/// Serialised as a msgpack positive integer. Consumers trust it to select
/// the decode branch, so an unknown value is a decode error, never a
/// fall-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionScheme {
    /// Key derived from a shared password.
    Password = 0,
    /// Key sealed by the policy authority under an email list.
    Auth = 1,
}

impl Serialize for EncryptionScheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for EncryptionScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(EncryptionScheme::Password),
            1 => Ok(EncryptionScheme::Auth),
            other => Err(serde::de::Error::custom(format!(
                "unknown encryption scheme {other}"
            ))),
        }
    }
}

/// Password-scheme payload: everything a holder of the password needs to
/// recover the plaintext.
///
/// Salt and IV are generated fresh per encryption and must never be reused
/// across two plaintexts under the same password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPayload {
    /// Variant discriminator; always [`EncryptionScheme::Password`].
    #[serde(rename = "es")]
    pub scheme: EncryptionScheme,

    /// Original filename, present only for file payloads.
    #[serde(rename = "fn", default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// PBKDF2 salt ([`SALT_LEN`] bytes).
    #[serde(rename = "s", with = "serde_bytes")]
    pub salt: Vec<u8>,

    /// AES-GCM IV ([`IV_LEN`] bytes).
    #[serde(rename = "iv", with = "serde_bytes")]
    pub iv: Vec<u8>,

    /// AES-256-GCM ciphertext + tag.
    #[serde(rename = "ct", with = "serde_bytes")]
    pub ciphertext: Vec<u8>,
}

/// Auth-scheme payload: ciphertext plus the sealed data-encryption key.
///
/// `nonce` and `sealed` are opaque to this engine — only the authority that
/// holds the KEK named by `key_id` can interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    /// Variant discriminator; always [`EncryptionScheme::Auth`].
    #[serde(rename = "es")]
    pub scheme: EncryptionScheme,

    /// Original filename, present only for file payloads.
    #[serde(rename = "fn", default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Identifies which authority key sealed the DEK.
    #[serde(rename = "k")]
    pub key_id: String,

    /// Authority-side AEAD nonce for the sealed DEK.
    #[serde(rename = "n", with = "serde_bytes")]
    pub nonce: Vec<u8>,

    /// The sealed DEK blob.
    #[serde(rename = "se", with = "serde_bytes")]
    pub sealed: Vec<u8>,

    /// AES-GCM IV ([`IV_LEN`] bytes) for the content ciphertext.
    #[serde(rename = "iv", with = "serde_bytes")]
    pub iv: Vec<u8>,

    /// AES-256-GCM ciphertext + tag of the actual content.
    #[serde(rename = "ct", with = "serde_bytes")]
    pub ciphertext: Vec<u8>,
}

/// A decoded payload, one variant per encryption scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Protected by a shared password.
    Password(PasswordPayload),
    /// Protected by an authority-enforced email list.
    Auth(AuthPayload),
}

impl Payload {
    /// The discriminator of the contained variant.
    pub fn scheme(&self) -> EncryptionScheme {
        match self {
            Payload::Password(_) => EncryptionScheme::Password,
            Payload::Auth(_) => EncryptionScheme::Auth,
        }
    }

    /// The filename carried by the header, if any.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Payload::Password(p) => p.filename.as_deref(),
            Payload::Auth(p) => p.filename.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scheme_serialises_as_integer() {
        assert_eq!(
            serde_json::to_value(EncryptionScheme::Password).unwrap(),
            json!(0)
        );
        assert_eq!(serde_json::to_value(EncryptionScheme::Auth).unwrap(), json!(1));
    }

    #[test]
    fn scheme_rejects_unknown_discriminator() {
        assert!(serde_json::from_value::<EncryptionScheme>(json!(2)).is_err());
    }

    #[test]
    fn password_payload_uses_wire_field_names() {
        let payload = PasswordPayload {
            scheme: EncryptionScheme::Password,
            filename: Some("plain.txt".into()),
            salt: vec![0u8; SALT_LEN],
            iv: vec![0u8; IV_LEN],
            ciphertext: vec![1, 2, 3],
        };
        let value = serde_json::to_value(&payload).unwrap();
        let map = value.as_object().unwrap();
        for key in ["es", "fn", "s", "iv", "ct"] {
            assert!(map.contains_key(key), "missing wire field {key}");
        }
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn absent_filename_is_omitted() {
        let payload = PasswordPayload {
            scheme: EncryptionScheme::Password,
            filename: None,
            salt: vec![],
            iv: vec![],
            ciphertext: vec![],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(!value.as_object().unwrap().contains_key("fn"));
    }

    #[test]
    fn auth_payload_uses_wire_field_names() {
        let payload = AuthPayload {
            scheme: EncryptionScheme::Auth,
            filename: None,
            key_id: "v1".into(),
            nonce: vec![0u8; IV_LEN],
            sealed: vec![9, 9],
            iv: vec![0u8; IV_LEN],
            ciphertext: vec![1],
        };
        let value = serde_json::to_value(&payload).unwrap();
        let map = value.as_object().unwrap();
        for key in ["es", "k", "n", "se", "iv", "ct"] {
            assert!(map.contains_key(key), "missing wire field {key}");
        }
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn payload_accessors_dispatch_on_variant() {
        let p = Payload::Password(PasswordPayload {
            scheme: EncryptionScheme::Password,
            filename: Some("notes.md".into()),
            salt: vec![],
            iv: vec![],
            ciphertext: vec![],
        });
        assert_eq!(p.scheme(), EncryptionScheme::Password);
        assert_eq!(p.filename(), Some("notes.md"));
    }
}
