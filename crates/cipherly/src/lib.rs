//! `cipherly` — encryption engine and payload codec for sharing secrets.
//!
//! Turns plaintext bytes plus an access policy into a portable, framed
//! ciphertext artifact, and reverses the transformation given the right
//! credential. Two policies are supported:
//!
//! - **Password** ([`scheme::password`]): the key is derived from a shared
//!   password with PBKDF2-HMAC-SHA256 and a per-payload salt.
//! - **Auth** ([`scheme::auth`]): the content is encrypted under a fresh
//!   data-encryption key, which a remote policy [`authority`] seals under a
//!   list of email identities; only a holder of a matching bearer
//!   credential can have it unsealed.
//!
//! The [`codec`] frames either payload behind this instance's decrypt
//! landing URL, textual (base64url) for clipboards or binary for files.
//! Persistence and presentation are the caller's concern: every artifact is
//! just bytes.
//!
//! ```
//! use cipherly::codec::{self, Transport};
//! use cipherly::scheme::password;
//! use cipherly::{CipherlyError, Payload};
//!
//! let url = "https://cipherly.app/decrypt/#";
//! let payload = password::encrypt(b"Some secret", "p@ss", None)?;
//! let artifact = codec::encode(&payload, url, Transport::Text)?;
//!
//! let Payload::Password(inner) = codec::decode(&artifact, url, Transport::Text)? else {
//!     unreachable!()
//! };
//! assert_eq!(password::decrypt(&inner, "p@ss")?, b"Some secret");
//! # Ok::<(), CipherlyError>(())
//! ```

pub mod authority;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod scheme;

pub use authority::{Authority, Envelope, HttpAuthority, MemoryAuthority, SealedEnvelope};
pub use codec::Transport;
pub use config::Config;
pub use crypto::SymmetricKey;

// Re-exported so callers don't need a direct `common` dependency.
pub use common::{AuthPayload, CipherlyError, EncryptionScheme, PasswordPayload, Payload};
