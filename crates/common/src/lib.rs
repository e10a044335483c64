//! Common payload types, authority protocol definitions, and errors shared
//! across `cipherly` crates.

pub mod error;
pub mod payload;
pub mod protocol;

pub use error::CipherlyError;
pub use payload::{AuthPayload, EncryptionScheme, PasswordPayload, Payload};
