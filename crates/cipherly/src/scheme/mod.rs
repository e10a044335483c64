//! The two encryption schemes.
//!
//! Both produce and consume [`common::Payload`] values; framing for
//! transport lives in [`crate::codec`]. Password protection is entirely
//! local; auth protection additionally round-trips the data-encryption key
//! through the policy authority.

pub mod auth;
pub mod password;
