//! Session-token types shared between the market service and anything that
//! fronts it.
//!
//! Validation is available to every consumer. Serializing claims (and with
//! it the ability to mint tokens) is gated behind the `ISSUER_ONLY` cargo
//! feature, which only the market service enables.

pub mod token;

pub use token::{SESSION_TTL, SessionClaims, SessionIdentity, TokenError, validate_session};
