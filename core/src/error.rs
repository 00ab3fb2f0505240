//! Error types for the HockeyApp client.
//!
//! # Design
//! A client-error status (4xx) on a boolean operation is not an error at all:
//! `invite_user` and `is_app_member` report it as `Ok(false)`. Only the
//! families nobody expects from these endpoints (1xx, 3xx, 5xx, unknown) land
//! in `UnexpectedStatus`. Validation failures carry the rejected value so the
//! caller can report it without keeping its own copy.

use thiserror::Error;

/// Errors returned by the request builders, response parsers and the manager.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The invitation email is not a well-formed address.
    #[error("invalid email address: {email:?}")]
    InvalidEmail { email: String },

    /// An invitation tried to grant the owner role.
    #[error("role value cannot be set to {name} ({index})")]
    OwnerRoleForbidden { name: &'static str, index: u8 },

    /// A mail address could not be parsed.
    #[error("malformed address {address:?} at position {position}: {reason}")]
    MalformedAddress {
        address: String,
        position: usize,
        reason: String,
    },

    /// The service sent a role index outside the known set.
    #[error("invalid role value: {0}")]
    InvalidRole(i64),

    /// A timestamp field could not be parsed.
    #[error("invalid timestamp in {field}: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    /// The response status belongs to a family the operation does not expect.
    #[error("request failed with status {status} {reason} ({family})")]
    UnexpectedStatus {
        status: u16,
        reason: String,
        family: &'static str,
    },

    /// A listing call was refused with a 4xx status.
    #[error("request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The response body did not have the expected JSON shape.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The transport could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A required configuration key was not provided.
    #[error("missing configuration value: {key}")]
    MissingConfig { key: &'static str },
}
