//! Identifier types for the observability GPT agent.
//!
//! This module provides strongly-typed identifiers for agents, plans, agent
//! requests, batches and sessions.
//!
//! # Macro-based ID Types
//!
//! The `string_id_type!` macro reduces boilerplate for the opaque string
//! identifiers issued by the billing backend (DIDs and request ids), ensuring
//! consistent implementation of serialization, parsing, and display traits.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of random bytes in a session identifier.
const SESSION_ID_BYTES: usize = 16;

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The identifier was empty or whitespace only.
    #[error("identifier must not be empty")]
    Empty,

    /// The identifier is not a valid UUID.
    #[error("invalid UUID format")]
    InvalidUuid,

    /// The identifier is not a hex-encoded session id.
    #[error("invalid session id: expected {expected} hex characters")]
    InvalidSessionId {
        /// Expected number of hex characters.
        expected: usize,
    },
}

/// Macro to define an opaque, non-empty string identifier.
///
/// This macro generates a newtype wrapper around `String` with implementations for:
/// - `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `Serialize`, `Deserialize` (as string, rejecting empty values)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`, `AsRef<str>`
///
/// # Example
///
/// ```ignore
/// string_id_type!(MyId, "A custom identifier type.");
/// let id: MyId = "did:nv:abc".parse().unwrap();
/// ```
macro_rules! string_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, rejecting empty values.
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(IdError::Empty);
                }
                Ok(Self(value))
            }

            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id_type!(AgentId, "An agent identifier (DID format, e.g. `did:nv:...`).\n\nThe agent is the billed identity on whose behalf calls are made.");
string_id_type!(PlanId, "A payment plan identifier (DID format).");
string_id_type!(AgentRequestId, "An agent request identifier issued by the billing backend.\n\nOne agent request is one billable unit of work; credits are redeemed against it.");

impl PlanId {
    /// Placeholder plan used when no plan is configured.
    pub const PLACEHOLDER: &'static str = "did:nv:0000000000000000000000000000000000000000";

    /// The placeholder plan id.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(Self::PLACEHOLDER.to_string())
    }
}

/// A batch identifier shared by the sub-calls of a combined generation.
///
/// Only used for correlating log entries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BatchId(uuid::Uuid);

impl BatchId {
    /// Generate a new random batch id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Return the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl FromStr for BatchId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = uuid::Uuid::parse_str(s).map_err(|_| IdError::InvalidUuid)?;
        Ok(Self(uuid))
    }
}

impl fmt::Debug for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BatchId({})", self.0)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BatchId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BatchId> for String {
    fn from(id: BatchId) -> Self {
        id.0.to_string()
    }
}

/// A session identifier: 16 random bytes, hex encoded.
///
/// A fresh session id is generated for every operation.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new random session id.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Return the session id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SessionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expected = SESSION_ID_BYTES * 2;
        if s.len() != expected || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidSessionId { expected });
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SessionId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}
