// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for shadowgate.

use thiserror::Error;

/// The primary error type shared by the routing core and its callers.
#[derive(Debug, Error)]
pub enum ShadowgateError {
    /// A caller passed a value outside the routing contract (bucket out of
    /// range, unrecognized mode). Not retryable: the caller must fix the value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration errors surfaced outside the diagnostic rendering path.
    #[error("configuration error: {0}")]
    Config(String),

    /// A request payload could not be read or decoded.
    #[error("payload error: {message}")]
    Payload {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShadowgateError {
    /// Returns `true` for routing contract violations.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
