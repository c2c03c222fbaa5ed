// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for WebDAV operations.

use thiserror::Error;

/// Errors that can occur during WebDAV operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WebDavError {
    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure: connect, TLS, timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a status the operation cannot accept.
    #[error("Unexpected status {status} for {url}")]
    Status {
        /// HTTP status code returned by the server.
        status: u16,
        /// URL of the failed request.
        url: String,
    },
}

impl From<reqwest::Error> for WebDavError {
    fn from(err: reqwest::Error) -> Self {
        WebDavError::Transport(err.to_string())
    }
}
