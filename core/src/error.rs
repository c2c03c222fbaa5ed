// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Run-level error types.

use thiserror::Error;

use shuttersync_webdav::WebDavError;

/// Errors that abort a whole sync or reconciliation run.
///
/// Per-item failures never reach this level; the engine absorbs them and
/// reports counts instead.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SyncError {
    /// The run was started without a usable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The sync state store failed.
    #[error("State store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Local filesystem failure outside of per-item reads.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The WebDAV client could not be set up.
    #[error(transparent)]
    WebDav(#[from] WebDavError),
}

impl SyncError {
    /// Whether a scheduler should re-attempt the run later.
    ///
    /// Configuration errors are permanent until the user changes something;
    /// everything else is treated as transient.
    #[must_use]
    pub fn retryable(&self) -> bool {
        !matches!(self, SyncError::Config(_))
    }
}
