// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core sync engine for shuttersync.
//!
//! Discovers photos and videos under the configured media roots, mirrors
//! them into a dated WebDAV collection layout and keeps a durable record of
//! what has been uploaded, so every run stays incremental.

mod catalog;
mod config;
mod engine;
mod error;
mod events;
mod progress;
mod store;

pub use shuttersync_webdav::{AuthMethod, WebDavConfig};
pub use tokio_util::sync::CancellationToken;

pub use crate::catalog::{MediaItem, MediaKind, scan_media};
pub use crate::config::{APP_NAME, Config};
pub use crate::engine::{Engine, ReconcileOutcome, SyncOutcome};
pub use crate::error::SyncError;
pub use crate::events::EventLog;
pub use crate::progress::{NoProgress, Progress, ProgressSink};
pub use crate::store::{SyncRecord, SyncStore};
