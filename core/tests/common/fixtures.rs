// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.
//!
//! This module provides helper functions to create test configurations,
//! media files with known taken dates, and a recording progress sink.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use filetime::FileTime;
use jiff::{civil, tz::TimeZone};

use shuttersync_core::{AuthMethod, Config, Progress, ProgressSink, WebDavConfig};

/// Creates a test configuration with basic credentials.
///
/// # Arguments
///
/// * `media_dir` - Catalog root to scan
/// * `state_dir` - State directory for the sync database
/// * `base_url` - Server base URL, usually from a mock server
///
/// # Example
///
/// ```ignore
/// let config = test_config(&dirs.media_dir, &dirs.state_dir, &server.uri());
/// ```
#[must_use]
pub fn test_config(media_dir: &Path, state_dir: &Path, base_url: &str) -> Config {
    Config {
        media_paths: vec![media_dir.to_path_buf()],
        folders: vec![],
        state_dir: Some(state_dir.to_path_buf()),
        server: WebDavConfig {
            base_url: base_url.to_string(),
            auth: AuthMethod::Basic {
                username: "user".to_string(),
                password: "pass".to_string(),
            },
            ..Default::default()
        },
    }
}

/// Writes a media file whose modified time encodes the taken date.
///
/// The file content is the file name, so upload bodies can be asserted.
/// The taken timestamp is noon UTC on the given date.
pub fn write_media_file(dir: &Path, name: &str, date: civil::Date) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, name.as_bytes()).expect("Failed to write media file");

    let taken_at = date
        .at(12, 0, 0, 0)
        .to_zoned(TimeZone::UTC)
        .expect("Failed to build timestamp")
        .timestamp();
    let mtime = FileTime::from_unix_time(taken_at.as_second(), 0);
    filetime::set_file_mtime(&path, mtime).expect("Failed to set mtime");
    path
}

/// Progress sink that records every published update.
#[derive(Debug, Default)]
pub struct RecordingSink {
    snapshots: Mutex<Vec<Progress>>,
}

impl RecordingSink {
    /// Creates a new recording sink behind an [`Arc`], ready for
    /// [`Engine::set_progress`](shuttersync_core::Engine::set_progress).
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All updates published so far, in order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<Progress> {
        self.snapshots.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn publish(&self, progress: &Progress) {
        self.snapshots.lock().unwrap().push(progress.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_sets_media_root_and_credentials() {
        let config = test_config(
            Path::new("/media"),
            Path::new("/state"),
            "http://127.0.0.1:8080/dav",
        );

        assert_eq!(config.media_paths, vec![PathBuf::from("/media")]);
        assert_eq!(config.state_dir, Some(PathBuf::from("/state")));
        assert_eq!(config.server.base_url, "http://127.0.0.1:8080/dav");
        assert!(matches!(config.server.auth, AuthMethod::Basic { .. }));
    }

    #[test]
    fn write_media_file_sets_mtime_to_taken_date() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_media_file(dir.path(), "a.jpg", civil::date(2023, 5, 1));

        let modified = std::fs::metadata(&path).unwrap().modified().unwrap();
        let since_epoch = modified
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        assert_eq!(since_epoch, 1_682_942_400);
        assert_eq!(std::fs::read(&path).unwrap(), b"a.jpg");
    }

    #[test]
    fn recording_sink_keeps_updates_in_order() {
        let sink = RecordingSink::new();

        sink.publish(&Progress::indeterminate("Preparing"));
        sink.publish(&Progress::done(3));

        let snaps = sink.snapshots();
        assert_eq!(snaps.len(), 2);
        assert!(snaps[0].is_indeterminate());
        assert_eq!(snaps[1], Progress::done(3));
    }
}
