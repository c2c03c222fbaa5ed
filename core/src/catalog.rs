// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Local media discovery.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use sha2::{Digest, Sha256};
use tokio::fs;

/// Kind of media an item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video clip.
    Video,
}

/// A photo or video discovered under the configured media roots.
///
/// Items are rebuilt from the filesystem on every scan and never persisted.
/// The stable part is `id`, derived from the absolute path, which keys the
/// sync state store across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Stable identifier derived from the path.
    pub id: i64,
    /// File name, reused as the remote file name.
    pub name: String,
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Capture time in milliseconds since the Unix epoch; 0 when unknown.
    pub taken_at_ms: i64,
    /// MIME type guessed from the extension.
    pub mime: Option<String>,
    /// Image or video.
    pub kind: MediaKind,
    /// Name of the containing folder.
    pub folder: String,
}

/// Scans `roots` recursively for media files.
///
/// Returns items newest first by capture time. When `folders` is non-empty,
/// only items whose containing folder matches one of the names are kept.
/// Hidden files and directories are skipped; unreadable entries are logged
/// and skipped. The scan itself never fails.
pub async fn scan_media(roots: &[PathBuf], folders: &[String]) -> Vec<MediaItem> {
    let filter: HashSet<&str> = folders.iter().map(String::as_str).collect();

    let mut items = Vec::new();
    let mut queue: Vec<PathBuf> = roots.to_vec();
    while let Some(dir) = queue.pop() {
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                continue;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                    break;
                }
            };

            let path = entry.path();
            if file_name_of(&path).is_none_or(|name| name.starts_with('.')) {
                continue;
            }

            match entry.file_type().await {
                Ok(kind) if kind.is_dir() => queue.push(path),
                Ok(kind) if kind.is_file() => {
                    if let Some(item) = read_item(&path, &filter).await {
                        items.push(item);
                    }
                }
                Ok(_) => {} // symlinks and specials are ignored
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to stat entry");
                }
            }
        }
    }

    // Newest first; the id tie-breaker keeps the order stable across runs.
    items.sort_by(|a, b| b.taken_at_ms.cmp(&a.taken_at_ms).then(a.id.cmp(&b.id)));
    items
}

async fn read_item(path: &Path, filter: &HashSet<&str>) -> Option<MediaItem> {
    let mime = mime_guess::from_path(path).first()?;
    let kind = if mime.type_() == mime_guess::mime::IMAGE {
        MediaKind::Image
    } else if mime.type_() == mime_guess::mime::VIDEO {
        MediaKind::Video
    } else {
        return None;
    };

    let name = file_name_of(path)?.to_string();
    let folder = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    if !filter.is_empty() && !filter.contains(folder.as_str()) {
        return None;
    }

    let taken_at_ms = match fs::metadata(path).await {
        Ok(meta) => mtime_ms(&meta),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read metadata");
            0
        }
    };

    Some(MediaItem {
        id: path_id(path),
        name,
        path: path.to_path_buf(),
        taken_at_ms,
        mime: Some(mime.essence_str().to_string()),
        kind,
        folder,
    })
}

fn file_name_of(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

fn mtime_ms(meta: &std::fs::Metadata) -> i64 {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or(0)
}

/// Stable identity for a path: the first eight bytes of its SHA-256 digest.
fn path_id(path: &Path) -> i64 {
    let digest = Sha256::digest(path.as_os_str().as_encoded_bytes());
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&digest[..8]);
    i64::from_be_bytes(buf)
}
