// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Progress reporting for long-running runs.

use std::fmt;

/// Sentinel fraction for progress without a known total.
pub const INDETERMINATE: f32 = -1.0;

/// A point-in-time progress snapshot.
///
/// `fraction` is within `0.0..=1.0`, or [`INDETERMINATE`] when the total is
/// not known yet. Snapshots are transient; each one replaces the previous.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Completed fraction of the run.
    pub fraction: f32,
    /// Position of the item being processed, starting at 1.
    pub current: usize,
    /// Total number of items in this run.
    pub total: usize,
    /// Human-readable label, usually the current file name.
    pub label: String,
}

impl Progress {
    /// A snapshot without a known total.
    #[must_use]
    pub fn indeterminate(label: impl Into<String>) -> Self {
        Self {
            fraction: INDETERMINATE,
            current: 0,
            total: 0,
            label: label.into(),
        }
    }

    /// The terminal snapshot of a finished run.
    #[must_use]
    pub fn done(total: usize) -> Self {
        Self {
            fraction: 1.0,
            current: total,
            total,
            label: "Done".to_string(),
        }
    }

    /// Whether the total is not known yet.
    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        self.fraction < 0.0
    }
}

/// Receiver for progress snapshots.
///
/// Implementations are called between items and must be cheap; slow sinks
/// slow the whole run down.
pub trait ProgressSink: Send + Sync + fmt::Debug {
    /// Delivers the next snapshot.
    fn publish(&self, progress: &Progress);
}

/// Sink that drops every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn publish(&self, _progress: &Progress) {}
}
