// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded in-memory event log with change notification.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use jiff::Zoned;
use tokio::sync::broadcast;

/// Number of entries retained by default.
const DEFAULT_CAPACITY: usize = 100;

/// Rolling log of recent, human-readable sync events.
///
/// A clonable handle to a bounded ring of entries. Writers
/// [`append`](Self::append); readers either take a
/// [`snapshot`](Self::snapshot) or [`subscribe`](Self::subscribe) for live
/// updates. Once the ring is full the oldest entry is discarded. Entries
/// are display strings, not structured diagnostics; the latter go through
/// `tracing`.
#[derive(Debug, Clone)]
pub struct EventLog {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    entries: Mutex<VecDeque<String>>,
    capacity: usize,
    tx: broadcast::Sender<String>,
}

impl EventLog {
    /// Creates a log retaining the default 100 entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a log retaining at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(VecDeque::with_capacity(capacity)),
                capacity,
                tx,
            }),
        }
    }

    /// Appends a timestamped entry and notifies subscribers.
    pub fn append(&self, message: impl Into<String>) {
        let entry = format!("[{}] {}", Zoned::now().strftime("%H:%M:%S"), message.into());

        let mut entries = lock(&self.inner.entries);
        if entries.len() == self.inner.capacity {
            entries.pop_front();
        }
        entries.push_back(entry.clone());
        drop(entries);

        // Nobody listening is fine.
        let _ = self.inner.tx.send(entry);
    }

    /// Returns all retained entries, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        lock(&self.inner.entries).iter().cloned().collect()
    }

    /// Subscribes to entries appended after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.inner.tx.subscribe()
    }

    /// Discards all retained entries.
    pub fn clear(&self) {
        lock(&self.inner.entries).clear();
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner.entries).len()
    }

    /// Whether the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
