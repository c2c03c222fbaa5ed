// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Sync and reconciliation runs.

use std::collections::HashSet;
use std::sync::Arc;

use jiff::Timestamp;
use tokio_util::sync::CancellationToken;

use shuttersync_webdav::{AuthMethod, RemoteTarget, WebDavClient, WebDavError};

use crate::catalog::{MediaItem, scan_media};
use crate::config::Config;
use crate::error::SyncError;
use crate::events::EventLog;
use crate::progress::{NoProgress, Progress, ProgressSink};
use crate::store::{SyncRecord, SyncStore};

/// Outcome of a completed sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Items that were pending at the start of the run.
    pub total: usize,
    /// Items uploaded and recorded.
    pub uploaded: usize,
    /// Items that failed and stay pending.
    pub failed: usize,
    /// Whether the run stopped early on cancellation.
    pub cancelled: bool,
}

/// Outcome of a completed reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Items in the local catalog.
    pub total: usize,
    /// Items found on the server and recorded.
    pub matched: usize,
    /// Whether the run stopped early on cancellation.
    pub cancelled: bool,
}

/// Why a single item did not make it to the server.
#[derive(Debug, thiserror::Error)]
enum ItemError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Upload(#[from] WebDavError),
}

/// The sync engine.
///
/// Owns the pieces every run needs: the WebDAV client, the state store and
/// the event log. Two run flavors are exposed. [`sync`](Self::sync) uploads
/// whatever the catalog holds that the store does not;
/// [`reconcile`](Self::reconcile) goes the other way and rebuilds the store
/// from what the server already has.
///
/// Runs process one item at a time. Item failures are absorbed and counted
/// so a single bad file cannot stop the rest; only configuration and state
/// store problems abort a run.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    client: WebDavClient,
    store: SyncStore,
    events: EventLog,
    progress: Arc<dyn ProgressSink>,
}

impl Engine {
    /// Creates an engine from a configuration.
    ///
    /// Normalizes the configuration, prepares the state directory and opens
    /// the state store. Server settings are validated at run start, not
    /// here, so an engine for an unconfigured server can still serve status
    /// queries.
    ///
    /// # Errors
    ///
    /// Returns an error if normalization, state directory creation or store
    /// opening fails.
    pub async fn new(mut config: Config) -> Result<Self, SyncError> {
        config.normalize()?;

        if let Some(dir) = &config.state_dir {
            tokio::fs::create_dir_all(dir).await?;
        }

        let client = WebDavClient::new(config.server.clone())?;
        let store = SyncStore::open(config.state_dir.as_deref()).await?;

        Ok(Self {
            config,
            client,
            store,
            events: EventLog::new(),
            progress: Arc::new(NoProgress),
        })
    }

    /// Replaces the progress sink.
    pub fn set_progress(&mut self, sink: Arc<dyn ProgressSink>) {
        self.progress = sink;
    }

    /// The rolling event log of this engine.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The sync state store of this engine.
    #[must_use]
    pub fn store(&self) -> &SyncStore {
        &self.store
    }

    /// Scans the configured media roots.
    pub async fn scan_catalog(&self) -> Vec<MediaItem> {
        scan_media(&self.config.media_paths, &self.config.folders).await
    }

    /// Closes the engine, releasing the state store.
    pub async fn close(self) {
        self.store.close().await;
    }

    /// Runs a sync pass: uploads every catalog item that has no record yet.
    ///
    /// Progress is published around each item and the event log records the
    /// significant steps. An item is recorded as synced only after the
    /// server confirms its upload. Cancellation is honored between items;
    /// the outcome then reports what was finished up to that point.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] when the server settings are unusable,
    /// before anything touches the network or the store. State store
    /// failures mid-run abort with a retryable error.
    pub async fn sync(&self, cancel: &CancellationToken) -> Result<SyncOutcome, SyncError> {
        let base = self.validated_base_url()?;

        tracing::info!("starting sync run");
        self.events.append("Starting sync");
        self.progress.publish(&Progress::indeterminate("Preparing"));

        let catalog = self.scan_catalog().await;
        tracing::debug!(items = catalog.len(), "catalog scanned");

        let pending = self.pending_items(catalog).await?;
        let total = pending.len();
        if total == 0 {
            self.events.append("Everything is up to date");
            self.progress.publish(&Progress::done(0));
            tracing::info!("nothing to upload");
            return Ok(SyncOutcome {
                total: 0,
                uploaded: 0,
                failed: 0,
                cancelled: false,
            });
        }

        self.events.append(format!("Found {total} items to upload"));

        let plan: Vec<(MediaItem, RemoteTarget)> = pending
            .into_iter()
            .map(|item| {
                let target = RemoteTarget::from_timestamp_ms(item.taken_at_ms, &item.name);
                (item, target)
            })
            .collect();

        if cancel.is_cancelled() {
            return Ok(self.cancelled_sync(total, 0, 0));
        }

        self.precreate_collections(&base, plan.iter().map(|(_, target)| target))
            .await;

        let mut uploaded = 0usize;
        let mut failed = 0usize;
        for (index, (item, target)) in plan.iter().enumerate() {
            if cancel.is_cancelled() {
                return Ok(self.cancelled_sync(total, uploaded, failed));
            }

            let current = index + 1;
            self.events
                .append(format!("Uploading ({current}/{total}): {}", item.name));
            self.progress.publish(&Progress {
                fraction: index as f32 / total as f32,
                current,
                total,
                label: item.name.clone(),
            });

            match self.upload_item(&base, item, target).await {
                Ok(()) => {
                    let record = SyncRecord {
                        id: item.id,
                        file_name: item.name.clone(),
                        synced_at_ms: Timestamp::now().as_millisecond(),
                    };
                    self.store.insert(&record).await?;
                    self.events.append(format!("Synced {}", item.name));
                    uploaded += 1;
                }
                Err(e) => {
                    failed += 1;
                    self.events
                        .append(format!("Failed to upload {}: {e}", item.name));
                    tracing::warn!(name = %item.name, error = %e, "upload failed");
                }
            }
        }

        self.progress.publish(&Progress::done(total));
        self.events
            .append(format!("Sync finished: {uploaded} uploaded, {failed} failed"));
        tracing::info!(uploaded, failed, "sync finished");
        Ok(SyncOutcome {
            total,
            uploaded,
            failed,
            cancelled: false,
        })
    }

    /// Rebuilds the state store from the server.
    ///
    /// Clears every record, then walks the full catalog and records each
    /// item whose remote file already exists. Nothing is uploaded. Useful
    /// when the server already holds uploads from another machine, or after
    /// the state database was lost.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] when the server settings are unusable;
    /// the store is only cleared after that check passes. State store
    /// failures mid-run abort with a retryable error, in which case the
    /// next run simply rebuilds from scratch again.
    pub async fn reconcile(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ReconcileOutcome, SyncError> {
        let base = self.validated_base_url()?;

        tracing::info!("starting reconciliation");
        self.events.append("Starting reconciliation");
        self.progress.publish(&Progress::indeterminate("Preparing"));

        self.store.delete_all().await?;
        self.events.append("Cleared sync records");

        let catalog = self.scan_catalog().await;
        let total = catalog.len();
        self.events
            .append(format!("Found {total} local items to verify"));

        let mut matched = 0usize;
        for (index, item) in catalog.iter().enumerate() {
            if cancel.is_cancelled() {
                self.events.append("Reconciliation cancelled");
                tracing::info!(matched, "reconciliation cancelled");
                return Ok(ReconcileOutcome {
                    total,
                    matched,
                    cancelled: true,
                });
            }

            let current = index + 1;
            self.progress.publish(&Progress {
                fraction: current as f32 / total as f32,
                current,
                total,
                label: format!("Verifying: {}", item.name),
            });

            let target = RemoteTarget::from_timestamp_ms(item.taken_at_ms, &item.name);
            match self.client.exists(&target.file_url(&base)).await {
                Ok(true) => {
                    let record = SyncRecord {
                        id: item.id,
                        file_name: item.name.clone(),
                        synced_at_ms: Timestamp::now().as_millisecond(),
                    };
                    self.store.insert(&record).await?;
                    matched += 1;
                }
                Ok(false) => {}
                Err(e) => {
                    self.events
                        .append(format!("Could not verify {}: {e}", item.name));
                    tracing::warn!(name = %item.name, error = %e, "existence check failed");
                }
            }
        }

        self.progress.publish(&Progress::done(total));
        self.events.append(format!(
            "Reconciliation finished: {matched} of {total} items already on the server"
        ));
        tracing::info!(matched, total, "reconciliation finished");
        Ok(ReconcileOutcome {
            total,
            matched,
            cancelled: false,
        })
    }

    /// Removes sync records whose file name matches `name`.
    ///
    /// Returns how many records were removed. The remote copy is untouched;
    /// the next sync run uploads the item again.
    ///
    /// # Errors
    ///
    /// Returns an error if the state store fails.
    pub async fn forget(&self, name: &str) -> Result<usize, SyncError> {
        let mut removed = 0usize;
        for record in self.store.all().await? {
            if record.file_name == name {
                self.store.delete(&record).await?;
                removed += 1;
            }
        }

        if removed > 0 {
            self.events
                .append(format!("Forgot {removed} record(s) for {name}"));
        }
        Ok(removed)
    }

    /// Checks the server settings a run needs.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] if the base URL is blank or basic
    /// credentials are missing. Nothing has touched the network at that
    /// point; the caller treats this as terminal, not retryable.
    fn validated_base_url(&self) -> Result<String, SyncError> {
        let base = self.config.server.base_url.trim();
        if base.is_empty() {
            return Err(SyncError::Config("server.base_url is not set".to_string()));
        }

        match &self.config.server.auth {
            AuthMethod::Basic { username, password }
                if !username.trim().is_empty() && !password.trim().is_empty() =>
            {
                Ok(base.to_string())
            }
            _ => Err(SyncError::Config(
                "server credentials are not set; configure basic auth with username and password"
                    .to_string(),
            )),
        }
    }

    /// Filters the catalog down to items with no sync record.
    async fn pending_items(&self, catalog: Vec<MediaItem>) -> Result<Vec<MediaItem>, sqlx::Error> {
        let mut pending = Vec::with_capacity(catalog.len());
        for item in catalog {
            if !self.store.is_synced(item.id).await? {
                pending.push(item);
            }
        }
        Ok(pending)
    }

    /// Creates the `YYYY` and `YYYY/MM` collections the run needs.
    ///
    /// Parents are created before children and each collection only once.
    /// Failures are logged and skipped; a collection that is truly missing
    /// surfaces again as an upload failure.
    async fn precreate_collections<'a>(
        &self,
        base: &str,
        targets: impl Iterator<Item = &'a RemoteTarget>,
    ) {
        let mut years: HashSet<&str> = HashSet::new();
        let mut months: HashSet<(&str, &str)> = HashSet::new();
        for target in targets {
            if years.insert(target.year()) {
                self.mkcol_advisory(base, target.year()).await;
            }
            if months.insert((target.year(), target.month())) {
                self.mkcol_advisory(&target.year_url(base), target.month())
                    .await;
            }
        }
    }

    async fn mkcol_advisory(&self, parent_url: &str, name: &str) {
        match self.client.mkcol(parent_url, name).await {
            Ok(true) => {
                self.events.append(format!("Created remote folder {name}"));
                tracing::debug!(parent_url, name, "collection created");
            }
            Ok(false) => {} // already there
            Err(e) => {
                tracing::debug!(parent_url, name, error = %e, "mkcol failed, continuing");
            }
        }
    }

    async fn upload_item(
        &self,
        base: &str,
        item: &MediaItem,
        target: &RemoteTarget,
    ) -> Result<(), ItemError> {
        let bytes = tokio::fs::read(&item.path)
            .await
            .map_err(|source| ItemError::Read {
                path: item.path.display().to_string(),
                source,
            })?;

        let url = target.file_url(base);
        self.client.put(&url, bytes, item.mime.as_deref()).await?;
        tracing::debug!(name = %item.name, url, "uploaded");
        Ok(())
    }

    fn cancelled_sync(&self, total: usize, uploaded: usize, failed: usize) -> SyncOutcome {
        self.events.append("Sync cancelled");
        tracing::info!(uploaded, failed, "sync cancelled");
        SyncOutcome {
            total,
            uploaded,
            failed,
            cancelled: true,
        }
    }
}
