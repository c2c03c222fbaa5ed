// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! WebDAV operations used by the sync engine.

use std::sync::Arc;

use reqwest::{Method, StatusCode};

use crate::config::WebDavConfig;
use crate::error::WebDavError;
use crate::http::HttpClient;

/// Client for talking to a WebDAV collection.
///
/// Only the subset needed for one-way media upload is implemented:
/// existence checks, collection creation and content upload. The client is
/// cheap to clone and safe to share across tasks.
///
/// # Example
///
/// ```no_run
/// use shuttersync_webdav::{AuthMethod, WebDavClient, WebDavConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = WebDavConfig {
///     base_url: "https://dav.example.com/photos".to_string(),
///     auth: AuthMethod::Basic {
///         username: "user".to_string(),
///         password: "pass".to_string(),
///     },
///     ..Default::default()
/// };
///
/// let client = WebDavClient::new(config)?;
/// if !client.exists("https://dav.example.com/photos/2023/05/a.jpg").await? {
///     client
///         .put(
///             "https://dav.example.com/photos/2023/05/a.jpg",
///             std::fs::read("a.jpg")?,
///             Some("image/jpeg"),
///         )
///         .await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WebDavClient {
    http: Arc<HttpClient>,
}

impl WebDavClient {
    /// Creates a new WebDAV client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WebDavConfig) -> Result<Self, WebDavError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
        })
    }

    /// Checks whether the resource at `url` exists.
    ///
    /// Issues a `HEAD` request. Any 2xx status counts as present, any other
    /// status as absent.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure; an HTTP-level "not
    /// found" is reported as `Ok(false)`.
    pub async fn exists(&self, url: &str) -> Result<bool, WebDavError> {
        let resp = self.http.send(self.http.request(Method::HEAD, url)).await?;

        tracing::trace!(url, status = %resp.status(), "HEAD");
        Ok(resp.status().is_success())
    }

    /// Creates the collection `name` under `parent_url`.
    ///
    /// Returns `Ok(true)` when the collection was created and `Ok(false)`
    /// when the server reports `405 Method Not Allowed`, which RFC 4918
    /// §9.3.1 prescribes for a collection that already exists.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any other status. Callers
    /// preparing directories are expected to log and continue; a missing
    /// collection surfaces again at upload time.
    pub async fn mkcol(&self, parent_url: &str, name: &str) -> Result<bool, WebDavError> {
        let method = Method::from_bytes(b"MKCOL")
            .map_err(|e| WebDavError::Transport(format!("Invalid method: {e}")))?;

        let url = format!("{}/{name}", parent_url.trim_end_matches('/'));
        let resp = self.http.send(self.http.request(method, &url)).await?;

        let status = resp.status();
        tracing::trace!(url, status = %status, "MKCOL");
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::METHOD_NOT_ALLOWED {
            Ok(false)
        } else {
            Err(WebDavError::Status {
                status: status.as_u16(),
                url,
            })
        }
    }

    /// Uploads `body` to `url`, overwriting any existing resource.
    ///
    /// Any 2xx status counts as success; servers typically answer `201
    /// Created` or `204 No Content`. There is no retry here, a failed
    /// upload is simply attempted again on the next run.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn put(
        &self,
        url: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), WebDavError> {
        let mut req = self.http.request(Method::PUT, url).body(body);
        if let Some(mime) = content_type {
            req = req.header("Content-Type", mime);
        }

        let resp = self.http.send(req).await?;

        let status = resp.status();
        tracing::trace!(url, status = %status, "PUT");
        if status.is_success() {
            Ok(())
        } else {
            Err(WebDavError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }
}
