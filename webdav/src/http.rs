// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP plumbing shared by the WebDAV operations.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};

use crate::config::{AuthMethod, WebDavConfig};
use crate::error::WebDavError;

/// HTTP client that applies the configured authentication to every request.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: WebDavConfig,
}

impl HttpClient {
    /// Creates a new HTTP client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn new(config: WebDavConfig) -> Result<Self, WebDavError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Builds a request with authentication headers applied.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut req = self.client.request(method, url);

        match &self.config.auth {
            AuthMethod::Basic { username, password } => {
                req = req.basic_auth(username, Some(password));
            }
            AuthMethod::None => {}
        }

        req
    }

    /// Sends a request, mapping transport failures only.
    ///
    /// Status handling stays with the caller; the operations disagree on
    /// which statuses are acceptable.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn send(&self, req: RequestBuilder) -> Result<Response, WebDavError> {
        Ok(req.send().await?)
    }
}
