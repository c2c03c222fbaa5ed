// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! WebDAV client configuration.

use serde::Deserialize;

/// Authentication method for the WebDAV server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,

    /// HTTP Basic authentication.
    #[serde(rename = "basic")]
    Basic {
        /// Username for authentication.
        username: String,
        /// Password for authentication.
        password: String,
    },
}

/// Configuration for the WebDAV client.
#[derive(Debug, Clone, Deserialize)]
pub struct WebDavConfig {
    /// Base URL of the remote collection,
    /// e.g. `https://dav.example.com/photos`.
    #[serde(default)]
    pub base_url: String,

    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent string for requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("shuttersync-webdav/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for WebDavConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
