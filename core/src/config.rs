// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.

use std::error::Error;
use std::path::{Path, PathBuf};

use shuttersync_webdav::WebDavConfig;

use crate::error::SyncError;

/// The name of the shuttersync application.
pub const APP_NAME: &str = "shuttersync";

/// Configuration for the sync engine.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directories scanned for photos and videos.
    pub media_paths: Vec<PathBuf>,

    /// Folder names to include; empty means every folder.
    #[serde(default)]
    pub folders: Vec<String>,

    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Remote WebDAV server settings.
    #[serde(default)]
    pub server: WebDavConfig,
}

impl Config {
    /// Normalize the configuration.
    ///
    /// Expands home and environment prefixes in paths, fills in the default
    /// state directory and strips trailing slashes from the server URL.
    pub fn normalize(&mut self) -> Result<(), SyncError> {
        // Normalize media paths
        for path in &mut self.media_paths {
            *path = expand_path(path)
                .map_err(|e| SyncError::Config(format!("Failed to expand media path: {e}")))?;
        }

        // Normalize state directory
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(expand_path(a).map_err(|e| {
                    SyncError::Config(format!("Failed to expand state directory path: {e}"))
                })?);
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!("Failed to get state directory: {e}"),
            },
        };

        // Remote paths are joined with '/', a trailing slash would double it
        while self.server.base_url.ends_with('/') {
            self.server.base_url.pop();
        }

        Ok(())
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}
