// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! WebDAV client validation tool.
//!
//! This is a standalone CLI example for testing the WebDAV client
//! implementation against real servers. It serves as both a validation tool
//! and example code for using the WebDavClient API.

use std::error::Error;

use clap::{Parser, Subcommand};
use colored::Colorize as _;
use shuttersync_webdav::{AuthMethod, RemoteTarget, WebDavClient, WebDavConfig};

/// WebDAV client validation tool.
#[derive(Parser)]
#[command(name = "webdav_cli")]
#[command(about = "WebDAV client validation tool", long_about = None)]
#[command(version)]
struct Cli {
    /// WebDAV server URL, e.g. https://dav.example.com/photos
    #[arg(long)]
    server: Option<String>,
    /// Username for basic auth
    #[arg(long)]
    username: Option<String>,
    /// Password for basic auth
    #[arg(long)]
    password: Option<String>,
    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Check whether a resource exists on the server
    Exists {
        /// Path relative to the server URL, e.g. 2023/05/photo.jpg
        path: String,
    },
    /// Create a collection on the server
    Mkcol {
        /// Name of the new collection, e.g. 2023
        name: String,
        /// Parent path relative to the server URL; empty for the root
        #[arg(long, default_value = "")]
        parent: String,
    },
    /// Upload a local file to the server
    Put {
        /// Local file to upload
        file: String,
        /// Destination path relative to the server URL
        path: String,
    },
    /// Show the dated remote path for a capture timestamp
    Target {
        /// Capture time in milliseconds since the Unix epoch
        timestamp_ms: i64,
        /// File name
        name: String,
    },
}

impl Cli {
    fn build_config(&self) -> Result<WebDavConfig, Box<dyn Error>> {
        // Read from environment variables first
        let server = self
            .server
            .clone()
            .or_else(|| std::env::var("SHUTTERSYNC_WEBDAV_SERVER").ok())
            .ok_or_else(|| {
                "server must be provided via --server or SHUTTERSYNC_WEBDAV_SERVER env var"
                    .to_string()
            })?;

        let username = self
            .username
            .clone()
            .or_else(|| std::env::var("SHUTTERSYNC_WEBDAV_USERNAME").ok());

        let password = self
            .password
            .clone()
            .or_else(|| std::env::var("SHUTTERSYNC_WEBDAV_PASSWORD").ok());

        let auth = if let (Some(username), Some(password)) = (username, password) {
            AuthMethod::Basic { username, password }
        } else {
            AuthMethod::None
        };

        Ok(WebDavConfig {
            base_url: server.trim_end_matches('/').to_string(),
            auth,
            timeout_secs: self.timeout,
            user_agent: "shuttersync-webdav-cli/0.1.0".to_string(),
        })
    }
}

async fn cmd_exists(client: &WebDavClient, base: &str, path: &str) -> Result<(), Box<dyn Error>> {
    let url = format!("{base}/{path}");
    if client.exists(&url).await? {
        println!("{} {url}", "✓ exists".green());
    } else {
        println!("{} {url}", "✗ missing".yellow());
    }
    Ok(())
}

async fn cmd_mkcol(
    client: &WebDavClient,
    base: &str,
    parent: &str,
    name: &str,
) -> Result<(), Box<dyn Error>> {
    let parent_url = if parent.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{parent}")
    };

    if client.mkcol(&parent_url, name).await? {
        println!("{} {parent_url}/{name}", "✓ created".green());
    } else {
        println!("{} {parent_url}/{name}", "= already there".yellow());
    }
    Ok(())
}

async fn cmd_put(
    client: &WebDavClient,
    base: &str,
    file: &str,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let body = std::fs::read(file)?;
    let content_type = mime_for(path);

    let url = format!("{base}/{path}");
    client.put(&url, body, content_type).await?;
    println!("{} {url}", "✓ uploaded".green());
    Ok(())
}

/// Tiny extension-based content-type table, enough for manual testing.
fn mime_for(path: &str) -> Option<&'static str> {
    let ext = path.rsplit('.').next()?;
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "mp4" => Some("video/mp4"),
        "mov" => Some("video/quicktime"),
        _ => None,
    }
}

fn cmd_target(timestamp_ms: i64, name: &str) {
    let target = RemoteTarget::from_timestamp_ms(timestamp_ms, name);
    println!("year:  {}", target.year());
    println!("month: {}", target.month());
    println!("url:   {}", target.file_url("<base>"));
}

fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env files (if they exist)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Target { timestamp_ms, name } = &cli.command {
        cmd_target(*timestamp_ms, name);
        return Ok(());
    }

    let config = cli.build_config()?;
    let base = config.base_url.clone();
    let client = WebDavClient::new(config)?;

    // Create a new runtime for the async operations
    let runtime = tokio::runtime::Runtime::new()?;

    let result = runtime.block_on(async {
        match &cli.command {
            Commands::Exists { path } => cmd_exists(&client, &base, path).await,
            Commands::Mkcol { name, parent } => cmd_mkcol(&client, &base, parent, name).await,
            Commands::Put { file, path } => cmd_put(&client, &base, file, path).await,
            Commands::Target { .. } => unreachable!(),
        }
    });

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }

    Ok(())
}
