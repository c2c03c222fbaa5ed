// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use jiff::{Timestamp, tz::TimeZone};

use shuttersync_core::Engine;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdStatus;

impl CmdStatus {
    pub const NAME: &str = "status";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Show how much of the catalog has been synced")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdStatus
    }

    /// Show catalog and sync record counts. Works without server settings.
    pub async fn run(self, engine: &mut Engine) -> Result<(), Box<dyn Error>> {
        const RECENT: usize = 10;

        tracing::debug!(?self, "collecting status...");

        let catalog = engine.scan_catalog().await;
        let mut pending = 0usize;
        for item in &catalog {
            if !engine.store().is_synced(item.id).await? {
                pending += 1;
            }
        }
        let records = engine.store().all().await?;

        println!("📷 {}", "Catalog".bold());
        println!("  media files     {}", catalog.len());
        println!("  synced records  {}", records.len());
        println!("  pending upload  {pending}");

        if !records.is_empty() {
            println!();
            println!("☁️ {}", "Recently synced".bold());
            for record in records.iter().rev().take(RECENT) {
                let when = format_time(record.synced_at_ms);
                println!("  {}  {}", when.dimmed(), record.file_name);
            }
        }
        Ok(())
    }
}

fn format_time(ms: i64) -> String {
    Timestamp::from_millisecond(ms)
        .map(|t| {
            t.to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|_| "unknown".to_string())
}
