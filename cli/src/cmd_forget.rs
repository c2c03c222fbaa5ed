// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use shuttersync_core::Engine;

#[derive(Debug, Clone)]
pub struct CmdForget {
    pub name: String,
}

impl CmdForget {
    pub const NAME: &str = "forget";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Drop the sync records of a file so the next sync uploads it again")
            .arg(arg!(name: <FILE_NAME> "File name exactly as it appears in the records"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        match matches.get_one::<String>("name") {
            Some(name) => Self { name: name.clone() },
            _ => unreachable!(),
        }
    }

    pub async fn run(self, engine: &mut Engine) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "forgetting records...");

        let removed = engine.forget(&self.name).await?;
        if removed == 0 {
            println!("No records match {}", self.name);
        } else {
            println!(
                "{}",
                format!("Removed {removed} record(s) for {}", self.name).green()
            );
        }
        Ok(())
    }
}
