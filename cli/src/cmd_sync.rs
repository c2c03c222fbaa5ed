// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::sync::Arc;

use clap::{ArgMatches, Command};
use colored::Colorize;

use shuttersync_core::{CancellationToken, Engine, SyncOutcome};

use crate::console::{ConsoleProgress, cancel_on_ctrl_c, print_event_tail};

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdSync;

impl CmdSync {
    pub const NAME: &str = "sync";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Upload every pending photo and video to the server")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdSync
    }

    /// Run a sync pass and report the outcome.
    pub async fn run(self, engine: &mut Engine) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "starting sync...");

        engine.set_progress(Arc::new(ConsoleProgress));
        let cancel = CancellationToken::new();
        cancel_on_ctrl_c(cancel.clone());

        match engine.sync(&cancel).await {
            Ok(outcome) => {
                Self::report(&outcome);
                Ok(())
            }
            Err(e) => {
                print_event_tail(engine.events());
                let msg = if e.retryable() {
                    format!("{e} (retrying may help)")
                } else {
                    format!("{e} (fix the configuration and run again)")
                };
                Err(msg.into())
            }
        }
    }

    fn report(outcome: &SyncOutcome) {
        if outcome.cancelled {
            println!(
                "{} sync cancelled after {} of {} items ({} failed)",
                "Warning:".yellow(),
                outcome.uploaded,
                outcome.total,
                outcome.failed,
            );
        } else if outcome.total == 0 {
            println!("{}", "Everything is up to date.".green());
        } else if outcome.failed > 0 {
            println!(
                "{} synced {} of {} items, {} failed",
                "Warning:".yellow(),
                outcome.uploaded,
                outcome.total,
                outcome.failed,
            );
        } else {
            println!(
                "{}",
                format!("Successfully synced {} items.", outcome.uploaded).green()
            );
        }
    }
}
