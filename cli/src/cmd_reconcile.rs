// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::sync::Arc;

use clap::{ArgMatches, Command};
use colored::Colorize;

use shuttersync_core::{CancellationToken, Engine, ReconcileOutcome};

use crate::console::{ConsoleProgress, cancel_on_ctrl_c, print_event_tail};

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdReconcile;

impl CmdReconcile {
    pub const NAME: &str = "reconcile";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Rebuild sync records from what the server already has")
            .long_about(
                "\
Rebuild sync records from what the server already has. Clears all local sync records, then checks \
every catalog item against the server and records the ones that are already there. Nothing is \
uploaded.",
            )
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdReconcile
    }

    /// Run a reconciliation pass and report the outcome.
    pub async fn run(self, engine: &mut Engine) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "starting reconciliation...");

        engine.set_progress(Arc::new(ConsoleProgress));
        let cancel = CancellationToken::new();
        cancel_on_ctrl_c(cancel.clone());

        match engine.reconcile(&cancel).await {
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

    fn report(outcome: &ReconcileOutcome) {
        if outcome.cancelled {
            println!(
                "{} reconciliation cancelled, {} of {} items recorded so far",
                "Warning:".yellow(),
                outcome.matched,
                outcome.total,
            );
        } else {
            println!(
                "{}",
                format!(
                    "Marked {} of {} items as already synced.",
                    outcome.matched, outcome.total
                )
                .green()
            );
        }
    }
}
