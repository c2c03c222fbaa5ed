// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use colored::Colorize;

use shuttersync_core::{CancellationToken, EventLog, Progress, ProgressSink};

/// Progress sink that prints one line per update to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn publish(&self, progress: &Progress) {
        if progress.is_indeterminate() {
            println!("{}", progress.label.dimmed());
        } else {
            let counter = format!("[{}/{}]", progress.current, progress.total);
            println!("{} {}", counter.bold(), progress.label);
        }
    }
}

/// Print the tail of the engine event log, newest last.
pub fn print_event_tail(events: &EventLog) {
    const TAIL: usize = 5;

    let snapshot = events.snapshot();
    if snapshot.is_empty() {
        return;
    }

    println!("{}", "Recent events:".bold());
    for entry in snapshot.iter().rev().take(TAIL).rev() {
        println!("  {entry}");
    }
}

/// Cancel the token on Ctrl-C; a second Ctrl-C aborts the process.
pub fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        eprintln!(
            "{} finishing the current item, press Ctrl-C again to abort",
            "Interrupted:".yellow()
        );
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}
