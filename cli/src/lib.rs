// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface for shuttersync.

mod cli;
mod cmd_forget;
mod cmd_generate_completion;
mod cmd_reconcile;
mod cmd_status;
mod cmd_sync;
mod config;
mod console;

pub use crate::cli::{Cli, Commands, run};
