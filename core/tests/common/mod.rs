// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - Temporary directory management with auto-cleanup

mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{RecordingSink, test_config, write_media_file};
#[allow(unused_imports)]
pub use temp_dir::setup_temp_dirs;
