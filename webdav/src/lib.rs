// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Minimal WebDAV client for one-way media upload.
//!
//! Implements the small slice of RFC 4918 that mirroring a library onto a
//! remote collection actually needs: existence checks (`HEAD`), collection
//! creation (`MKCOL`) and content upload (`PUT`), plus the mapping from a
//! capture timestamp to the dated remote path.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else, clippy::match_bool)]

mod client;
mod config;
mod error;
mod http;
mod types;

pub use crate::client::WebDavClient;
pub use crate::config::{AuthMethod, WebDavConfig};
pub use crate::error::WebDavError;
pub use crate::types::RemoteTarget;
