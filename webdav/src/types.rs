// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Mapping from capture timestamps to remote paths.

use jiff::{Timestamp, tz::TimeZone};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped in the file-name segment of a remote URL.
///
/// Controls plus everything that would terminate or restructure a path
/// segment. Year and month segments are plain digits and skip escaping.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'^')
    .add(b'|')
    .add(b'[')
    .add(b']');

/// Remote location of a media item, derived from its capture time.
///
/// The layout on the server is `<base>/<YYYY>/<MM>/<file name>`. Year and
/// month come from the capture timestamp in UTC, so an item maps to the
/// same collection on every machine regardless of local timezone. Upload
/// and later verification both derive paths through this type, which is
/// what keeps uploaded files rediscoverable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteTarget {
    year: String,
    month: String,
    file_name: String,
}

impl RemoteTarget {
    /// Derives the target for a capture time in milliseconds since the
    /// Unix epoch.
    ///
    /// Timestamps at or below zero count as unknown and fall back to the
    /// current time, as does anything outside the representable range.
    #[must_use]
    pub fn from_timestamp_ms(taken_at_ms: i64, file_name: &str) -> Self {
        let ts = if taken_at_ms > 0 {
            Timestamp::from_millisecond(taken_at_ms).unwrap_or_else(|_| Timestamp::now())
        } else {
            Timestamp::now()
        };

        let zdt = ts.to_zoned(TimeZone::UTC);
        Self {
            year: format!("{:04}", zdt.year()),
            month: format!("{:02}", zdt.month()),
            file_name: file_name.to_string(),
        }
    }

    /// Four-digit year segment.
    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }

    /// Two-digit month segment.
    #[must_use]
    pub fn month(&self) -> &str {
        &self.month
    }

    /// File name as it appears on the server, before escaping.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// URL of the year collection under `base_url`.
    #[must_use]
    pub fn year_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.year)
    }

    /// URL of the month collection under `base_url`.
    #[must_use]
    pub fn month_url(&self, base_url: &str) -> String {
        format!("{}/{}", self.year_url(base_url), self.month)
    }

    /// URL of the file itself under `base_url`, with the name escaped.
    #[must_use]
    pub fn file_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}",
            self.month_url(base_url),
            utf8_percent_encode(&self.file_name, SEGMENT)
        )
    }
}
