// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

/// A single playable podcast episode
///
/// Episodes are plain values: the store keeps its own copy of every episode
/// it is handed, so changes made by the caller afterwards never leak in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub title: String,
    /// Credited participants, as a display string
    pub members: String,
    /// Cover image URL
    pub thumbnail: String,
    /// Length in whole seconds
    pub duration: u64,
    /// Audio source URL
    pub url: String,
}

impl Episode {
    /// Duration rendered as `HH:MM:SS`
    pub fn duration_as_string(&self) -> String {
        format_duration(self.duration)
    }
}

/// Format a number of seconds as `HH:MM:SS`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{hours:02}:{minutes:02}:{secs:02}")
}
