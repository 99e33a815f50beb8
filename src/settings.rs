//! Built-in constants for locating the host player and pacing the monitor.
//!
//! There is no user-facing configuration; the defaults below are what the
//! extension ships with. `run_with_settings` accepts a JSON object whose
//! fields override individual defaults.

use serde::{Deserialize, Serialize};

pub const OVERLAY_ID: &str = "yt-actual-runtime-display";
pub const ANCHOR_SELECTOR: &str = ".ytp-time-contents";
pub const VIDEO_SELECTOR: &str = "video";
pub const POLL_INTERVAL_MS: i32 = 1000;
pub const REINIT_DELAY_MS: i32 = 1000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Element id of the injected overlay.
    pub overlay_id: String,
    /// Selector for the host's time-display container.
    pub anchor_selector: String,
    pub video_selector: String,
    pub poll_interval_ms: i32,
    /// Delay between a detected navigation and the next `start`, giving the
    /// host time to render the new view.
    pub reinit_delay_ms: i32,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overlay_id: OVERLAY_ID.to_string(),
            anchor_selector: ANCHOR_SELECTOR.to_string(),
            video_selector: VIDEO_SELECTOR.to_string(),
            poll_interval_ms: POLL_INTERVAL_MS,
            reinit_delay_ms: REINIT_DELAY_MS,
            debug: false,
        }
    }
}

impl Settings {
    /// Parses overrides; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let s = Settings::from_json("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.overlay_id, "yt-actual-runtime-display");
        assert_eq!(s.anchor_selector, ".ytp-time-contents");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let s = Settings::from_json(r#"{"poll_interval_ms":250,"debug":true}"#).unwrap();
        assert_eq!(s.poll_interval_ms, 250);
        assert!(s.debug);
        assert_eq!(s.reinit_delay_ms, REINIT_DELAY_MS);
        assert_eq!(s.video_selector, "video");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Settings::from_json("{poll_interval_ms:").is_err());
        assert!(Settings::from_json(r#"{"poll_interval_ms":"fast"}"#).is_err());
    }
}
