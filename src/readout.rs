//! What the overlay should show for a given playback state.

use crate::util::format_time;

pub const PLACEHOLDER: &str = "⏱ real: --:--";

/// Values read off the media element at refresh time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playback {
    pub duration: f64,
    pub position: f64,
    pub rate: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Readout {
    /// Normal speed: the host's own timer is already correct.
    Hidden,
    Visible { text: String, title: String },
}

impl Readout {
    /// Returns `None` while the duration is unknown (NaN, zero, live
    /// streams) or the rate cannot scale a duration.
    pub fn from_playback(p: &Playback) -> Option<Readout> {
        if !p.duration.is_finite() || p.duration <= 0.0 {
            return None;
        }
        if !p.rate.is_finite() || p.rate <= 0.0 {
            return None;
        }
        // Exact comparison: 1.0000001 is a non-normal speed and is shown.
        if p.rate == 1.0 {
            return Some(Readout::Hidden);
        }
        let remaining = (p.duration - p.position).max(0.0) / p.rate;
        let total = p.duration / p.rate;
        Some(Readout::Visible {
            text: format!("⏱ real: {} / {}", format_time(remaining), format_time(total)),
            title: format!("Actual time remaining at {}× speed", p.rate),
        })
    }
}
