//! Real (wall-clock) time remaining and total for a video playing at a
//! non-normal speed, injected next to the host player's own timer.
//!
//! The crate is loaded as a content script. `run` installs a polling check and
//! a mutation observer that keep a single overlay element alive while the
//! host page re-renders, navigates and swaps videos underneath it.

pub mod dom;
pub mod monitor;
pub mod overlay;
pub mod page;
pub mod readout;
pub mod runtime;
pub mod settings;
pub mod util;

pub use runtime::{run, run_with_settings};
