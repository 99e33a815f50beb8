//! Presence monitor: notices when the host page replaced the video, dropped
//! the overlay, or navigated, and brings the overlay back.
//!
//! Two independent triggers feed the controller. The polling tick catches URL
//! changes and a vanished overlay or anchor. The mutation callback catches a
//! replaced `<video>`. Both only ever converge state, so running either of them
//! at any time, in any order, is safe.

use crate::overlay::OverlayManager;
use crate::page::{MediaElement, OverlayNode, Page};
use crate::util::clog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackingState {
    /// No video held; waiting for `start`.
    Unattached,
    Tracking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Idle,
    Reattached,
    /// The URL changed and everything was torn down; the caller schedules
    /// `start` after the reinit delay.
    Navigated,
}

/// Per-tab state: the tracked video, the overlay, and the last seen URL.
pub struct Controller<P: Page> {
    page: P,
    video: Option<P::Video>,
    overlay: OverlayManager<P::Node>,
    last_url: String,
    debug: bool,
}

impl<P: Page> Controller<P> {
    pub fn new(page: P, debug: bool) -> Self {
        let last_url = page.current_url();
        Self {
            page,
            video: None,
            overlay: OverlayManager::default(),
            last_url,
            debug,
        }
    }

    pub fn state(&self) -> TrackingState {
        match self.video {
            Some(_) => TrackingState::Tracking,
            None => TrackingState::Unattached,
        }
    }

    pub fn video(&self) -> Option<&P::Video> {
        self.video.as_ref()
    }

    pub fn overlay(&self) -> Option<&P::Node> {
        self.overlay.node()
    }

    fn log(&self, msg: &str) {
        if self.debug {
            clog(msg);
        }
    }

    /// Begins tracking the document's video. Returns the video so the caller
    /// can bind playback listeners to it, or `None` when the page has none yet.
    pub fn start(&mut self) -> Option<P::Video> {
        let video = self.page.find_video()?;
        self.log("actual-runtime: tracking video");
        self.video = Some(video.clone());
        self.overlay.ensure_created(&self.page);
        self.refresh();
        Some(video)
    }

    /// Playback event on the tracked video.
    pub fn refresh(&self) {
        self.overlay.refresh(self.video.as_ref());
    }

    /// New source on the same element (playlist advance). The host usually
    /// re-renders its time bar at that point, taking the overlay with it.
    pub fn on_source_change(&mut self) {
        self.overlay.reattach(&self.page, self.video.as_ref());
    }

    pub fn poll_tick(&mut self) -> PollOutcome {
        let url = self.page.current_url();
        if url != self.last_url {
            self.last_url = url;
            self.navigate_away();
            return PollOutcome::Navigated;
        }

        let Some(video) = self.video.as_ref() else {
            return PollOutcome::Idle;
        };
        if !video.is_connected() {
            return PollOutcome::Idle;
        }
        let anchored = match (self.page.find_overlay(), self.page.find_anchor()) {
            (Some(overlay), Some(anchor)) => anchor.contains(&overlay),
            _ => false,
        };
        if anchored {
            return PollOutcome::Idle;
        }
        self.log("actual-runtime: overlay lost, reattaching");
        self.overlay.reattach(&self.page, self.video.as_ref());
        PollOutcome::Reattached
    }

    /// Removes the overlay from the document and drops both references.
    pub fn navigate_away(&mut self) {
        self.log("actual-runtime: navigation detected");
        if let Some(existing) = self.page.find_overlay() {
            existing.remove();
        }
        if let Some(held) = self.overlay.node() {
            held.remove();
        }
        self.overlay.forget();
        self.video = None;
    }

    /// Structural change somewhere in the page. Restarts when the document's
    /// video is not the one being tracked.
    pub fn on_mutation(&mut self) -> Option<P::Video> {
        let current = self.page.find_video()?;
        let replaced = match self.video.as_ref() {
            None => true,
            Some(held) => !held.is_connected() || *held != current,
        };
        if !replaced {
            return None;
        }
        self.video = None;
        self.start()
    }
}
