//! Lifecycle of the single injected overlay element.

use crate::page::{MediaElement, OverlayNode, Page};
use crate::readout::Readout;

/// Holds the managed overlay reference. The document may drop the node at any
/// time, so every operation re-checks what is actually there.
#[derive(Debug)]
pub struct OverlayManager<N> {
    node: Option<N>,
}

impl<N> Default for OverlayManager<N> {
    fn default() -> Self {
        Self { node: None }
    }
}

impl<N: OverlayNode> OverlayManager<N> {
    pub fn node(&self) -> Option<&N> {
        self.node.as_ref()
    }

    /// Drops the managed reference without touching the document.
    pub fn forget(&mut self) {
        self.node = None;
    }

    /// Adopts the document's overlay if one exists, otherwise creates one and
    /// appends it to the anchor. With no anchor the new node stays detached
    /// until the monitor reattaches it.
    pub fn ensure_created<P: Page<Node = N>>(&mut self, page: &P) {
        if let Some(existing) = page.find_overlay() {
            self.node = Some(existing);
            return;
        }
        if self.node.is_some() {
            return;
        }
        let Some(node) = page.create_overlay() else {
            return;
        };
        if let Some(anchor) = page.find_anchor() {
            anchor.append(&node);
        }
        self.node = Some(node);
    }

    /// Starts over from a fresh reference. A stale node still in the document
    /// is adopted rather than duplicated.
    pub fn reattach<P: Page<Node = N>>(&mut self, page: &P, video: Option<&P::Video>) {
        self.node = None;
        self.ensure_created(page);
        self.refresh(video);
    }

    /// Rewrites the overlay from the video's current playback state.
    pub fn refresh<V: MediaElement>(&self, video: Option<&V>) {
        let (Some(video), Some(node)) = (video, self.node.as_ref()) else {
            return;
        };
        match Readout::from_playback(&video.playback()) {
            None => {}
            Some(Readout::Hidden) => node.set_hidden(true),
            Some(Readout::Visible { text, title }) => {
                node.set_hidden(false);
                node.set_text(&text);
                node.set_title(&title);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fake::{FakeNode, FakePage, FakeVideo};
    use crate::readout::PLACEHOLDER;

    fn setup(rate: f64) -> (FakePage, FakeVideo, OverlayManager<FakeNode>) {
        let video = FakeVideo::new(600.0, 120.0, rate);
        let page = FakePage::with_player("https://host/watch?v=a", Some(video.clone()));
        (page, video, OverlayManager::default())
    }

    #[test]
    fn creates_once_under_anchor() {
        let (page, _video, mut overlay) = setup(2.0);
        overlay.ensure_created(&page);
        overlay.ensure_created(&page);
        assert_eq!(page.overlay_count(), 1);
        let node = overlay.node().unwrap();
        assert!(page.find_anchor().unwrap().contains(node));
        assert_eq!(node.text(), PLACEHOLDER);
    }

    #[test]
    fn adopts_existing_overlay_from_document() {
        let (page, _video, mut overlay) = setup(2.0);
        overlay.ensure_created(&page);
        let first = overlay.node().cloned().unwrap();

        let mut fresh: OverlayManager<FakeNode> = OverlayManager::default();
        fresh.ensure_created(&page);
        assert_eq!(fresh.node(), Some(&first));
        assert_eq!(page.overlay_count(), 1);
    }

    #[test]
    fn without_anchor_node_stays_detached() {
        let (page, _video, mut overlay) = setup(2.0);
        page.remove_anchor();
        overlay.ensure_created(&page);
        let node = overlay.node().unwrap();
        assert!(!node.is_connected());
        assert_eq!(page.overlay_count(), 0);

        // a second call keeps the same detached node rather than building another
        let held = node.clone();
        overlay.ensure_created(&page);
        assert_eq!(overlay.node(), Some(&held));
    }

    #[test]
    fn refresh_shows_scaled_times() {
        let (page, video, mut overlay) = setup(2.0);
        overlay.ensure_created(&page);
        overlay.refresh(Some(&video));
        let node = overlay.node().unwrap();
        assert!(!node.hidden());
        assert_eq!(node.text(), "⏱ real: 4:00 / 5:00");
        assert_eq!(node.title(), "Actual time remaining at 2× speed");
    }

    #[test]
    fn refresh_at_normal_speed_hides_and_keeps_text() {
        let (page, video, mut overlay) = setup(2.0);
        overlay.ensure_created(&page);
        overlay.refresh(Some(&video));

        video.set_rate(1.0);
        video.set_position(0.0);
        overlay.refresh(Some(&video));
        let node = overlay.node().unwrap();
        assert!(node.hidden());
        assert_eq!(node.text(), "⏱ real: 4:00 / 5:00");
    }

    #[test]
    fn refresh_without_video_or_node_is_silent() {
        let (page, video, mut overlay) = setup(2.0);
        overlay.refresh(Some(&video));
        assert!(overlay.node().is_none());

        overlay.ensure_created(&page);
        overlay.refresh::<FakeVideo>(None);
        assert_eq!(overlay.node().unwrap().text(), PLACEHOLDER);
    }

    #[test]
    fn refresh_before_duration_is_known_leaves_placeholder() {
        let video = FakeVideo::new(f64::NAN, 0.0, 2.0);
        let page = FakePage::with_player("https://host/", Some(video.clone()));
        let mut overlay: OverlayManager<FakeNode> = OverlayManager::default();
        overlay.ensure_created(&page);
        overlay.refresh(Some(&video));
        let node = overlay.node().unwrap();
        assert_eq!(node.text(), PLACEHOLDER);
        assert!(!node.hidden());
    }

    #[test]
    fn reattach_moves_overlay_into_replaced_anchor() {
        let (page, video, mut overlay) = setup(2.0);
        overlay.ensure_created(&page);
        let old = overlay.node().cloned().unwrap();

        let anchor = page.replace_anchor();
        assert!(!old.is_connected());

        overlay.reattach(&page, Some(&video));
        let node = overlay.node().unwrap();
        assert_ne!(node, &old);
        assert!(anchor.contains(node));
        assert_eq!(page.overlay_count(), 1);
        assert_eq!(node.text(), "⏱ real: 4:00 / 5:00");
    }
}
