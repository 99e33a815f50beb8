//! Capability interface over the host document.
//!
//! The overlay and monitor logic only talk to the page through these traits,
//! so they run the same against the live DOM (`crate::dom`) and the in-memory
//! fake used by the tests.

use crate::readout::Playback;

/// A playable media element owned by the host page.
///
/// Equality is element identity, not equal state.
pub trait MediaElement: Clone + PartialEq {
    fn playback(&self) -> Playback;
    /// Still attached to the document.
    fn is_connected(&self) -> bool;
}

/// A DOM node the overlay lives in (the overlay itself or its anchor).
pub trait OverlayNode: Clone + PartialEq {
    fn set_text(&self, text: &str);
    fn set_title(&self, title: &str);
    fn set_hidden(&self, hidden: bool);
    fn is_connected(&self) -> bool;
    /// Inclusive descendant check, like `Node.contains`.
    fn contains(&self, other: &Self) -> bool;
    /// Appends `child` as the last child.
    fn append(&self, child: &Self);
    /// Detaches this node from its parent, if any.
    fn remove(&self);
}

pub trait Page {
    type Video: MediaElement;
    type Node: OverlayNode;

    fn current_url(&self) -> String;
    fn find_video(&self) -> Option<Self::Video>;
    fn find_anchor(&self) -> Option<Self::Node>;
    /// Looks the overlay up by its fixed id in the document.
    fn find_overlay(&self) -> Option<Self::Node>;
    /// Builds a new, unattached overlay node with id, styling and placeholder text.
    fn create_overlay(&self) -> Option<Self::Node>;
}
