//! The live document behind the `Page` capabilities.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlMediaElement, Node};

use crate::page::{MediaElement, OverlayNode, Page};
use crate::readout::{PLACEHOLDER, Playback};
use crate::settings::Settings;

const OVERLAY_STYLE: [(&str, &str); 5] = [
    ("margin-left", "8px"),
    ("font-size", "12px"),
    ("opacity", "0.8"),
    ("color", "#a3e635"),
    ("font-weight", "500"),
];

#[derive(Clone, Debug, PartialEq)]
pub struct DomVideo(pub HtmlMediaElement);

impl MediaElement for DomVideo {
    fn playback(&self) -> Playback {
        Playback {
            duration: self.0.duration(),
            position: self.0.current_time(),
            rate: self.0.playback_rate(),
        }
    }

    fn is_connected(&self) -> bool {
        Node::is_connected(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DomNode(pub HtmlElement);

impl OverlayNode for DomNode {
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_title(&self, title: &str) {
        HtmlElement::set_title(&self.0, title);
    }

    fn set_hidden(&self, hidden: bool) {
        let display = if hidden { "none" } else { "" };
        let _ = self.0.style().set_property("display", display);
    }

    fn is_connected(&self) -> bool {
        Node::is_connected(&self.0)
    }

    fn contains(&self, other: &Self) -> bool {
        Node::contains(&self.0, Some(&other.0))
    }

    fn append(&self, child: &Self) {
        let _ = self.0.append_child(&child.0);
    }

    fn remove(&self) {
        Element::remove(&self.0);
    }
}

#[derive(Clone, Debug)]
pub struct DomPage {
    document: Document,
    overlay_id: String,
    anchor_selector: String,
    video_selector: String,
}

impl DomPage {
    pub fn new(document: Document, settings: &Settings) -> Self {
        Self {
            document,
            overlay_id: settings.overlay_id.clone(),
            anchor_selector: settings.anchor_selector.clone(),
            video_selector: settings.video_selector.clone(),
        }
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }
}

impl Page for DomPage {
    type Video = DomVideo;
    type Node = DomNode;

    fn current_url(&self) -> String {
        self.document
            .location()
            .and_then(|loc| loc.href().ok())
            .unwrap_or_default()
    }

    fn find_video(&self) -> Option<DomVideo> {
        self.query(&self.video_selector)
            .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok())
            .map(DomVideo)
    }

    fn find_anchor(&self) -> Option<DomNode> {
        self.query(&self.anchor_selector)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(DomNode)
    }

    fn find_overlay(&self) -> Option<DomNode> {
        self.document
            .get_element_by_id(&self.overlay_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(DomNode)
    }

    fn create_overlay(&self) -> Option<DomNode> {
        let el: HtmlElement = self
            .document
            .create_element("span")
            .ok()?
            .dyn_into()
            .ok()?;
        el.set_id(&self.overlay_id);
        let style = el.style();
        for (prop, value) in OVERLAY_STYLE {
            let _ = style.set_property(prop, value);
        }
        el.set_text_content(Some(PLACEHOLDER));
        Some(DomNode(el))
    }
}
