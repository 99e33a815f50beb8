//! Browser wiring: the polling interval, the mutation observer, the delayed
//! restart after navigation, and the playback listeners on the tracked video.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlMediaElement, MutationObserver, MutationObserverInit, Window};

use crate::dom::{DomPage, DomVideo};
use crate::monitor::{Controller, PollOutcome};
use crate::settings::Settings;
use crate::util::clog;

const REFRESH_EVENTS: [&str; 5] = ["timeupdate", "ratechange", "seeked", "play", "pause"];
const SOURCE_CHANGE_EVENT: &str = "loadstart";

thread_local! {
    static BOOTED: Cell<bool> = const { Cell::new(false) };
}

struct Runtime {
    window: Window,
    controller: RefCell<Controller<DomPage>>,
    listeners: RefCell<Option<PlaybackListeners>>,
    reinit_delay_ms: i32,
}

/// Listeners bound to one media element. Dropping the set unbinds them, so
/// re-tracking the same element never stacks duplicate handlers.
struct PlaybackListeners {
    target: HtmlMediaElement,
    refresh: Closure<dyn FnMut()>,
    source_change: Closure<dyn FnMut()>,
}

impl Drop for PlaybackListeners {
    fn drop(&mut self) {
        for event in REFRESH_EVENTS {
            let _ = self
                .target
                .remove_event_listener_with_callback(event, self.refresh.as_ref().unchecked_ref());
        }
        let _ = self.target.remove_event_listener_with_callback(
            SOURCE_CHANGE_EVENT,
            self.source_change.as_ref().unchecked_ref(),
        );
    }
}

/// Boots the overlay with the built-in settings.
#[wasm_bindgen]
pub fn run() -> Result<(), JsValue> {
    boot(Settings::default())
}

/// Boots the overlay with a JSON object of settings overrides.
#[wasm_bindgen]
pub fn run_with_settings(json: &str) -> Result<(), JsValue> {
    let settings = Settings::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;
    boot(settings)
}

fn boot(settings: Settings) -> Result<(), JsValue> {
    if BOOTED.with(|b| b.replace(true)) {
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let page = DomPage::new(document, &settings);
    let rt = Rc::new(Runtime {
        window: window.clone(),
        controller: RefCell::new(Controller::new(page, settings.debug)),
        listeners: RefCell::new(None),
        reinit_delay_ms: settings.reinit_delay_ms,
    });
    if settings.debug {
        clog("actual-runtime: booted");
    }

    start_tracking(&rt);

    // Polling check
    let poll_cb = {
        let rt = Rc::clone(&rt);
        Closure::wrap(Box::new(move || on_poll(&rt)) as Box<dyn FnMut()>)
    };
    window.set_interval_with_callback_and_timeout_and_arguments_0(
        poll_cb.as_ref().unchecked_ref(),
        settings.poll_interval_ms,
    )?;
    poll_cb.forget();

    // Structural observation
    let mutation_cb = {
        let rt = Rc::clone(&rt);
        Closure::wrap(Box::new(move || on_mutation(&rt)) as Box<dyn FnMut()>)
    };
    let observer = MutationObserver::new(mutation_cb.as_ref().unchecked_ref::<Function>())?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer.observe_with_options(&body, &init)?;
    mutation_cb.forget();
    std::mem::forget(observer);

    Ok(())
}

fn on_poll(rt: &Rc<Runtime>) {
    let outcome = match rt.controller.try_borrow_mut() {
        Ok(mut ctl) => ctl.poll_tick(),
        Err(_) => return,
    };
    if outcome == PollOutcome::Navigated {
        rt.listeners.borrow_mut().take();
        schedule_start(rt);
    }
}

fn on_mutation(rt: &Rc<Runtime>) {
    let video = match rt.controller.try_borrow_mut() {
        Ok(mut ctl) => ctl.on_mutation(),
        Err(_) => return,
    };
    if let Some(video) = video {
        bind_playback(rt, video);
    }
}

fn start_tracking(rt: &Rc<Runtime>) {
    let video = match rt.controller.try_borrow_mut() {
        Ok(mut ctl) => ctl.start(),
        Err(_) => return,
    };
    if let Some(video) = video {
        bind_playback(rt, video);
    }
}

/// Runs `start` once the host has had time to render the new view.
fn schedule_start(rt: &Rc<Runtime>) {
    let cb = {
        let rt = Rc::clone(rt);
        Closure::once_into_js(move || start_tracking(&rt))
    };
    let _ = rt
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref::<Function>(), rt.reinit_delay_ms);
}

fn bind_playback(rt: &Rc<Runtime>, video: DomVideo) {
    let target = video.0;
    let refresh = {
        let rt = Rc::clone(rt);
        Closure::wrap(Box::new(move || {
            if let Ok(ctl) = rt.controller.try_borrow() {
                ctl.refresh();
            }
        }) as Box<dyn FnMut()>)
    };
    let source_change = {
        let rt = Rc::clone(rt);
        Closure::wrap(Box::new(move || {
            if let Ok(mut ctl) = rt.controller.try_borrow_mut() {
                ctl.on_source_change();
            }
        }) as Box<dyn FnMut()>)
    };

    // Unbind the previous set first; it may be on this same element.
    rt.listeners.borrow_mut().take();

    for event in REFRESH_EVENTS {
        target
            .add_event_listener_with_callback(event, refresh.as_ref().unchecked_ref())
            .ok();
    }
    target
        .add_event_listener_with_callback(SOURCE_CHANGE_EVENT, source_change.as_ref().unchecked_ref())
        .ok();

    *rt.listeners.borrow_mut() = Some(PlaybackListeners {
        target,
        refresh,
        source_change,
    });
}
