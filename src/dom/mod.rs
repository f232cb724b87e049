//! Browser wiring for the page behaviors
//!
//! Each submodule installs one component: it looks up its elements, builds
//! the component object (state from the core modules behind an
//! `Rc<RefCell<_>>` shared only with its own closures), subscribes to events
//! and returns. Listeners live for the page lifetime, so closures are
//! `forget()`-ed once registered.
//!
//! ```text
//! DOMContentLoaded ──► init ──► typing ─► fade-in ─► copy ─► network ─► qr-modal
//!                               └─ requestAnimationFrame ──► parallax
//! ```

pub mod copy;
pub mod modal;
pub mod network;
pub mod parallax;
pub mod reveal;
pub mod typing;

use crate::config::PageConfig;
use crate::error::{FxError, FxResult, Installed};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

/// Id of the optional inline YAML block overriding [`PageConfig`].
pub const CONFIG_BLOCK_ID: &str = "bio-page-config";

/// Handles every installer needs.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub config: Rc<PageConfig>,
}

impl Page {
    /// Current window/document, config read from the page.
    pub fn current() -> FxResult<Self> {
        let window = window()?;
        let document = window
            .document()
            .ok_or(FxError::MissingGlobal("document"))?;

        let overlay = document
            .get_element_by_id(CONFIG_BLOCK_ID)
            .and_then(|el| el.text_content());
        let config = PageConfig::load_or_default(overlay.as_deref());

        Ok(Self {
            window,
            document,
            config: Rc::new(config),
        })
    }

    pub fn with_config(config: PageConfig) -> FxResult<Self> {
        let window = window()?;
        let document = window
            .document()
            .ok_or(FxError::MissingGlobal("document"))?;
        Ok(Self {
            window,
            document,
            config: Rc::new(config),
        })
    }
}

/// Run [`init`] on `DOMContentLoaded`, or now if the document is past loading.
pub fn boot() -> FxResult<()> {
    let document = window()?
        .document()
        .ok_or(FxError::MissingGlobal("document"))?;

    if document.ready_state() == "loading" {
        let on_ready = once_callback(move || {
            if let Err(err) = init() {
                tracing::error!("bio-page init failed: {}", err);
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        tracing::debug!("bio-page: waiting for DOMContentLoaded");
        Ok(())
    } else {
        init()
    }
}

/// Install every component once. A failing component is logged and the rest
/// still install.
pub fn init() -> FxResult<()> {
    let page = Page::current()?;

    report("typing", typing::install(&page));
    report("fade-in", reveal::install(&page));
    report("copy", copy::install_single(&page));
    report("network", network::install(&page));
    report("qr-modal", modal::install(&page));

    // Parallax waits a frame so it never competes with first paint
    let deferred = page.clone();
    request_frame(&page.window, move || {
        report("parallax", parallax::install(&deferred));
    })?;

    Ok(())
}

fn report(component: &str, result: FxResult<Installed>) {
    match result {
        Ok(Installed::Active) => tracing::info!("{}: installed", component),
        Ok(Installed::Skipped(reason)) => tracing::debug!("{}: skipped ({})", component, reason),
        Err(err) => tracing::warn!("{}: failed to install: {}", component, err),
    }
}

// =============================================================================
// DOM HELPERS
// =============================================================================

pub(crate) fn window() -> FxResult<Window> {
    web_sys::window().ok_or(FxError::MissingGlobal("window"))
}

pub(crate) fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub(crate) fn query_as<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    query(document, selector)?.dyn_into::<T>().ok()
}

/// All matches in document order. Non-HTML elements (SVG) are skipped.
pub(crate) fn query_all_html(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Unsupported or invalid queries count as "not matching".
pub(crate) fn media_matches(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

pub(crate) fn prefers_reduced_motion(window: &Window) -> bool {
    media_matches(window, "(prefers-reduced-motion: reduce)")
}

pub(crate) fn set_style(el: &HtmlElement, property: &str, value: &str) -> FxResult<()> {
    el.style().set_property(property, value)?;
    Ok(())
}

pub(crate) fn clear_style(el: &HtmlElement, property: &str) -> FxResult<()> {
    el.style().remove_property(property)?;
    Ok(())
}

/// Wrap a one-shot callback as a JS function. The closure is handed over to
/// the JS GC via `into_js_value`, so it can be dropped by the browser once
/// the timer/frame/listener no longer references it.
pub(crate) fn once_callback(callback: impl FnOnce() + 'static) -> JsValue {
    let mut callback = Some(callback);
    Closure::<dyn FnMut()>::new(move || {
        if let Some(callback) = callback.take() {
            callback();
        }
    })
    .into_js_value()
}

pub(crate) fn set_timeout(
    window: &Window,
    delay_ms: u32,
    callback: impl FnOnce() + 'static,
) -> FxResult<i32> {
    let callback = once_callback(callback);
    let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms as i32,
    )?;
    Ok(handle)
}

pub(crate) fn request_frame(window: &Window, callback: impl FnOnce() + 'static) -> FxResult<i32> {
    let callback = once_callback(callback);
    Ok(window.request_animation_frame(callback.unchecked_ref())?)
}

pub(crate) fn viewport(window: &Window) -> crate::parallax::Viewport {
    let extent = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    crate::parallax::Viewport {
        width: extent(window.inner_width()),
        height: extent(window.inner_height()),
    }
}
