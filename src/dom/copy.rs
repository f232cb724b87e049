//! Copy-address buttons

use super::{clear_style, query_as, set_style, set_timeout, Page};
use crate::copy::{resolve_address, AddressSource, BackgroundChange, CopyFeedback, FeedbackPlan};
use crate::error::{FxError, FxResult, Installed};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlElement, HtmlSelectElement, Window};

/// Single-address button carrying its own `data-address`.
pub fn install_single(page: &Page) -> FxResult<Installed> {
    let selector = &page.config.selectors.single_copy_button;
    let Some(button) = query_as::<HtmlElement>(&page.document, selector) else {
        return Ok(Installed::skipped(format!("no {}", selector)));
    };
    let address = button.get_attribute("data-address").unwrap_or_default();
    wire(page, button, AddressSource::Fixed(address), None)
}

/// Attach the click handler. `select` is consulted on every click when the
/// source is [`AddressSource::Selected`].
pub fn wire(
    page: &Page,
    button: HtmlElement,
    source: AddressSource,
    select: Option<HtmlSelectElement>,
) -> FxResult<Installed> {
    let window = page.window.clone();
    let config = Rc::clone(&page.config);
    let target = button.clone();

    let on_click = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let label = label_element(&button);
        let original_label = label.text_content().unwrap_or_default();
        let address = resolve_address(&source, || {
            select.as_ref().and_then(super::network::selected_address)
        });

        let window = window.clone();
        let config = Rc::clone(&config);
        let button = button.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = match address {
                Ok(address) => write_clipboard(&window, &address).await,
                Err(err) => Err(err),
            };
            if let Err(err) = &result {
                tracing::warn!("copy: {}", err);
            }

            let plan = CopyFeedback::new(original_label, &config.copy).outcome(&result);
            if let Err(err) = show_feedback(&window, &button, &label, plan) {
                tracing::warn!("copy: feedback failed: {}", err);
            }
        });
    });

    target.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    Ok(Installed::Active)
}

/// Inner `<span>` if the button has one, else the button itself.
fn label_element(button: &HtmlElement) -> HtmlElement {
    button
        .query_selector("span")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .unwrap_or_else(|| button.clone())
}

async fn write_clipboard(window: &Window, text: &str) -> FxResult<()> {
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(FxError::Clipboard("Clipboard API unavailable".to_string()));
    }

    let clipboard: web_sys::Clipboard = clipboard.unchecked_into();
    JsFuture::from(clipboard.write_text(text))
        .await
        .map_err(|err| FxError::Clipboard(describe(&err)))?;
    Ok(())
}

fn describe(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "write rejected".to_string())
}

fn show_feedback(
    window: &Window,
    button: &HtmlElement,
    label: &HtmlElement,
    plan: FeedbackPlan,
) -> FxResult<()> {
    label.set_text_content(Some(&plan.label));
    apply_background(button, &plan.background)?;

    let restore = plan.restore;
    let button = button.clone();
    let label = label.clone();
    set_timeout(window, restore.after_ms, move || {
        label.set_text_content(Some(&restore.label));
        if let Err(err) = apply_background(&button, &restore.background) {
            tracing::warn!("copy: restore failed: {}", err);
        }
    })?;
    Ok(())
}

fn apply_background(button: &HtmlElement, change: &BackgroundChange) -> FxResult<()> {
    match change {
        BackgroundChange::Keep => Ok(()),
        BackgroundChange::Set(value) => set_style(button, "background", value),
        BackgroundChange::Clear => clear_style(button, "background"),
    }
}
