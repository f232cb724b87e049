//! Network `<select>` driving the QR image and the copy button

use super::{copy, query_as, set_style, Page};
use crate::copy::AddressSource;
use crate::error::{FxResult, Installed};
use crate::network::{Crossfade, CrossfadeStep, NetworkOption};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlImageElement, HtmlSelectElement};

const ADDRESS_ATTR: &str = "data-address";
const QR_ATTR: &str = "data-qr";

pub fn install(page: &Page) -> FxResult<Installed> {
    let selectors = &page.config.selectors;
    let select = query_as::<HtmlSelectElement>(&page.document, &selectors.network_select);
    let qr = query_as::<HtmlImageElement>(&page.document, &selectors.qr_image);
    let button = query_as::<HtmlElement>(&page.document, &selectors.network_copy_button);

    let (Some(select), Some(qr), Some(button)) = (select, qr, button) else {
        return Ok(Installed::skipped(format!(
            "need {}, {} and {}",
            selectors.network_select, selectors.qr_image, selectors.network_copy_button
        )));
    };

    let fade = Rc::new(RefCell::new(Crossfade::new(page.config.network)));

    let load_fade = Rc::clone(&fade);
    let load_qr = qr.clone();
    let on_load = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let step = load_fade.borrow_mut().loaded();
        if let Some(step) = step {
            apply(&load_qr, step);
        }
    });
    qr.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    on_load.forget();

    let change_select = select.clone();
    let on_change = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let Some(option) = selected_option(&change_select) else {
            tracing::warn!("network: selected option lacks {} / {}", ADDRESS_ATTR, QR_ATTR);
            return;
        };
        let step = fade.borrow_mut().begin(&option);
        apply(&qr, step);
    });
    select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();

    copy::wire(page, button, AddressSource::Selected, Some(select))
}

fn apply(qr: &HtmlImageElement, step: CrossfadeStep) {
    let result = match step {
        CrossfadeStep::Dim { opacity, src } => {
            let dimmed = set_style(qr, "opacity", &opacity.to_string());
            qr.set_src(&src);
            dimmed
        }
        CrossfadeStep::Restore { opacity } => set_style(qr, "opacity", &opacity.to_string()),
    };
    if let Err(err) = result {
        tracing::warn!("network: {}", err);
    }
}

fn selected_element(select: &HtmlSelectElement) -> Option<Element> {
    let index = select.selected_index();
    if index < 0 {
        return None;
    }
    select.item(index as u32)
}

pub fn selected_option(select: &HtmlSelectElement) -> Option<NetworkOption> {
    let option = selected_element(select)?;
    NetworkOption::from_attrs(option.get_attribute(ADDRESS_ATTR), option.get_attribute(QR_ATTR))
}

/// Address of the option selected right now.
pub fn selected_address(select: &HtmlSelectElement) -> Option<String> {
    selected_element(select)?.get_attribute(ADDRESS_ATTR)
}
