//! Fade-in of `.bento-item` cards as they scroll into view

use super::{prefers_reduced_motion, query_all_html, set_style, Page};
use crate::error::{FxResult, Installed};
use crate::reveal::{RevealPlan, RevealTracker};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

pub fn install(page: &Page) -> FxResult<Installed> {
    let settings = &page.config.reveal;
    let cards = query_all_html(&page.document, &page.config.selectors.cards);
    if cards.is_empty() {
        return Ok(Installed::skipped(format!(
            "no {}",
            page.config.selectors.cards
        )));
    }

    let reduced_motion = prefers_reduced_motion(&page.window);
    let delays = match RevealPlan::for_cards(cards.len(), reduced_motion, settings) {
        RevealPlan::ShowAll => {
            for card in &cards {
                set_style(card, "opacity", "1")?;
            }
            tracing::debug!("fade-in: reduced motion, {} cards shown", cards.len());
            return Ok(Installed::Active);
        }
        RevealPlan::Staggered(delays) => delays,
    };

    let tracker = Rc::new(RefCell::new(RevealTracker::new(cards.len())));
    let visible_class = settings.visible_class.clone();
    let observed = cards.clone();
    let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let target_ref: &JsValue = target.as_ref();
                let Some(index) = observed
                    .iter()
                    .position(|card| AsRef::<JsValue>::as_ref(card) == target_ref)
                else {
                    continue;
                };

                let mut tracker = tracker.borrow_mut();
                if tracker.intersected(index, entry.is_intersecting()) {
                    if let Err(err) = target.class_list().add_1(&visible_class) {
                        tracing::warn!("fade-in: {:?}", err);
                    }
                    observer.unobserve(&target);
                    tracing::debug!("fade-in: card {} shown, {} pending", index, tracker.pending());
                }
                if tracker.is_done() {
                    observer.disconnect();
                    break;
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_root_margin("0px");
    init.set_threshold(&JsValue::from_f64(settings.threshold));
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;
    on_intersect.forget();

    for (card, delay) in cards.iter().zip(delays) {
        set_style(card, "transition-delay", &delay.to_css())?;
        observer.observe(card);
    }

    Ok(Installed::Active)
}
