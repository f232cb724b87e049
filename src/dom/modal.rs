//! QR zoom overlay

use super::{clear_style, query_all_html, query_as, set_style, Page};
use crate::error::{FxError, FxResult, Installed};
use crate::modal::{ModalEffect, ModalEvent, QrModal};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, HtmlImageElement, KeyboardEvent};

/// Modal component: the state machine plus the elements it mutates.
struct ModalView {
    modal: QrModal,
    overlay: HtmlElement,
    image: HtmlImageElement,
    body: HtmlElement,
    active_class: String,
}

pub fn install(page: &Page) -> FxResult<Installed> {
    let selectors = &page.config.selectors;
    let overlay = query_as::<HtmlElement>(&page.document, &selectors.modal);
    let image = query_as::<HtmlImageElement>(&page.document, &selectors.modal_image);
    let thumbnails = query_all_html(&page.document, &selectors.qr_thumbnails);

    let (Some(overlay), Some(image)) = (overlay, image) else {
        return Ok(Installed::skipped(format!(
            "need {} and {}",
            selectors.modal, selectors.modal_image
        )));
    };
    if thumbnails.is_empty() {
        return Ok(Installed::skipped(format!("no {}", selectors.qr_thumbnails)));
    }
    let body = page.document.body().ok_or(FxError::MissingGlobal("body"))?;

    let view = Rc::new(RefCell::new(ModalView {
        modal: QrModal::new(page.config.modal.close_key.clone()),
        overlay: overlay.clone(),
        image,
        body,
        active_class: page.config.modal.active_class.clone(),
    }));

    for thumbnail in thumbnails {
        let thumb_view = Rc::clone(&view);
        let source = thumbnail.clone();
        listen(&thumbnail, "click", move |_event: Event| {
            match thumbnail_src(&source) {
                Some(src) => dispatch(&thumb_view, ModalEvent::ThumbnailClicked(src)),
                None => tracing::warn!("qr-modal: thumbnail has no image source"),
            }
        })?;
    }

    if let Some(close) = query_as::<HtmlElement>(&page.document, &selectors.modal_close) {
        let close_view = Rc::clone(&view);
        listen(&close, "click", move |_event: Event| {
            dispatch(&close_view, ModalEvent::CloseClicked)
        })?;
    }

    let backdrop_view = Rc::clone(&view);
    let backdrop = overlay.clone();
    listen(&overlay, "click", move |event: Event| {
        let on_backdrop = event
            .target()
            .map(|target| JsValue::from(target) == JsValue::from(backdrop.clone()))
            .unwrap_or(false);
        dispatch(&backdrop_view, ModalEvent::BackdropClicked { on_backdrop });
    })?;

    let key_view = Rc::clone(&view);
    listen(&page.document, "keydown", move |event: Event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            dispatch(&key_view, ModalEvent::KeyPressed(event.key()));
        }
    })?;

    Ok(Installed::Active)
}

fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> FxResult<()> {
    let handler = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn dispatch(view: &Rc<RefCell<ModalView>>, event: ModalEvent) {
    let mut view = view.borrow_mut();
    let effect = view.modal.handle(event);
    if let Err(err) = view.apply(effect) {
        tracing::warn!("qr-modal: {}", err);
    }
}

/// The zoomed image is the thumbnail's own image: `src` of an `<img>`, or a
/// `data-src` on wrapper elements.
fn thumbnail_src(thumbnail: &HtmlElement) -> Option<String> {
    thumbnail
        .dyn_ref::<HtmlImageElement>()
        .map(|img| img.src())
        .filter(|src| !src.is_empty())
        .or_else(|| thumbnail.get_attribute("data-src"))
}

impl ModalView {
    fn apply(&self, effect: ModalEffect) -> FxResult<()> {
        match effect {
            ModalEffect::Open { src } => {
                self.image.set_src(&src);
                self.overlay.class_list().add_1(&self.active_class)?;
                set_style(&self.body, "overflow", "hidden")
            }
            ModalEffect::Close => {
                self.overlay.class_list().remove_1(&self.active_class)?;
                clear_style(&self.body, "overflow")
            }
            ModalEffect::None => Ok(()),
        }
    }
}
