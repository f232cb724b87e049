//! Pointer parallax on `.aurora-shape` (desktop, motion allowed)

use super::{media_matches, prefers_reduced_motion, query_all_html, request_frame, set_style, viewport, Page};
use crate::error::{FxResult, Installed};
use crate::parallax::{FrameCoalescer, ParallaxGate, PointerSample};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, HtmlElement, MouseEvent, Window};

struct Parallax {
    shapes: Vec<HtmlElement>,
    coalescer: FrameCoalescer,
}

pub fn install(page: &Page) -> FxResult<Installed> {
    let settings = page.config.parallax;
    let shapes = query_all_html(&page.document, &page.config.selectors.aurora_shapes);

    let wide_enough = media_matches(&page.window, &ParallaxGate::min_width_query(&settings));
    let width = viewport(&page.window).width;
    if let Err(skip) = ParallaxGate::evaluate(
        shapes.len(),
        width,
        wide_enough,
        prefers_reduced_motion(&page.window),
    ) {
        return Ok(Installed::skipped(skip.to_string()));
    }

    let parallax = Rc::new(RefCell::new(Parallax {
        coalescer: FrameCoalescer::new(shapes.len(), settings),
        shapes,
    }));

    let window = page.window.clone();
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let sample = PointerSample {
            x: event.client_x() as f64,
            y: event.client_y() as f64,
        };
        if !parallax.borrow_mut().coalescer.pointer_moved(sample) {
            return;
        }

        let frame_owner = Rc::clone(&parallax);
        let frame_window = window.clone();
        if let Err(err) = request_frame(&window, move || {
            Parallax::apply(&frame_owner, &frame_window)
        }) {
            tracing::warn!("parallax: requestAnimationFrame failed: {}", err);
            // Release the guard so the next move can retry
            parallax.borrow_mut().coalescer.frame(viewport(&window));
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    page.document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "mousemove",
            on_move.as_ref().unchecked_ref(),
            &options,
        )?;
    on_move.forget();

    Ok(Installed::Active)
}

impl Parallax {
    fn apply(this: &Rc<RefCell<Self>>, window: &Window) {
        let mut parallax = this.borrow_mut();
        let Some(translations) = parallax.coalescer.frame(viewport(window)) else {
            return;
        };
        for (shape, translation) in parallax.shapes.iter().zip(translations) {
            if let Err(err) = set_style(shape, "transform", &translation.to_css()) {
                tracing::warn!("parallax: {}", err);
            }
        }
    }
}
