//! Typewriter effect on `#typing-bio`

use super::{query_as, set_style, set_timeout, Page};
use crate::error::{FxResult, Installed};
use crate::typing::{TypingAnimator, TypingStep};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Text, Window};

/// Typing component. The interval is cleared once the last character lands.
struct Typer {
    text: Text,
    cursor: Option<HtmlElement>,
    animator: TypingAnimator,
    interval: Option<i32>,
}

pub fn install(page: &Page) -> FxResult<Installed> {
    let selectors = &page.config.selectors;
    let Some(target) = query_as::<HtmlElement>(&page.document, &selectors.typing_target) else {
        return Ok(Installed::skipped(format!("no {}", selectors.typing_target)));
    };
    let cursor = query_as::<HtmlElement>(&page.document, &selectors.cursor);

    // Characters go into one text node appended after whatever the target holds
    let text = page.document.create_text_node("");
    target.append_child(&text)?;

    let typer = Rc::new(RefCell::new(Typer {
        text,
        cursor,
        animator: TypingAnimator::new(&page.config.bio_text, page.config.typing),
        interval: None,
    }));

    let window = page.window.clone();
    set_timeout(&page.window, page.config.typing.start_delay_ms, move || {
        if let Err(err) = Typer::start(&typer, &window) {
            tracing::warn!("typing: could not start: {}", err);
        }
    })?;

    Ok(Installed::Active)
}

impl Typer {
    fn start(this: &Rc<RefCell<Self>>, window: &Window) -> FxResult<()> {
        if this.borrow().animator.is_finished() {
            return this.borrow().schedule_cursor_hide(window);
        }

        // First character lands right away, the rest on the interval
        if Self::step(this, window)? {
            return Ok(());
        }

        let interval_ms = this.borrow().animator.timing().interval_ms;
        let owner = Rc::clone(this);
        let tick_window = window.clone();
        let tick = Closure::<dyn FnMut()>::new(move || {
            if let Err(err) = Typer::step(&owner, &tick_window) {
                tracing::warn!("typing: step failed: {}", err);
            }
        });
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            interval_ms as i32,
        )?;
        tick.forget();

        this.borrow_mut().interval = Some(handle);
        Ok(())
    }

    /// One tick. Returns `true` once there is nothing left to type.
    fn step(this: &Rc<RefCell<Self>>, window: &Window) -> FxResult<bool> {
        let mut typer = this.borrow_mut();
        match typer.animator.tick() {
            TypingStep::Append(ch) => {
                typer.append(ch)?;
                Ok(false)
            }
            TypingStep::Completed(ch) => {
                typer.append(ch)?;
                if let Some(handle) = typer.interval.take() {
                    window.clear_interval_with_handle(handle);
                }
                typer.schedule_cursor_hide(window)?;
                let (typed, _) = typer.animator.progress();
                tracing::debug!("typing: done after {} characters", typed);
                Ok(true)
            }
            TypingStep::Idle => Ok(true),
        }
    }

    fn append(&self, ch: char) -> FxResult<()> {
        let mut buf = [0u8; 4];
        self.text.append_data(ch.encode_utf8(&mut buf))?;
        Ok(())
    }

    fn schedule_cursor_hide(&self, window: &Window) -> FxResult<()> {
        let Some(cursor) = self.cursor.clone() else {
            return Ok(());
        };
        let delay = self.animator.timing().cursor_hide_delay_ms;
        set_timeout(window, delay, move || {
            if let Err(err) = set_style(&cursor, "opacity", "0") {
                tracing::warn!("typing: could not hide cursor: {}", err);
            }
        })?;
        Ok(())
    }
}
