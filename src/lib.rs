//! Bio page behaviors
//!
//! Progressive-enhancement effects for the static bio page, compiled to WASM:
//! typewriter bio, aurora parallax, card fade-in, crypto address copy, network
//! selector with QR crossfade and a QR zoom modal.
//!
//! # Architecture
//!
//! - **Core layer** (`src/*.rs`): pure state machines, no browser types,
//!   unit-tested on the host.
//! - **DOM layer** (`src/dom/*.rs`, wasm32 only): finds elements, wires
//!   `web-sys` listeners and timers, applies what the core layer decides.
//!
//! Every component is independent. Missing markup turns that one component
//! into a no-op.

pub mod config;
pub mod copy;
pub mod error;
pub mod modal;
pub mod network;
pub mod parallax;
pub mod reveal;
pub mod typing;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use config::PageConfig;
pub use error::{FxError, FxResult, Installed};
pub use modal::{ModalEffect, ModalEvent, ModalState, QrModal};
pub use parallax::{FrameCoalescer, ParallaxGate};
pub use reveal::{RevealPlan, RevealTracker};
pub use typing::{TypingAnimator, TypingStep};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    if let Err(err) = dom::boot() {
        tracing::error!("bio-page failed to start: {}", err);
    }
}
