//! QR zoom modal state machine
//!
//! ```text
//!   Closed ──ThumbnailClicked──► Open
//!     ▲                           │
//!     └─ CloseClicked / backdrop / Escape
//! ```

/// Input to the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    ThumbnailClicked(String),
    CloseClicked,
    /// Click somewhere inside the overlay. `on_backdrop` is true only when the
    /// overlay element itself was the click target, not its content.
    BackdropClicked { on_backdrop: bool },
    KeyPressed(String),
}

/// DOM work the event requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEffect {
    /// Set the zoomed image, show the overlay, lock page scroll.
    Open { src: String },
    /// Hide the overlay, restore page scroll.
    Close,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        src: String,
    },
}

#[derive(Debug, Clone)]
pub struct QrModal {
    state: ModalState,
    close_key: String,
}

impl QrModal {
    pub fn new(close_key: impl Into<String>) -> Self {
        Self {
            state: ModalState::Closed,
            close_key: close_key.into(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn handle(&mut self, event: ModalEvent) -> ModalEffect {
        match event {
            ModalEvent::ThumbnailClicked(src) => {
                self.state = ModalState::Open { src: src.clone() };
                ModalEffect::Open { src }
            }
            ModalEvent::CloseClicked => self.close(),
            ModalEvent::BackdropClicked { on_backdrop: true } => self.close(),
            ModalEvent::BackdropClicked { on_backdrop: false } => ModalEffect::None,
            ModalEvent::KeyPressed(key) if key == self.close_key => self.close(),
            ModalEvent::KeyPressed(_) => ModalEffect::None,
        }
    }

    fn close(&mut self) -> ModalEffect {
        if !self.is_open() {
            return ModalEffect::None;
        }
        self.state = ModalState::Closed;
        ModalEffect::Close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_modal() -> QrModal {
        let mut modal = QrModal::new("Escape");
        let effect = modal.handle(ModalEvent::ThumbnailClicked("qr/trc20.png".to_string()));
        assert_eq!(
            effect,
            ModalEffect::Open {
                src: "qr/trc20.png".to_string()
            }
        );
        assert!(modal.is_open());
        modal
    }

    #[test]
    fn test_starts_closed() {
        assert_eq!(QrModal::new("Escape").state(), &ModalState::Closed);
    }

    #[test]
    fn test_close_button() {
        let mut modal = open_modal();
        assert_eq!(modal.handle(ModalEvent::CloseClicked), ModalEffect::Close);
        assert!(!modal.is_open());
    }

    #[test]
    fn test_backdrop_only_closes_on_overlay_itself() {
        let mut modal = open_modal();
        assert_eq!(
            modal.handle(ModalEvent::BackdropClicked { on_backdrop: false }),
            ModalEffect::None
        );
        assert!(modal.is_open());
        assert_eq!(
            modal.handle(ModalEvent::BackdropClicked { on_backdrop: true }),
            ModalEffect::Close
        );
        assert!(!modal.is_open());
    }

    #[test]
    fn test_escape_closes_when_open() {
        let mut modal = open_modal();
        assert_eq!(modal.handle(ModalEvent::KeyPressed("Enter".into())), ModalEffect::None);
        assert_eq!(modal.handle(ModalEvent::KeyPressed("Escape".into())), ModalEffect::Close);
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn test_escape_while_closed_does_nothing() {
        let mut modal = QrModal::new("Escape");
        assert_eq!(modal.handle(ModalEvent::KeyPressed("Escape".into())), ModalEffect::None);
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn test_close_inputs_while_closed_do_nothing() {
        let mut modal = QrModal::new("Escape");
        assert_eq!(modal.handle(ModalEvent::CloseClicked), ModalEffect::None);
        assert_eq!(
            modal.handle(ModalEvent::BackdropClicked { on_backdrop: true }),
            ModalEffect::None
        );

        let mut modal = open_modal();
        assert_eq!(modal.handle(ModalEvent::CloseClicked), ModalEffect::Close);
        assert_eq!(modal.handle(ModalEvent::CloseClicked), ModalEffect::None);
    }

    #[test]
    fn test_second_thumbnail_swaps_image() {
        let mut modal = open_modal();
        let effect = modal.handle(ModalEvent::ThumbnailClicked("qr/erc20.png".into()));
        assert_eq!(
            modal.state(),
            &ModalState::Open {
                src: "qr/erc20.png".to_string()
            }
        );
        assert!(matches!(effect, ModalEffect::Open { .. }));
    }
}
