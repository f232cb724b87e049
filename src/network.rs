//! Network selector: per-network address and QR image, with a crossfade on
//! switch.

use crate::config::NetworkSettings;

/// Data carried by one `<option>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkOption {
    pub address: String,
    pub qr_src: String,
}

impl NetworkOption {
    /// Both attributes must be present and non-blank.
    pub fn from_attrs(address: Option<String>, qr_src: Option<String>) -> Option<Self> {
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Some(Self {
            address: clean(address)?,
            qr_src: clean(qr_src)?,
        })
    }
}

/// DOM mutation for the QR image.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossfadeStep {
    /// Lower opacity and swap the source.
    Dim { opacity: f64, src: String },
    /// New image loaded; back to full opacity.
    Restore { opacity: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Shown,
    Loading,
}

#[derive(Debug, Clone)]
pub struct Crossfade {
    phase: Phase,
    settings: NetworkSettings,
}

impl Crossfade {
    pub fn new(settings: NetworkSettings) -> Self {
        Self {
            phase: Phase::Shown,
            settings,
        }
    }

    /// Start switching to `option`. Switching again before the previous image
    /// loaded just swaps the source again; one `load` restores opacity.
    pub fn begin(&mut self, option: &NetworkOption) -> CrossfadeStep {
        self.phase = Phase::Loading;
        CrossfadeStep::Dim {
            opacity: self.settings.dim_opacity,
            src: option.qr_src.clone(),
        }
    }

    /// Image `load` fired. Loads outside a switch (the initial image) change
    /// nothing.
    pub fn loaded(&mut self) -> Option<CrossfadeStep> {
        match self.phase {
            Phase::Loading => {
                self.phase = Phase::Shown;
                Some(CrossfadeStep::Restore { opacity: 1.0 })
            }
            Phase::Shown => None,
        }
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(address: &str, qr: &str) -> NetworkOption {
        NetworkOption {
            address: address.to_string(),
            qr_src: qr.to_string(),
        }
    }

    #[test]
    fn test_from_attrs() {
        assert_eq!(
            NetworkOption::from_attrs(Some("T123".into()), Some("qr/trc20.png".into())),
            Some(option("T123", "qr/trc20.png"))
        );
        assert_eq!(NetworkOption::from_attrs(None, Some("qr.png".into())), None);
        assert_eq!(NetworkOption::from_attrs(Some("T1".into()), Some(" ".into())), None);
    }

    #[test]
    fn test_crossfade_cycle() {
        let mut fade = Crossfade::new(NetworkSettings::default());
        assert_eq!(fade.loaded(), None);

        let step = fade.begin(&option("0xabc", "qr/erc20.png"));
        assert_eq!(
            step,
            CrossfadeStep::Dim {
                opacity: 0.5,
                src: "qr/erc20.png".to_string()
            }
        );
        assert!(fade.is_loading());

        assert_eq!(fade.loaded(), Some(CrossfadeStep::Restore { opacity: 1.0 }));
        assert!(!fade.is_loading());
        assert_eq!(fade.loaded(), None);
    }

    #[test]
    fn test_rapid_switch_restores_once() {
        let mut fade = Crossfade::new(NetworkSettings::default());
        fade.begin(&option("a", "a.png"));
        let step = fade.begin(&option("b", "b.png"));
        assert!(matches!(step, CrossfadeStep::Dim { ref src, .. } if src == "b.png"));
        assert!(fade.loaded().is_some());
        assert!(fade.loaded().is_none());
    }
}
