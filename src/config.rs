//! Page configuration
//!
//! Defaults ship in `config/page.yaml` (embedded at build time). A page can
//! override individual keys with an inline YAML block; the override is
//! deep-merged over the embedded document before deserializing, so a page
//! only has to mention the keys it changes.

use crate::error::{FxError, FxResult};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Embedded default settings.
pub const EMBEDDED_CONFIG: &str = include_str!("../config/page.yaml");

const DEFAULT_BIO: &str = "Developer, creator, and tech enthusiast. Passionate about AI, automation, and building cool stuff. Always learning, always improving.";

/// All tunables for the page behaviors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub bio_text: String,
    pub typing: TypingTiming,
    pub parallax: ParallaxSettings,
    pub reveal: RevealSettings,
    pub copy: CopySettings,
    pub network: NetworkSettings,
    pub modal: ModalSettings,
    pub selectors: Selectors,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            bio_text: DEFAULT_BIO.to_string(),
            typing: TypingTiming::default(),
            parallax: ParallaxSettings::default(),
            reveal: RevealSettings::default(),
            copy: CopySettings::default(),
            network: NetworkSettings::default(),
            modal: ModalSettings::default(),
            selectors: Selectors::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingTiming {
    /// Delay before the first character.
    pub start_delay_ms: u32,
    /// One character per interval.
    pub interval_ms: u32,
    /// Delay between the last character and hiding the cursor.
    pub cursor_hide_delay_ms: u32,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            start_delay_ms: 300,
            interval_ms: 40,
            cursor_hide_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxSettings {
    /// Below this viewport width (CSS px) parallax stays off.
    pub min_viewport_width: f64,
    /// Shape `i` moves `(i + 1) * speed_step` px at the viewport edge.
    pub speed_step: f64,
}

impl Default for ParallaxSettings {
    fn default() -> Self {
        Self {
            min_viewport_width: 768.0,
            speed_step: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    pub stagger_step_secs: f64,
    /// Fraction of the card that must be visible.
    pub threshold: f64,
    pub visible_class: String,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            stagger_step_secs: 0.08,
            threshold: 0.1,
            visible_class: "visible".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopySettings {
    pub feedback_ms: u32,
    pub copied_label: String,
    pub failed_label: String,
    pub success_background: String,
}

impl Default for CopySettings {
    fn default() -> Self {
        Self {
            feedback_ms: 2000,
            copied_label: "Copied!".to_string(),
            failed_label: "Failed".to_string(),
            success_background: "linear-gradient(135deg, #22c55e, #16a34a)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// QR opacity while the new image loads.
    pub dim_opacity: f64,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self { dim_opacity: 0.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalSettings {
    pub active_class: String,
    pub close_key: String,
}

impl Default for ModalSettings {
    fn default() -> Self {
        Self {
            active_class: "active".to_string(),
            close_key: "Escape".to_string(),
        }
    }
}

/// CSS selectors for every element the behaviors touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub typing_target: String,
    pub cursor: String,
    pub aurora_shapes: String,
    pub cards: String,
    pub single_copy_button: String,
    pub network_select: String,
    pub network_copy_button: String,
    pub qr_image: String,
    pub modal: String,
    pub modal_image: String,
    pub modal_close: String,
    pub qr_thumbnails: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            typing_target: "#typing-bio".to_string(),
            cursor: ".cursor".to_string(),
            aurora_shapes: ".aurora-shape".to_string(),
            cards: ".bento-item".to_string(),
            single_copy_button: "#usdt-copy-button".to_string(),
            network_select: "#network-select".to_string(),
            network_copy_button: "#crypto-copy-button".to_string(),
            qr_image: "#crypto-qr".to_string(),
            modal: "#qr-modal".to_string(),
            modal_image: "#qr-modal-img".to_string(),
            modal_close: "#qr-modal-close".to_string(),
            qr_thumbnails: ".qr-zoomable".to_string(),
        }
    }
}

impl PageConfig {
    /// Parse the embedded defaults.
    pub fn embedded() -> FxResult<Self> {
        Ok(serde_yaml::from_str(EMBEDDED_CONFIG)?)
    }

    /// Embedded defaults with an optional page-provided override merged on top.
    pub fn load(overlay: Option<&str>) -> FxResult<Self> {
        let mut base: Value = serde_yaml::from_str(EMBEDDED_CONFIG)?;

        if let Some(text) = overlay.filter(|t| !t.trim().is_empty()) {
            let overlay: Value = serde_yaml::from_str(text)?;
            if !matches!(overlay, Value::Mapping(_) | Value::Null) {
                return Err(FxError::Config(
                    "override must be a YAML mapping".to_string(),
                ));
            }
            merge_yaml(&mut base, overlay);
        }

        Ok(serde_yaml::from_value(base)?)
    }

    /// Like [`PageConfig::load`], but never fails: a broken override falls
    /// back to the embedded defaults, and broken defaults to `Default`.
    pub fn load_or_default(overlay: Option<&str>) -> Self {
        match Self::load(overlay) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Ignoring page config override: {}", err);
                Self::embedded().unwrap_or_default()
            }
        }
    }
}

/// Recursively merge `overlay` into `base`. Mappings merge key by key,
/// everything else is replaced.
fn merge_yaml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (slot, value) => *slot = value,
    }
}
