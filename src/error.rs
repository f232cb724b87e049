//! Error types for the page behaviors.
//!
//! None of these ever reach the page: `boot` logs them and moves on to the
//! next component. Missing markup is not an error at all, see
//! [`Installed::Skipped`].

use thiserror::Error;

/// Failure while installing or running a page behavior.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    /// `window`, `document` or `body` is not available.
    #[error("Missing browser global: {0}")]
    MissingGlobal(&'static str),

    /// A DOM call threw.
    #[error("JS error: {0}")]
    Js(String),

    /// Clipboard API missing or the write was rejected.
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    /// Page config could not be parsed.
    #[error("Invalid page config: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for FxError {
    fn from(err: serde_yaml::Error) -> Self {
        FxError::Config(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FxError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

/// Outcome of installing one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Installed {
    /// Listeners are wired up.
    Active,
    /// Preconditions not met; the component is a no-op on this page.
    Skipped(String),
}

impl Installed {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Installed::Skipped(reason.into())
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Installed::Active)
    }
}

pub type FxResult<T> = Result<T, FxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_error_maps_to_config() {
        let err = serde_yaml::from_str::<u32>("not: a number").unwrap_err();
        let fx: FxError = err.into();
        assert!(matches!(fx, FxError::Config(_)));
    }

    #[test]
    fn test_installed_helpers() {
        assert!(Installed::Active.is_active());
        let skipped = Installed::skipped("no #typing-bio");
        assert!(!skipped.is_active());
        assert_eq!(skipped, Installed::Skipped("no #typing-bio".to_string()));
    }
}
