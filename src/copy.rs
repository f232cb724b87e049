//! Copy-to-clipboard feedback for the crypto address buttons
//!
//! The clipboard write itself is async and lives in the DOM layer; this module
//! decides what the button shows afterwards and what the delayed restore
//! puts back.

use crate::config::CopySettings;
use crate::error::FxError;

/// Where the button gets its address from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSource {
    /// Single-address button: its own `data-address`.
    Fixed(String),
    /// Selector button: whatever option is selected at click time.
    Selected,
}

/// Change to the button background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundChange {
    Keep,
    Set(String),
    Clear,
}

/// What the delayed restore does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restore {
    pub label: String,
    pub background: BackgroundChange,
    pub after_ms: u32,
}

/// Immediate feedback plus its scheduled restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackPlan {
    pub label: String,
    pub background: BackgroundChange,
    pub restore: Restore,
}

/// Feedback for one click. The original label is captured when the click
/// happens, so a click during a pending restore captures the feedback text;
/// the last scheduled restore wins.
#[derive(Debug, Clone)]
pub struct CopyFeedback<'a> {
    original_label: String,
    settings: &'a CopySettings,
}

impl<'a> CopyFeedback<'a> {
    pub fn new(original_label: impl Into<String>, settings: &'a CopySettings) -> Self {
        Self {
            original_label: original_label.into(),
            settings,
        }
    }

    pub fn outcome(&self, result: &Result<(), FxError>) -> FeedbackPlan {
        match result {
            Ok(()) => FeedbackPlan {
                label: self.settings.copied_label.clone(),
                background: BackgroundChange::Set(self.settings.success_background.clone()),
                restore: Restore {
                    label: self.original_label.clone(),
                    background: BackgroundChange::Clear,
                    after_ms: self.settings.feedback_ms,
                },
            },
            // Failure only touches the label, and so does its restore
            Err(_) => FeedbackPlan {
                label: self.settings.failed_label.clone(),
                background: BackgroundChange::Keep,
                restore: Restore {
                    label: self.original_label.clone(),
                    background: BackgroundChange::Keep,
                    after_ms: self.settings.feedback_ms,
                },
            },
        }
    }
}

/// Address to copy, or the reason there is none.
pub fn resolve_address(
    source: &AddressSource,
    selected: impl FnOnce() -> Option<String>,
) -> Result<String, FxError> {
    let address = match source {
        AddressSource::Fixed(address) => Some(address.clone()),
        AddressSource::Selected => selected(),
    };
    address
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or_else(|| FxError::Clipboard("no address to copy".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_feedback_and_restore() {
        let settings = CopySettings::default();
        let feedback = CopyFeedback::new("Copy address", &settings);
        let plan = feedback.outcome(&Ok(()));

        assert_eq!(plan.label, "Copied!");
        assert_eq!(
            plan.background,
            BackgroundChange::Set("linear-gradient(135deg, #22c55e, #16a34a)".to_string())
        );
        assert_eq!(plan.restore.label, "Copy address");
        assert_eq!(plan.restore.background, BackgroundChange::Clear);
        assert_eq!(plan.restore.after_ms, 2000);
    }

    #[test]
    fn test_failure_feedback_leaves_style_alone() {
        let settings = CopySettings::default();
        let feedback = CopyFeedback::new("Copy address", &settings);
        let plan = feedback.outcome(&Err(FxError::Clipboard("denied".to_string())));

        assert_eq!(plan.label, "Failed");
        assert_eq!(plan.background, BackgroundChange::Keep);
        assert_eq!(plan.restore.label, "Copy address");
        assert_eq!(plan.restore.background, BackgroundChange::Keep);
        assert_eq!(plan.restore.after_ms, 2000);
    }

    #[test]
    fn test_fixed_address() {
        let source = AddressSource::Fixed("TXYZ123".to_string());
        let address = resolve_address(&source, || panic!("selector not consulted"));
        assert_eq!(address, Ok("TXYZ123".to_string()));
    }

    #[test]
    fn test_selected_address_read_at_call_time() {
        let source = AddressSource::Selected;
        assert_eq!(
            resolve_address(&source, || Some(" 0xabc ".to_string())),
            Ok("0xabc".to_string())
        );
        assert!(resolve_address(&source, || None).is_err());
    }

    #[test]
    fn test_blank_address_is_a_failure() {
        let source = AddressSource::Fixed("   ".to_string());
        assert!(matches!(
            resolve_address(&source, || None),
            Err(FxError::Clipboard(_))
        ));
    }
}
