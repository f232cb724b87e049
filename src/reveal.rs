//! Scroll-triggered fade-in for the bento cards

use crate::config::RevealSettings;
use std::collections::BTreeSet;

/// Per-card `transition-delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaggerDelay(pub f64);

impl StaggerDelay {
    pub fn to_css(&self) -> String {
        // Round away float noise: 3 * 0.08 is 0.24000000000000002
        let secs = (self.0 * 1000.0).round() / 1000.0;
        format!("{}s", secs)
    }
}

pub fn stagger_delay(index: usize, settings: &RevealSettings) -> StaggerDelay {
    StaggerDelay(index as f64 * settings.stagger_step_secs)
}

/// How the cards get revealed on this page.
#[derive(Debug, Clone, PartialEq)]
pub enum RevealPlan {
    /// Reduced motion: set every card to full opacity now, observe nothing.
    ShowAll,
    /// Assign these delays in document order, then observe.
    Staggered(Vec<StaggerDelay>),
}

impl RevealPlan {
    pub fn for_cards(count: usize, reduced_motion: bool, settings: &RevealSettings) -> Self {
        if reduced_motion {
            RevealPlan::ShowAll
        } else {
            RevealPlan::Staggered((0..count).map(|i| stagger_delay(i, settings)).collect())
        }
    }
}

/// Cards still waiting for their first intersection.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    pending: BTreeSet<usize>,
}

impl RevealTracker {
    pub fn new(count: usize) -> Self {
        Self {
            pending: (0..count).collect(),
        }
    }

    /// Feed one observer entry. Returns `true` exactly once per card: on the
    /// first entry that reports it intersecting. The caller then adds the
    /// visible class and unobserves the card.
    pub fn intersected(&mut self, index: usize, is_intersecting: bool) -> bool {
        is_intersecting && self.pending.remove(&index)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settings() -> RevealSettings {
        RevealSettings::default()
    }

    #[test]
    fn test_stagger_css() {
        let s = settings();
        assert_eq!(stagger_delay(0, &s).to_css(), "0s");
        assert_eq!(stagger_delay(1, &s).to_css(), "0.08s");
        assert_eq!(stagger_delay(3, &s).to_css(), "0.24s");
        assert_eq!(stagger_delay(10, &s).to_css(), "0.8s");
    }

    #[test]
    fn test_reduced_motion_shows_all_without_delays() {
        assert_eq!(RevealPlan::for_cards(6, true, &settings()), RevealPlan::ShowAll);
    }

    #[test]
    fn test_staggered_plan_in_document_order() {
        let RevealPlan::Staggered(delays) = RevealPlan::for_cards(3, false, &settings()) else {
            panic!("expected staggered plan");
        };
        let css: Vec<String> = delays.iter().map(StaggerDelay::to_css).collect();
        assert_eq!(css, vec!["0s", "0.08s", "0.16s"]);
    }

    #[test]
    fn test_reveal_once_on_reentry() {
        let mut tracker = RevealTracker::new(2);
        assert!(!tracker.intersected(0, false));
        assert!(tracker.intersected(0, true));
        assert!(!tracker.intersected(0, false));
        assert!(!tracker.intersected(0, true));
        assert_eq!(tracker.pending(), 1);
        assert!(tracker.intersected(1, true));
        assert!(tracker.is_done());
    }

    #[test]
    fn test_unknown_index_ignored() {
        let mut tracker = RevealTracker::new(1);
        assert!(!tracker.intersected(7, true));
        assert_eq!(tracker.pending(), 1);
    }

    proptest! {
        #[test]
        fn prop_each_card_revealed_at_most_once(
            entries in proptest::collection::vec((0usize..8, any::<bool>()), 0..200)
        ) {
            let mut tracker = RevealTracker::new(8);
            let mut reveals = [0u32; 8];
            for (index, hit) in entries {
                if tracker.intersected(index, hit) {
                    reveals[index] += 1;
                }
            }
            prop_assert!(reveals.iter().all(|&n| n <= 1));
            let revealed = reveals.iter().filter(|&&n| n == 1).count();
            prop_assert_eq!(revealed + tracker.pending(), 8);
        }
    }
}
