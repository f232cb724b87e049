//! Typewriter reveal of the bio text
//!
//! The animator is a plain state machine: each interval tick appends exactly
//! one character, in source order. The tick that appends the final character
//! reports `Completed`, which is when the DOM layer stops the interval and
//! schedules the cursor hide. Every later tick is `Idle`. There is no restart
//! or cancel.

use crate::config::TypingTiming;

/// What the DOM layer should do on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingStep {
    /// Append this character to the target.
    Append(char),
    /// Append this final character, then stop ticking.
    Completed(char),
    /// Nothing left to do.
    Idle,
}

impl TypingStep {
    pub fn char(&self) -> Option<char> {
        match *self {
            TypingStep::Append(ch) | TypingStep::Completed(ch) => Some(ch),
            TypingStep::Idle => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypingAnimator {
    chars: Vec<char>,
    cursor: usize,
    typed: String,
    timing: TypingTiming,
}

impl TypingAnimator {
    pub fn new(text: &str, timing: TypingTiming) -> Self {
        Self {
            chars: text.chars().collect(),
            cursor: 0,
            typed: String::with_capacity(text.len()),
            timing,
        }
    }

    pub fn timing(&self) -> TypingTiming {
        self.timing
    }

    /// Advance one step.
    pub fn tick(&mut self) -> TypingStep {
        let Some(&ch) = self.chars.get(self.cursor) else {
            return TypingStep::Idle;
        };

        self.cursor += 1;
        self.typed.push(ch);

        if self.is_finished() {
            TypingStep::Completed(ch)
        } else {
            TypingStep::Append(ch)
        }
    }

    /// Text revealed so far.
    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// All characters have been appended (trivially true for empty text).
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    /// (typed, total) in characters.
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.chars.len())
    }
}
