//! Keystroke parsers for text object motions
//!
//! Each parser is a value that consumes one character and hands back a
//! [`Step`]: either itself (still waiting), a finished [`MotionRequest`], or
//! a cancellation. Because `feed` takes `self` by value, a parser that has
//! completed or cancelled can never be fed again.

use super::request::{parse_count, MotionRequest, Operation, OperationPrefix, ParseError};
use crate::app::editor::{pairs, Scope};
use regex::Regex;
use std::sync::OnceLock;

/// Typing this aborts an interactive motion
pub const CANCEL_CHAR: char = '\n';

/// Result of feeding one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<S> {
    Pending(S),
    Complete(MotionRequest),
    Cancel,
}

/// Parser for a motion whose operation is known up front (`di`, `ya`, ...).
/// Accepts digits in any number, then completes on a trigger character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectInput {
    prefix: OperationPrefix,
    digits: String,
}

impl DirectInput {
    pub fn new(prefix: OperationPrefix) -> Self {
        Self {
            prefix,
            digits: String::new(),
        }
    }

    pub fn parse(prefix: &str) -> Result<Self, ParseError> {
        Ok(Self::new(prefix.parse()?))
    }

    pub fn prefix(&self) -> OperationPrefix {
        self.prefix
    }

    pub fn feed(mut self, c: char) -> Step<Self> {
        if c.is_ascii_digit() {
            self.digits.push(c);
            return Step::Pending(self);
        }
        if !pairs::is_trigger(c) {
            return Step::Cancel;
        }
        match parse_count(&self.digits) {
            Some(count) => Step::Complete(MotionRequest::new(self.prefix, c, count)),
            None => Step::Cancel,
        }
    }

    /// What has been typed so far, for display
    pub fn pending_keys(&self) -> String {
        format!("{}{}", self.prefix, self.digits)
    }
}

/// `2di(` as a whole: count, operation, scope, trigger
fn complete_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]*)([dyvs])([ia])(.)$").expect("static pattern compiles")
    })
}

/// Any prefix that could still grow into a complete motion
fn partial_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]*(?:[dyvs][ia]?)?$").expect("static pattern compiles")
    })
}

/// Parser for a motion typed from scratch, operation included (`2di(`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractiveInput {
    raw: String,
}

impl InteractiveInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(mut self, c: char) -> Step<Self> {
        if c == CANCEL_CHAR {
            return Step::Cancel;
        }
        self.raw.push(c);

        if let Some(caps) = complete_pattern().captures(&self.raw) {
            return self.finish(&caps);
        }
        if partial_pattern().is_match(&self.raw) {
            Step::Pending(self)
        } else {
            Step::Cancel
        }
    }

    fn finish(&self, caps: &regex::Captures<'_>) -> Step<Self> {
        let field = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
        let first = |i: usize| field(i).chars().next();

        let (Some(operation), Some(scope), Some(trigger)) = (
            first(2).and_then(Operation::from_char),
            first(3).and_then(Scope::from_char),
            first(4),
        ) else {
            return Step::Cancel;
        };
        if !pairs::is_trigger(trigger) {
            return Step::Cancel;
        }
        match parse_count(field(1)) {
            Some(count) => Step::Complete(MotionRequest::new(
                OperationPrefix { operation, scope },
                trigger,
                count,
            )),
            None => Step::Cancel,
        }
    }

    pub fn pending_keys(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_direct(prefix: &str, keys: &str) -> Step<DirectInput> {
        let mut input = DirectInput::parse(prefix).unwrap();
        for c in keys.chars() {
            match input.feed(c) {
                Step::Pending(next) => input = next,
                done => return done,
            }
        }
        Step::Pending(input)
    }

    fn run_interactive(keys: &str) -> Step<InteractiveInput> {
        let mut input = InteractiveInput::new();
        for c in keys.chars() {
            match input.feed(c) {
                Step::Pending(next) => input = next,
                done => return done,
            }
        }
        Step::Pending(input)
    }

    fn request(prefix: &str, trigger: char, count: usize) -> MotionRequest {
        MotionRequest::new(prefix.parse().unwrap(), trigger, count)
    }

    #[test]
    fn test_direct_defaults_count_to_one() {
        assert_eq!(run_direct("di", "("), Step::Complete(request("di", '(', 1)));
    }

    #[test]
    fn test_direct_accumulates_digits() {
        assert_eq!(run_direct("ya", "12\""), Step::Complete(request("ya", '"', 12)));
    }

    #[test]
    fn test_direct_cancels_on_other_chars() {
        assert_eq!(run_direct("di", "2x"), Step::Cancel);
        assert_eq!(run_direct("di", "\n"), Step::Cancel);
    }

    #[test]
    fn test_direct_pending_keys() {
        let Step::Pending(input) = run_direct("vi", "3") else {
            panic!("expected pending");
        };
        assert_eq!(input.pending_keys(), "vi3");
    }

    #[test]
    fn test_interactive_full_motion() {
        assert_eq!(run_interactive("2di("), Step::Complete(request("di", '(', 2)));
        assert_eq!(run_interactive("ya{"), Step::Complete(request("ya", '{', 1)));
        assert_eq!(run_interactive("si'"), Step::Complete(request("vi", '\'', 1)));
    }

    #[test]
    fn test_interactive_waits_for_all_fields() {
        for keys in ["", "2", "23", "2d", "2di"] {
            assert!(matches!(run_interactive(keys), Step::Pending(_)), "{keys:?}");
        }
    }

    #[test]
    fn test_interactive_rejects_dead_ends() {
        assert_eq!(run_interactive("x"), Step::Cancel);
        assert_eq!(run_interactive("2dx"), Step::Cancel);
        assert_eq!(run_interactive("d2"), Step::Cancel);
        assert_eq!(run_interactive("diq"), Step::Cancel);
        assert_eq!(run_interactive("di5"), Step::Cancel);
    }

    #[test]
    fn test_interactive_cancel_char() {
        assert_eq!(run_interactive("2d\n"), Step::Cancel);
    }

    #[test]
    fn test_interactive_count_overflow_cancels() {
        assert_eq!(run_interactive("99999999999999999999999di("), Step::Cancel);
    }
}
