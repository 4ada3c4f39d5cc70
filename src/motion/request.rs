//! Parsed motion instructions

use crate::app::editor::Scope;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// What to do with a resolved text object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Delete,
    Yank,
    Select,
}

impl Operation {
    /// `v` and `s` both select
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Operation::Delete),
            'y' => Some(Operation::Yank),
            'v' | 's' => Some(Operation::Select),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operation::Delete => 'd',
            Operation::Yank => 'y',
            Operation::Select => 'v',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(char),
    #[error("unknown scope '{0}' (expected 'i' or 'a')")]
    UnknownScope(char),
    #[error("operation prefix must be two characters, got {0:?}")]
    BadPrefix(String),
}

/// Operation plus scope, as typed before the trigger: `di`, `ya`, `vi`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OperationPrefix {
    pub operation: Operation,
    pub scope: Scope,
}

impl FromStr for OperationPrefix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(op), Some(scope), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseError::BadPrefix(s.to_string()));
        };
        Ok(Self {
            operation: Operation::from_char(op).ok_or(ParseError::UnknownOperation(op))?,
            scope: Scope::from_char(scope).ok_or(ParseError::UnknownScope(scope))?,
        })
    }
}

impl fmt::Display for OperationPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operation.as_char(), self.scope.as_char())
    }
}

/// A fully parsed motion, ready for the executor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionRequest {
    pub operation: Operation,
    pub scope: Scope,
    pub trigger: char,
    pub count: usize,
}

impl MotionRequest {
    pub fn new(prefix: OperationPrefix, trigger: char, count: usize) -> Self {
        Self {
            operation: prefix.operation,
            scope: prefix.scope,
            trigger,
            count: count.max(1),
        }
    }

    pub fn prefix(&self) -> OperationPrefix {
        OperationPrefix {
            operation: self.operation,
            scope: self.scope,
        }
    }
}

impl fmt::Display for MotionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 1 {
            write!(f, "{}", self.count)?;
        }
        write!(f, "{}{}", self.prefix(), self.trigger)
    }
}

/// Parse an accumulated count. Empty means 1, zero is bumped to 1, and
/// anything that does not fit a `usize` is rejected.
pub fn parse_count(digits: &str) -> Option<usize> {
    if digits.is_empty() {
        return Some(1);
    }
    digits.parse::<usize>().ok().map(|n| n.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefix() {
        let prefix: OperationPrefix = "di".parse().unwrap();
        assert_eq!(prefix.operation, Operation::Delete);
        assert_eq!(prefix.scope, Scope::Inner);

        let prefix: OperationPrefix = "sa".parse().unwrap();
        assert_eq!(prefix.operation, Operation::Select);
        assert_eq!(prefix.to_string(), "va");
    }

    #[test]
    fn test_parse_prefix_errors() {
        assert_eq!("xi".parse::<OperationPrefix>(), Err(ParseError::UnknownOperation('x')));
        assert_eq!("dq".parse::<OperationPrefix>(), Err(ParseError::UnknownScope('q')));
        assert!(matches!("d".parse::<OperationPrefix>(), Err(ParseError::BadPrefix(_))));
        assert!(matches!("dia".parse::<OperationPrefix>(), Err(ParseError::BadPrefix(_))));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(""), Some(1));
        assert_eq!(parse_count("0"), Some(1));
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count("99999999999999999999999999"), None);
    }

    #[test]
    fn test_display() {
        let request = MotionRequest::new("di".parse().unwrap(), '(', 2);
        assert_eq!(request.to_string(), "2di(");
    }
}
