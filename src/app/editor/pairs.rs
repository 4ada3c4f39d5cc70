//! Delimiter pair table
//!
//! Maps the trigger character typed after `i`/`a` to the delimiter pair it
//! selects. Both sides of a bracket pair trigger it, so `di(` and `di)` are
//! the same motion.

/// An opening/closing delimiter pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelimiterPair {
    pub open: char,
    pub close: char,
}

impl DelimiterPair {
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// Quotes use the same character on both sides
    pub fn is_symmetric(&self) -> bool {
        self.open == self.close
    }
}

const PARENS: DelimiterPair = DelimiterPair::new('(', ')');
const BRACKETS: DelimiterPair = DelimiterPair::new('[', ']');
const BRACES: DelimiterPair = DelimiterPair::new('{', '}');
const ANGLES: DelimiterPair = DelimiterPair::new('<', '>');
const DOUBLE_QUOTES: DelimiterPair = DelimiterPair::new('"', '"');
const SINGLE_QUOTES: DelimiterPair = DelimiterPair::new('\'', '\'');
const BACKTICKS: DelimiterPair = DelimiterPair::new('`', '`');

/// Every trigger character with its pair
const TABLE: &[(char, DelimiterPair)] = &[
    ('(', PARENS),
    (')', PARENS),
    ('b', PARENS),
    ('[', BRACKETS),
    (']', BRACKETS),
    ('{', BRACES),
    ('}', BRACES),
    ('B', BRACES),
    ('<', ANGLES),
    ('>', ANGLES),
    ('"', DOUBLE_QUOTES),
    ('\'', SINGLE_QUOTES),
    ('`', BACKTICKS),
];

/// Look up the pair for a trigger character
pub fn pair_for(trigger: char) -> Option<DelimiterPair> {
    TABLE
        .iter()
        .find(|(c, _)| *c == trigger)
        .map(|(_, pair)| *pair)
}

/// Check if a character is a valid trigger
pub fn is_trigger(c: char) -> bool {
    pair_for(c).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_sides_map_to_same_pair() {
        assert_eq!(pair_for('('), pair_for(')'));
        assert_eq!(pair_for('{'), pair_for('B'));
        assert_eq!(pair_for('['), Some(DelimiterPair::new('[', ']')));
    }

    #[test]
    fn test_symmetric_pairs() {
        assert!(pair_for('"').unwrap().is_symmetric());
        assert!(pair_for('`').unwrap().is_symmetric());
        assert!(!pair_for('<').unwrap().is_symmetric());
    }

    #[test]
    fn test_unknown_trigger() {
        assert_eq!(pair_for('x'), None);
        assert!(!is_trigger('w'));
        assert!(TABLE.iter().all(|(c, _)| is_trigger(*c)));
    }
}
