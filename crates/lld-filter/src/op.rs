//! The comparison operator carried by a filter condition.

/// Operator a [`crate::FilterCondition`] applies to its resolved macro value.
///
/// Wire values match the original enumeration so a condition loaded from
/// storage can be mapped directly: `REGEXP = 2`, `NOT_REGEXP = 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Value must match the pattern.
    Regexp = 2,
    /// Value must not match the pattern.
    NotRegexp = 3,
}

impl Op {
    /// Maps a regex engine verdict to PASS (`true`) / FAIL (`false`) for this operator.
    ///
    /// `Regexp` + match, and `NotRegexp` + no-match, are the only PASS cases.
    pub fn eval_match(self, matched: bool) -> bool {
        match self {
            Op::Regexp => matched,
            Op::NotRegexp => !matched,
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Regexp => "regexp",
            Op::NotRegexp => "not_regexp",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
