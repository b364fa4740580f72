//! Immutable gate parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gate::DEFAULT_MAX_LINE_LEN;

/// How the attempt counter maps to the number of permitted guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptPolicy {
    /// The zero check happens before the decrement, so `n` configured
    /// attempts allow `n + 1` wrong guesses before the last one denies.
    #[default]
    Compatible,
    /// `n` configured attempts allow exactly `n` guesses; the `n`-th wrong
    /// guess denies.
    Exact,
}

impl AttemptPolicy {
    /// Wrong guesses still accepted before the gate denies, counting the
    /// one that denies.
    pub fn guesses_left(self, attempts_left: u32) -> u32 {
        match self {
            Self::Compatible => attempts_left.saturating_add(1),
            Self::Exact => attempts_left,
        }
    }
}

/// What the gate compares against and how lenient it is.
#[derive(Clone, PartialEq, Eq)]
pub struct GatePolicy {
    secret: Vec<u8>,
    attempt_policy: AttemptPolicy,
    max_line_len: Option<usize>,
}

impl GatePolicy {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            attempt_policy: AttemptPolicy::default(),
            max_line_len: Some(DEFAULT_MAX_LINE_LEN),
        }
    }

    pub fn with_attempt_policy(mut self, attempt_policy: AttemptPolicy) -> Self {
        self.attempt_policy = attempt_policy;
        self
    }

    /// Cap the line length; `None` lets lines grow without bound.
    pub fn with_max_line_len(mut self, max_line_len: Option<usize>) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    pub fn attempt_policy(&self) -> AttemptPolicy {
        self.attempt_policy
    }

    pub fn max_line_len(&self) -> Option<usize> {
        self.max_line_len
    }

    pub(crate) fn matches(&self, line: &[u8]) -> bool {
        line == self.secret.as_slice()
    }

    pub(crate) fn has_room(&self, len: usize) -> bool {
        self.max_line_len.is_none_or(|max| len < max)
    }
}

impl fmt::Debug for GatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatePolicy")
            .field("secret", &"<redacted>")
            .field("attempt_policy", &self.attempt_policy)
            .field("max_line_len", &self.max_line_len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_is_exact() {
        let policy = GatePolicy::new("lmnop");
        assert!(policy.matches(b"lmnop"));
        assert!(!policy.matches(b"lmnop\r"));
        assert!(!policy.matches(b"LMNOP"));
        assert!(!policy.matches(b""));
    }

    #[test]
    fn room_respects_cap() {
        let policy = GatePolicy::new("a").with_max_line_len(Some(2));
        assert!(policy.has_room(0));
        assert!(policy.has_room(1));
        assert!(!policy.has_room(2));

        let unbounded = policy.with_max_line_len(None);
        assert!(unbounded.has_room(usize::MAX - 1));
    }

    #[test]
    fn guesses_left_per_policy() {
        assert_eq!(AttemptPolicy::Compatible.guesses_left(3), 4);
        assert_eq!(AttemptPolicy::Compatible.guesses_left(0), 1);
        assert_eq!(AttemptPolicy::Exact.guesses_left(3), 3);
        assert_eq!(AttemptPolicy::Exact.guesses_left(1), 1);
    }

    #[test]
    fn debug_redacts_secret() {
        let printed = format!("{:?}", GatePolicy::new("lmnop"));
        assert!(!printed.contains("lmnop"));
    }

    #[test]
    fn attempt_policy_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: AttemptPolicy,
        }
        let parsed: Wrapper = toml::from_str("policy = \"exact\"").unwrap();
        assert_eq!(parsed.policy, AttemptPolicy::Exact);
    }
}
