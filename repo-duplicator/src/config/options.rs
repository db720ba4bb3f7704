//! Run mode options.

use super::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Which of the two passes a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pass {
    /// Create milestones, labels and issues in the destination.
    #[default]
    Create,

    /// Copy comments and open/closed state onto already created issues.
    Update,
}

impl Pass {
    /// Selects the pass from the `--update` flag.
    #[must_use]
    pub fn from_update_flag(update: bool) -> Self {
        if update {
            Self::Update
        } else {
            Self::Create
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// How source issues are matched with their destination counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Pair issues by their position in the number-sorted lists.
    ///
    /// Both passes must see the same ordering on both sides. Any issue created
    /// or deleted out of band in the destination shifts every later pair.
    #[default]
    Position,

    /// Pair issues by a hidden marker embedded in the destination issue body
    /// when it is created.
    Marker,
}

impl FromStr for MatchStrategy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "position" => Ok(Self::Position),
            "marker" => Ok(Self::Marker),
            _ => Err(ConfigError::InvalidOption {
                option: "match strategy",
                value: value.to_string(),
                expected: "position, marker",
            }),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position => f.write_str("position"),
            Self::Marker => f.write_str("marker"),
        }
    }
}

/// What to do when creating a milestone fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log the failure, count it in the summary and move on.
    #[default]
    Continue,

    /// Stop the run with the error.
    Abort,
}

impl ErrorPolicy {
    /// Selects the policy from the `--fail-fast` flag.
    #[must_use]
    pub fn from_fail_fast(fail_fast: bool) -> Self {
        if fail_fast {
            Self::Abort
        } else {
            Self::Continue
        }
    }
}
