use serde_derive::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Call,
    Teardown,
}

/// Human readable result written into tracker comments.
///
/// A skipped test is always announced as an expected failure that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Passed,
    Failed,
    Xfailed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        }
    }

    pub fn label(self) -> Label {
        match self {
            Outcome::Passed => Label::Passed,
            Outcome::Failed => Label::Failed,
            Outcome::Skipped => Label::Xfailed,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Call
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Label::Passed => "Passed",
            Label::Failed => "Failed",
            Label::Xfailed => "Xfailed",
        })
    }
}
