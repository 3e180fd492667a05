//! Issue lifecycle status

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three conventional issue states.
///
/// The enum closes the value space, not the transition graph: owners,
/// solvers and admins may set any status at any time, Resolved back to
/// Pending included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "Pending",
            IssueStatus::InProgress => "InProgress",
            IssueStatus::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown issue status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for IssueStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(IssueStatus::Pending),
            "inprogress" | "in progress" | "in-progress" => Ok(IssueStatus::InProgress),
            "resolved" => Ok(IssueStatus::Resolved),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for status in [
            IssueStatus::Pending,
            IssueStatus::InProgress,
            IssueStatus::Resolved,
        ] {
            assert_eq!(status.as_str().parse::<IssueStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_spacing() {
        assert_eq!(
            "in progress".parse::<IssueStatus>().unwrap(),
            IssueStatus::InProgress
        );
        assert_eq!(
            " RESOLVED ".parse::<IssueStatus>().unwrap(),
            IssueStatus::Resolved
        );
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!("closed".parse::<IssueStatus>().is_err());
        assert!("".parse::<IssueStatus>().is_err());
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(IssueStatus::default(), IssueStatus::Pending);
    }
}
