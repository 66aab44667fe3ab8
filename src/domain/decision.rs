// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::str::FromStr;

use super::AgentSuggestion;

/// What the reviewer wants done with one suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
    Skip,
    Stop,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Skip => "skip",
            Self::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDecision(pub String);

impl std::fmt::Display for InvalidDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid choice '{}'. Please enter y, n, s, or q",
            self.0
        )
    }
}

impl std::error::Error for InvalidDecision {}

impl FromStr for Decision {
    type Err = InvalidDecision;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(Self::Accept),
            "n" | "no" => Ok(Self::Reject),
            "s" | "skip" => Ok(Self::Skip),
            "q" | "quit" | "stop" => Ok(Self::Stop),
            _ => Err(InvalidDecision(s.trim().to_string())),
        }
    }
}

/// Suggestions bucketed by decision, in review order
#[derive(Debug, Clone, Default)]
pub struct Decisions {
    pub accepted: Vec<AgentSuggestion>,
    pub rejected: Vec<AgentSuggestion>,
    pub skipped: Vec<AgentSuggestion>,
}

impl Decisions {
    /// Files the suggestion under its bucket. `Stop` is not a bucket.
    pub fn record(&mut self, suggestion: AgentSuggestion, decision: Decision) {
        match decision {
            Decision::Accept => self.accepted.push(suggestion),
            Decision::Reject => self.rejected.push(suggestion),
            Decision::Skip => self.skipped.push(suggestion),
            Decision::Stop => {}
        }
    }

    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len() + self.skipped.len()
    }
}
