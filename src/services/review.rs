// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

//! One-suggestion-at-a-time review.
//!
//! Suggestions are presented in the order the model returned them. Each gets
//! exactly one [`Decision`]; accept, reject and skip land in their bucket,
//! stop ends the session without being recorded anywhere.

use std::fmt;
use std::io::{BufRead, Write};

use async_trait::async_trait;
use console::style;
use dialoguer::Input;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::{AgentSuggestion, Decision, Decisions};
use crate::error::{Error, Result};

/// Source of decisions, usually a human at a terminal
pub trait Reviewer {
    /// `position` is 1-based.
    fn decide(
        &mut self,
        suggestion: &AgentSuggestion,
        position: usize,
        total: usize,
    ) -> Result<Decision>;
}

/// Side effects of a review
#[async_trait]
pub trait ReviewHandler: Send {
    /// Runs before an accepted suggestion is recorded
    async fn on_accept(&mut self, suggestion: &AgentSuggestion) -> Result<()>;

    fn on_decision(
        &mut self,
        _suggestion: &AgentSuggestion,
        _decision: Decision,
        _position: usize,
        _total: usize,
    ) {
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReviewOutcome {
    pub decisions: Decisions,
    /// Suggestions that received a decision, including the one stopped at
    pub reviewed: usize,
    pub total: usize,
    pub stopped: bool,
}

pub struct ReviewSession;

impl ReviewSession {
    pub async fn run<R, H>(
        suggestions: Vec<AgentSuggestion>,
        reviewer: &mut R,
        handler: &mut H,
        cancel: &CancellationToken,
    ) -> Result<ReviewOutcome>
    where
        R: Reviewer,
        H: ReviewHandler,
    {
        let total = suggestions.len();
        let mut outcome = ReviewOutcome {
            total,
            ..ReviewOutcome::default()
        };

        for (i, suggestion) in suggestions.into_iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let position = i + 1;
            let decision = reviewer.decide(&suggestion, position, total)?;
            outcome.reviewed = position;
            debug!(
                agent = %suggestion.name,
                decision = decision.as_str(),
                position,
                total,
                "review decision"
            );

            if decision == Decision::Accept {
                handler.on_accept(&suggestion).await?;
            }
            handler.on_decision(&suggestion, decision, position, total);

            if decision == Decision::Stop {
                outcome.stopped = true;
                break;
            }
            outcome.decisions.record(suggestion, decision);
        }

        Ok(outcome)
    }
}

/// Plain-text card describing one suggestion
pub struct SuggestionCard<'a> {
    pub suggestion: &'a AgentSuggestion,
    pub position: usize,
    pub total: usize,
}

impl fmt::Display for SuggestionCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.suggestion;
        let rule = "=".repeat(70);

        writeln!(f, "{rule}")?;
        writeln!(f, "Agent Suggestion {}/{}", self.position, self.total)?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "{}", s.name.to_uppercase())?;
        writeln!(f, "   Type: {}", s.agent_type.label())?;
        writeln!(f, "   Priority: {}", s.priority.as_str().to_uppercase())?;
        writeln!(f)?;
        writeln!(f, "Purpose:\n   {}\n", s.purpose)?;
        writeln!(f, "Rationale:\n   {}\n", s.rationale)?;
        writeln!(f, "Key Responsibilities:")?;
        for r in &s.responsibilities {
            writeln!(f, "   • {r}")?;
        }
        writeln!(f)?;
        writeln!(f, "Interfaces With:\n   {}\n", s.interfaces)?;
        write!(f, "Value:\n   {}", s.value)
    }
}

const CHOICES: &str = "\
  [y] Yes - Add this agent and generate system prompt
  [n] No - Reject this agent
  [s] Skip - Review this agent later
  [q] Quit - Stop reviewing suggestions";

/// Interactive reviewer for a real terminal
#[derive(Default)]
pub struct DialogReviewer;

impl Reviewer for DialogReviewer {
    fn decide(
        &mut self,
        suggestion: &AgentSuggestion,
        position: usize,
        total: usize,
    ) -> Result<Decision> {
        let card = SuggestionCard {
            suggestion,
            position,
            total,
        };
        eprintln!("\n{}\n", card);
        eprintln!("{}", style("-".repeat(70)).dim());
        eprintln!("{}", style("What would you like to do?").bold());
        eprintln!("{CHOICES}");
        eprintln!("{}", style("-".repeat(70)).dim());

        let choice: String = Input::new()
            .with_prompt("Your choice (y/n/s/q)")
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                input.parse::<Decision>().map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;

        choice
            .parse::<Decision>()
            .map_err(|e| Error::Dialog(e.to_string()))
    }
}

/// Reviewer reading one answer per line, for piped input.
/// Invalid lines are re-asked; end of input stops the review.
pub struct LineReviewer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineReviewer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Reviewer for LineReviewer<R, W> {
    fn decide(
        &mut self,
        suggestion: &AgentSuggestion,
        position: usize,
        total: usize,
    ) -> Result<Decision> {
        let card = SuggestionCard {
            suggestion,
            position,
            total,
        };
        writeln!(self.output, "\n{card}\n")?;
        writeln!(self.output, "What would you like to do?\n{CHOICES}")?;

        loop {
            write!(self.output, "\nYour choice (y/n/s/q): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(Decision::Stop);
            }

            match line.parse::<Decision>() {
                Ok(decision) => return Ok(decision),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }
}
