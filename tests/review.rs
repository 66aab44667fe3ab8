// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

mod helpers;

use std::collections::VecDeque;
use std::io::Cursor;

use agentscout::domain::{AgentSuggestion, AgentType, Decision, Decisions, Priority};
use agentscout::error::{Error, Result};
use agentscout::services::report::render_summary;
use agentscout::services::review::{
    LineReviewer, ReviewHandler, ReviewSession, Reviewer, SuggestionCard,
};
use async_trait::async_trait;
use helpers::make_suggestion;
use tokio_util::sync::CancellationToken;

// ─── Test doubles ────────────────────────────────────────────────────────────

/// Replays a fixed list of decisions and records what it was shown
struct ScriptedReviewer {
    script: VecDeque<Decision>,
    seen: Vec<(String, usize, usize)>,
}

impl ScriptedReviewer {
    fn new(script: &[Decision]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            seen: Vec::new(),
        }
    }
}

impl Reviewer for ScriptedReviewer {
    fn decide(
        &mut self,
        suggestion: &AgentSuggestion,
        position: usize,
        total: usize,
    ) -> Result<Decision> {
        self.seen.push((suggestion.name.clone(), position, total));
        self.script
            .pop_front()
            .ok_or_else(|| Error::Dialog("script exhausted".into()))
    }
}

#[derive(Default)]
struct RecordingHandler {
    accepted: Vec<String>,
    decisions: Vec<Decision>,
    fail_accept: bool,
}

#[async_trait]
impl ReviewHandler for RecordingHandler {
    async fn on_accept(&mut self, suggestion: &AgentSuggestion) -> Result<()> {
        if self.fail_accept {
            return Err(Error::Cancelled);
        }
        self.accepted.push(suggestion.name.clone());
        Ok(())
    }

    fn on_decision(
        &mut self,
        _suggestion: &AgentSuggestion,
        decision: Decision,
        _position: usize,
        _total: usize,
    ) {
        self.decisions.push(decision);
    }
}

fn suggestions(n: usize) -> Vec<AgentSuggestion> {
    (0..n)
        .map(|i| make_suggestion(&format!("agent-{i}"), AgentType::Action, Priority::Medium))
        .collect()
}

fn names(list: &[AgentSuggestion]) -> Vec<&str> {
    list.iter().map(|s| s.name.as_str()).collect()
}

// ─── Decision parsing ────────────────────────────────────────────────────────

#[test]
fn decision_accepts_short_and_long_forms() {
    for (input, expected) in [
        ("y", Decision::Accept),
        ("YES", Decision::Accept),
        (" n \n", Decision::Reject),
        ("no", Decision::Reject),
        ("s", Decision::Skip),
        ("Skip", Decision::Skip),
        ("q", Decision::Stop),
        ("quit", Decision::Stop),
        ("stop", Decision::Stop),
    ] {
        assert_eq!(input.parse::<Decision>().unwrap(), expected, "input {input:?}");
    }
}

#[test]
fn decision_rejects_anything_else() {
    let err = "maybe".parse::<Decision>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid choice 'maybe'. Please enter y, n, s, or q"
    );
    assert!("".parse::<Decision>().is_err());
}

#[test]
fn decision_matching_is_ascii_only() {
    // KELVIN SIGN lowercases to a plain 'k' under Unicode rules
    assert!("s\u{212A}ip".parse::<Decision>().is_err());
    assert!("\u{130}".parse::<Decision>().is_err());
}

// ─── Interrupts ──────────────────────────────────────────────────────────────

#[test]
fn interrupted_prompt_read_is_a_cancellation() {
    let interrupted = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
    assert!(matches!(Error::from(interrupted), Error::Cancelled));

    let broken = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
    assert!(matches!(Error::from(broken), Error::Dialog(_)));
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn every_suggestion_gets_one_decision() {
    let mut reviewer = ScriptedReviewer::new(&[
        Decision::Accept,
        Decision::Reject,
        Decision::Skip,
        Decision::Accept,
    ]);
    let mut handler = RecordingHandler::default();

    let outcome = ReviewSession::run(
        suggestions(4),
        &mut reviewer,
        &mut handler,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.total, 4);
    assert_eq!(outcome.reviewed, 4);
    assert!(!outcome.stopped);
    assert_eq!(names(&outcome.decisions.accepted), vec!["agent-0", "agent-3"]);
    assert_eq!(names(&outcome.decisions.rejected), vec!["agent-1"]);
    assert_eq!(names(&outcome.decisions.skipped), vec!["agent-2"]);
    assert_eq!(outcome.decisions.total(), 4);

    assert_eq!(handler.accepted, vec!["agent-0", "agent-3"]);
    assert_eq!(handler.decisions.len(), 4);

    let positions: Vec<(usize, usize)> = reviewer.seen.iter().map(|(_, p, t)| (*p, *t)).collect();
    assert_eq!(positions, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
}

#[tokio::test]
async fn stop_ends_review_without_recording() {
    let mut reviewer = ScriptedReviewer::new(&[Decision::Accept, Decision::Stop]);
    let mut handler = RecordingHandler::default();

    let outcome = ReviewSession::run(
        suggestions(5),
        &mut reviewer,
        &mut handler,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert!(outcome.stopped);
    assert_eq!(outcome.reviewed, 2);
    assert_eq!(outcome.total, 5);
    assert_eq!(outcome.decisions.total(), 1);
    assert_eq!(reviewer.seen.len(), 2, "nothing is shown after stop");
    assert_eq!(handler.decisions, vec![Decision::Accept, Decision::Stop]);
}

#[tokio::test]
async fn empty_list_does_nothing() {
    let mut reviewer = ScriptedReviewer::new(&[]);
    let mut handler = RecordingHandler::default();

    let outcome = ReviewSession::run(
        Vec::new(),
        &mut reviewer,
        &mut handler,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.reviewed, 0);
    assert_eq!(outcome.decisions.total(), 0);
    assert!(reviewer.seen.is_empty());
}

#[tokio::test]
async fn cancelled_session_returns_cancelled() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut reviewer = ScriptedReviewer::new(&[Decision::Accept]);
    let mut handler = RecordingHandler::default();

    let result = ReviewSession::run(suggestions(1), &mut reviewer, &mut handler, &cancel).await;
    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(reviewer.seen.is_empty());
}

#[tokio::test]
async fn handler_error_aborts_review() {
    let mut reviewer = ScriptedReviewer::new(&[Decision::Accept, Decision::Accept]);
    let mut handler = RecordingHandler {
        fail_accept: true,
        ..RecordingHandler::default()
    };

    let result = ReviewSession::run(
        suggestions(2),
        &mut reviewer,
        &mut handler,
        &CancellationToken::new(),
    )
    .await;
    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(reviewer.seen.len(), 1);
}

#[tokio::test]
async fn summary_counts_match_buckets() {
    let mut reviewer = ScriptedReviewer::new(&[
        Decision::Skip,
        Decision::Accept,
        Decision::Skip,
        Decision::Reject,
        Decision::Stop,
    ]);
    let mut handler = RecordingHandler::default();

    let outcome = ReviewSession::run(
        suggestions(6),
        &mut reviewer,
        &mut handler,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    let summary = render_summary(
        std::path::Path::new("/work/agents"),
        "test-model",
        "2026-01-01 00:00:00",
        &outcome.decisions,
    );
    assert!(summary.contains("- **Accepted**: 1 agents"));
    assert!(summary.contains("- **Rejected**: 1 agents"));
    assert!(summary.contains("- **Skipped**: 2 agents"));
    assert!(summary.contains("## Skipped Agents (Review Later)"));
    assert!(!summary.contains("agent-4"), "stopped-at suggestion is not listed");
}

// ─── Line reviewer ───────────────────────────────────────────────────────────

#[test]
fn line_reviewer_reasks_until_valid() {
    let input = Cursor::new("maybe\n\nS\n");
    let mut output = Vec::new();
    let agent = make_suggestion("Doc Writer", AgentType::Action, Priority::Low);

    let decision = LineReviewer::new(input, &mut output)
        .decide(&agent, 2, 7)
        .unwrap();
    assert_eq!(decision, Decision::Skip);

    let shown = String::from_utf8(output).unwrap();
    assert!(shown.contains("Agent Suggestion 2/7"));
    assert!(shown.contains("DOC WRITER"));
    assert!(shown.contains("Invalid choice 'maybe'"));
    assert_eq!(shown.matches("Your choice (y/n/s/q): ").count(), 3);
}

#[test]
fn line_reviewer_stops_at_end_of_input() {
    let mut output = Vec::new();
    let agent = make_suggestion("x", AgentType::Action, Priority::Low);

    let decision = LineReviewer::new(Cursor::new(""), &mut output)
        .decide(&agent, 1, 1)
        .unwrap();
    assert_eq!(decision, Decision::Stop);
}

#[tokio::test]
async fn piped_answers_drive_a_whole_session() {
    let mut reviewer = LineReviewer::new(Cursor::new("y\nn\n"), std::io::sink());
    let mut handler = RecordingHandler::default();

    let outcome = ReviewSession::run(
        suggestions(3),
        &mut reviewer,
        &mut handler,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    // Input runs out on the third suggestion
    assert!(outcome.stopped);
    assert_eq!(outcome.reviewed, 3);
    assert_eq!(outcome.decisions.accepted.len(), 1);
    assert_eq!(outcome.decisions.rejected.len(), 1);
}

// ─── Card ────────────────────────────────────────────────────────────────────

#[test]
fn card_shows_every_field() {
    let agent = make_suggestion("Task Router", AgentType::Orchestration, Priority::Critical);
    let card = SuggestionCard {
        suggestion: &agent,
        position: 1,
        total: 3,
    }
    .to_string();

    assert!(card.starts_with(&"=".repeat(70)));
    assert!(card.contains("Agent Suggestion 1/3"));
    assert!(card.contains("TASK ROUTER"));
    assert!(card.contains("   Type: Orchestration"));
    assert!(card.contains("   Priority: CRITICAL"));
    assert!(card.contains("Purpose:\n   Task Router purpose"));
    assert!(card.contains("   • first duty\n   • second duty"));
    assert!(card.contains("Interfaces With:\n   planner, executor"));
    assert!(card.ends_with("Value:\n   Task Router value"));
}

#[test]
fn decisions_ignore_stop() {
    let mut decisions = Decisions::default();
    let agent = make_suggestion("x", AgentType::Action, Priority::Low);
    decisions.record(agent.clone(), Decision::Stop);
    decisions.record(agent, Decision::Skip);
    assert_eq!(decisions.total(), 1);
    assert_eq!(decisions.skipped.len(), 1);
}
