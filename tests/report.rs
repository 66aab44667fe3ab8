// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

mod helpers;

use std::fs;
use std::path::Path;

use agentscout::domain::{AgentType, Decisions, Priority, capitalize, slugify};
use agentscout::error::Error;
use agentscout::services::report::{
    ANALYSIS_FILE, ReportWriter, SUMMARY_FILE, failed_prompt_placeholder, render_agent_prompt,
    render_analysis, render_summary, split_batch_prompts,
};
use helpers::make_suggestion;
use proptest::prelude::*;
use tempfile::TempDir;

// ─── Slugs ───────────────────────────────────────────────────────────────────

#[test]
fn slug_examples() {
    insta::assert_snapshot!(slugify("Task Router"), @"task-router");
    insta::assert_snapshot!(slugify("QA_Test Runner"), @"qa-test-runner");
    insta::assert_snapshot!(slugify("Data/Pipeline (v2)!"), @"datapipeline-v2");
    insta::assert_snapshot!(slugify("!!!"), @"agent");
}

#[test]
fn capitalize_examples() {
    assert_eq!(capitalize("high"), "High");
    assert_eq!(capitalize("CRITICAL"), "Critical");
    assert_eq!(capitalize(""), "");
}

proptest! {
    #[test]
    fn slug_is_always_a_safe_file_stem(name in any::<String>()) {
        let slug = slugify(&name);
        prop_assert!(!slug.is_empty());
        prop_assert!(slug.chars().all(|c| c.is_alphanumeric() || c == '-'));
        prop_assert!(!slug.contains('/'));
        prop_assert!(!slug.contains('.'));
    }
}

// ─── Rendering ───────────────────────────────────────────────────────────────

#[test]
fn agent_prompt_has_metadata_header() {
    let agent = make_suggestion("Task Router", AgentType::Orchestration, Priority::High);
    let body = render_agent_prompt(&agent, "You are the router.", "2026-03-01 12:00:00");

    assert_eq!(
        body,
        "# Task Router\n\n\
         **Type**: Orchestration\n\
         **Priority**: High\n\
         **Generated**: 2026-03-01 12:00:00\n\n\
         ---\n\n\
         You are the router."
    );
}

#[test]
fn placeholder_names_the_failure() {
    let agent = make_suggestion("Doc Writer", AgentType::Action, Priority::Low);
    let body = failed_prompt_placeholder(&agent, "connection reset");
    insta::assert_snapshot!(body.lines().next().unwrap(), @"# Doc Writer");
    assert!(body.ends_with("Error generating prompt: connection reset"));
}

#[test]
fn empty_summary_has_counts_only() {
    let summary = render_summary(
        Path::new("/srv/agents"),
        "llama3:8b",
        "2026-03-01 12:00:00",
        &Decisions::default(),
    );
    assert!(summary.starts_with("# Agent Network Expansion Summary\n"));
    assert!(summary.contains("**Analyzed Directory**: /srv/agents"));
    assert!(summary.contains("**Model Used**: llama3:8b"));
    assert!(summary.contains("- **Accepted**: 0 agents"));
    assert!(!summary.contains("## Accepted Agents"));
    assert!(!summary.contains("## Rejected Agents"));
    assert!(!summary.contains("## Skipped Agents"));
}

#[test]
fn summary_sections_list_agents() {
    let mut decisions = Decisions::default();
    decisions
        .accepted
        .push(make_suggestion("Router", AgentType::Orchestration, Priority::Critical));
    decisions
        .rejected
        .push(make_suggestion("Linter", AgentType::Action, Priority::Low));
    decisions
        .skipped
        .push(make_suggestion("Scheduler", AgentType::Orchestration, Priority::Medium));

    let summary = render_summary(Path::new("."), "m", "t", &decisions);
    assert!(summary.contains("## Accepted Agents\n\n### Router\n- **Type**: orchestration"));
    assert!(summary.contains("- **Priority**: critical"));
    assert!(summary.contains("- **Linter** (action): Linter purpose"));
    assert!(summary.contains("### Scheduler"));
    assert!(summary.contains("- **Rationale**: Scheduler rationale"));
}

#[test]
fn analysis_report_wraps_model_output() {
    let body = render_analysis(
        Path::new("/srv/agents"),
        "llama3:8b",
        "2026-03-01 12:00:00",
        "## Executive Summary\nAll good.",
    );
    assert!(body.starts_with("# Multi-Agent Network Analysis\n\n"));
    assert!(body.contains("**Analysis Model**: llama3:8b"));
    assert!(body.contains("**Generated**: 2026-03-01 12:00:00"));
    assert!(body.ends_with("---\n\n## Executive Summary\nAll good."));
}

// ─── Batch splitting ─────────────────────────────────────────────────────────

#[test]
fn batch_split_names_and_classifies() {
    let response = "\
# Agent: Workflow Orchestrator

## Role
Coordinates the other agents.
---AGENT---
# Agent: Test Runner

## Role
Runs the test suite.
---AGENT---
";
    let prompts = split_batch_prompts(response);
    assert_eq!(prompts.len(), 2);

    assert_eq!(prompts[0].slug, "workflow-orchestrator");
    assert_eq!(prompts[0].agent_type, AgentType::Orchestration);
    assert!(prompts[0].content.starts_with("# Agent: Workflow Orchestrator"));

    assert_eq!(prompts[1].slug, "test-runner");
    assert_eq!(prompts[1].agent_type, AgentType::Action);
    assert!(prompts[1].content.ends_with("Runs the test suite."));
}

#[test]
fn batch_split_falls_back_to_position() {
    let response = "---AGENT---\nNo heading here.\n---AGENT---\n## Role\nAlso nameless.";
    let slugs: Vec<String> = split_batch_prompts(response)
        .into_iter()
        .map(|p| p.slug)
        .collect();
    // The leading empty chunk still counts as position 1
    assert_eq!(slugs, vec!["agent-2", "agent-3"]);
}

#[test]
fn batch_split_accepts_name_variants() {
    for (line, slug) in [
        ("Agent: Planner", "planner"),
        ("## Agent Planner", "planner"),
        ("# AGENT: **Release Manager**", "release-manager"),
        ("**Agent:** Router", "router"),
        ("**Agent Name**: Data Cleaner", "data-cleaner"),
        ("# Agent Name Resolver", "name-resolver"),
    ] {
        let prompts = split_batch_prompts(&format!("{line}\nbody"));
        assert_eq!(prompts[0].slug, slug, "line {line:?}");
    }
}

#[test]
fn batch_split_only_looks_at_first_lines() {
    let prompts = split_batch_prompts("intro\nmore\neven more\n# Agent: Late Name");
    assert_eq!(prompts[0].slug, "agent-1");
}

#[test]
fn batch_split_of_empty_response_is_empty() {
    assert!(split_batch_prompts("").is_empty());
    assert!(split_batch_prompts("  \n---AGENT---\n  ").is_empty());
}

// ─── Writing ─────────────────────────────────────────────────────────────────

#[test]
fn agent_prompt_lands_in_type_directory() {
    let dir = TempDir::new().unwrap();
    let writer = ReportWriter::new(dir.path().join("findings"), "m");

    let router = make_suggestion("Task Router", AgentType::Orchestration, Priority::High);
    let path = writer.write_agent_prompt(&router, "body").unwrap();
    assert_eq!(
        path,
        dir.path()
            .join("findings/system-prompts/orchestration/task-router.md")
    );

    let tester = make_suggestion("QA Tester", AgentType::Action, Priority::Low);
    let path = writer.write_agent_prompt(&tester, "body").unwrap();
    assert_eq!(
        path,
        dir.path().join("findings/system-prompts/action/qa-tester.md")
    );

    let written = fs::read_to_string(path).unwrap();
    assert!(written.starts_with("# QA Tester\n\n**Type**: Action\n**Priority**: Low\n"));
    assert!(written.ends_with("---\n\nbody"));
}

#[test]
fn summary_and_analysis_land_in_findings() {
    let dir = TempDir::new().unwrap();
    let writer = ReportWriter::new(dir.path().join("out"), "m");

    let summary = writer
        .write_summary(Path::new("/srv"), &Decisions::default())
        .unwrap();
    assert_eq!(summary, dir.path().join("out").join(SUMMARY_FILE));
    assert!(summary.is_file());

    let analysis = writer.write_analysis(Path::new("/srv"), "text").unwrap();
    assert_eq!(analysis, dir.path().join("out").join(ANALYSIS_FILE));
    assert!(fs::read_to_string(analysis).unwrap().ends_with("text"));
}

#[test]
fn rewriting_replaces_previous_file() {
    let dir = TempDir::new().unwrap();
    let writer = ReportWriter::new(dir.path(), "m");
    let agent = make_suggestion("Router", AgentType::Action, Priority::High);

    writer.write_agent_prompt(&agent, "first").unwrap();
    let path = writer.write_agent_prompt(&agent, "second").unwrap();
    let content = fs::read_to_string(path).unwrap();
    assert!(content.ends_with("second"));
    assert!(!content.contains("first"));
}

#[test]
fn batch_prompts_are_written_per_agent() {
    let dir = TempDir::new().unwrap();
    let writer = ReportWriter::new(dir.path(), "m");

    let written = writer
        .write_batch_prompts("# Agent: Router\nroutes work\n---AGENT---\n# Agent: Linter\nlints")
        .unwrap();
    assert_eq!(
        written,
        vec![
            dir.path().join("system-prompts/orchestration/router.md"),
            dir.path().join("system-prompts/action/linter.md"),
        ]
    );
    assert_eq!(
        fs::read_to_string(&written[1]).unwrap(),
        "# Agent: Linter\nlints"
    );
}

#[test]
fn unwritable_findings_dir_is_reported() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let writer = ReportWriter::new(blocker.clone(), "m");
    let result = writer.write_summary(Path::new("."), &Decisions::default());
    match result {
        Err(Error::Write { path, .. }) => assert_eq!(path, blocker),
        other => panic!("expected Write error, got: {other:?}"),
    }
}
