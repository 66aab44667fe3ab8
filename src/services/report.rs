// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;
use tracing::debug;

use crate::domain::{
    AGENT_SEPARATOR, AgentSuggestion, AgentType, Decisions, capitalize, slugify,
};
use crate::error::{Error, Result};

pub const SUMMARY_FILE: &str = "analysis-summary.md";
pub const ANALYSIS_FILE: &str = "agent-network-analysis.md";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `Agent: Name`, `# Agent Name`, `**Agent:** Name` or `**Agent Name**: Name`
static AGENT_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*[#*_]*\s*agent\b[\s*_]*(?:name\b[\s*_]*:|:)?[\s*_]*(.+?)\s*$").unwrap()
});

const ORCHESTRATION_HINTS: &[&str] = &["orchestrat", "coordinat", "rout", "priorit"];

/// One system prompt cut out of a batch response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPrompt {
    pub slug: String,
    pub agent_type: AgentType,
    pub content: String,
}

/// Writes everything under the findings directory
pub struct ReportWriter {
    findings_dir: PathBuf,
    model: String,
}

impl ReportWriter {
    pub fn new(findings_dir: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            findings_dir: findings_dir.into(),
            model: model.into(),
        }
    }

    pub fn findings_dir(&self) -> &Path {
        &self.findings_dir
    }

    pub fn system_prompts_dir(&self) -> PathBuf {
        self.findings_dir.join("system-prompts")
    }

    pub fn prompt_dir(&self, agent_type: AgentType) -> PathBuf {
        self.system_prompts_dir().join(agent_type.dir_name())
    }

    /// Write one accepted agent's system prompt, returning its path
    pub fn write_agent_prompt(&self, agent: &AgentSuggestion, content: &str) -> Result<PathBuf> {
        let dir = self.prompt_dir(agent.agent_type);
        create_dir(&dir)?;

        let path = dir.join(format!("{}.md", agent.slug()));
        let body = render_agent_prompt(agent, content, &timestamp());
        write_file(&path, &body)?;

        debug!(agent = %agent.name, path = %path.display(), "system prompt written");
        Ok(path)
    }

    pub fn write_summary(&self, directory: &Path, decisions: &Decisions) -> Result<PathBuf> {
        create_dir(&self.findings_dir)?;

        let path = self.findings_dir.join(SUMMARY_FILE);
        let body = render_summary(directory, &self.model, &timestamp(), decisions);
        write_file(&path, &body)?;
        Ok(path)
    }

    pub fn write_analysis(&self, directory: &Path, analysis: &str) -> Result<PathBuf> {
        create_dir(&self.findings_dir)?;

        let path = self.findings_dir.join(ANALYSIS_FILE);
        let body = render_analysis(directory, &self.model, &timestamp(), analysis);
        write_file(&path, &body)?;
        Ok(path)
    }

    /// Split a batch response into per-agent files
    pub fn write_batch_prompts(&self, response: &str) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for prompt in split_batch_prompts(response) {
            let dir = self.prompt_dir(prompt.agent_type);
            create_dir(&dir)?;

            let path = dir.join(format!("{}.md", prompt.slug));
            write_file(&path, &prompt.content)?;
            written.push(path);
        }

        Ok(written)
    }
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Write {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn render_agent_prompt(agent: &AgentSuggestion, content: &str, generated_at: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", agent.name);
    let _ = writeln!(out, "**Type**: {}", agent.agent_type.label());
    let _ = writeln!(out, "**Priority**: {}", capitalize(agent.priority.as_str()));
    let _ = writeln!(out, "**Generated**: {generated_at}\n");
    out.push_str("---\n\n");
    out.push_str(content);
    out
}

/// Stand-in for a system prompt whose generation failed
pub fn failed_prompt_placeholder(agent: &AgentSuggestion, reason: &str) -> String {
    format!("# {}\n\nError generating prompt: {reason}", agent.name)
}

pub fn render_summary(
    directory: &Path,
    model: &str,
    generated_at: &str,
    decisions: &Decisions,
) -> String {
    let mut out = String::from("# Agent Network Expansion Summary\n\n");
    let _ = writeln!(out, "**Analyzed Directory**: {}", directory.display());
    let _ = writeln!(out, "**Analysis Date**: {generated_at}");
    let _ = writeln!(out, "**Model Used**: {model}\n");
    out.push_str("---\n\n");

    out.push_str("## Summary\n\n");
    let _ = writeln!(out, "- **Accepted**: {} agents", decisions.accepted.len());
    let _ = writeln!(out, "- **Rejected**: {} agents", decisions.rejected.len());
    let _ = writeln!(out, "- **Skipped**: {} agents\n", decisions.skipped.len());

    if !decisions.accepted.is_empty() {
        out.push_str("## Accepted Agents\n\n");
        for agent in &decisions.accepted {
            let _ = writeln!(out, "### {}", agent.name);
            let _ = writeln!(out, "- **Type**: {}", agent.agent_type);
            let _ = writeln!(out, "- **Priority**: {}", agent.priority);
            let _ = writeln!(out, "- **Purpose**: {}\n", agent.purpose);
        }
    }

    if !decisions.rejected.is_empty() {
        out.push_str("## Rejected Agents\n\n");
        for agent in &decisions.rejected {
            let _ = writeln!(
                out,
                "- **{}** ({}): {}",
                agent.name, agent.agent_type, agent.purpose
            );
        }
        out.push('\n');
    }

    if !decisions.skipped.is_empty() {
        out.push_str("## Skipped Agents (Review Later)\n\n");
        for agent in &decisions.skipped {
            let _ = writeln!(out, "### {}", agent.name);
            let _ = writeln!(out, "- **Type**: {}", agent.agent_type);
            let _ = writeln!(out, "- **Priority**: {}", agent.priority);
            let _ = writeln!(out, "- **Purpose**: {}", agent.purpose);
            let _ = writeln!(out, "- **Rationale**: {}\n", agent.rationale);
        }
    }

    out
}

pub fn render_analysis(directory: &Path, model: &str, generated_at: &str, analysis: &str) -> String {
    let mut out = String::from("# Multi-Agent Network Analysis\n\n");
    let _ = writeln!(out, "**Analyzed Directory**: {}", directory.display());
    let _ = writeln!(out, "**Analysis Model**: {model}");
    let _ = writeln!(out, "**Generated**: {generated_at}\n");
    out.push_str("---\n\n");
    out.push_str(analysis);
    out
}

/// Cut a batch response at the separator. Empty chunks are dropped but still
/// count towards the `agent-<n>` fallback names.
pub fn split_batch_prompts(response: &str) -> Vec<BatchPrompt> {
    response
        .split(AGENT_SEPARATOR)
        .enumerate()
        .filter_map(|(i, chunk)| {
            let content = chunk.trim();
            if content.is_empty() {
                return None;
            }

            let slug = content
                .lines()
                .take(3)
                .find_map(extract_agent_name)
                .map(|name| slugify(&name))
                .unwrap_or_else(|| format!("agent-{}", i + 1));

            Some(BatchPrompt {
                slug,
                agent_type: classify(content),
                content: content.to_string(),
            })
        })
        .collect()
}

fn extract_agent_name(line: &str) -> Option<String> {
    let name = AGENT_NAME_REGEX.captures(line)?.get(1)?.as_str();
    let name = name.trim_matches(|c: char| matches!(c, '*' | '_' | '`') || c.is_whitespace());
    (!name.is_empty()).then(|| name.to_string())
}

fn classify(content: &str) -> AgentType {
    let lower = content.to_lowercase();
    if ORCHESTRATION_HINTS.iter().any(|hint| lower.contains(hint)) {
        AgentType::Orchestration
    } else {
        AgentType::Action
    }
}
