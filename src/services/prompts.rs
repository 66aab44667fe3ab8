// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::GenerationConfig;
use crate::domain::{AgentSuggestion, Decision, agent_prompt_request};
use crate::error::{Error, Result};
use crate::services::llm::{GenerateOptions, LlmProvider};
use crate::services::report::{ReportWriter, failed_prompt_placeholder};
use crate::services::review::ReviewHandler;

/// Spinner on stderr; hidden automatically when stderr is not a terminal
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Generate without streaming tokens anywhere
pub async fn generate_quiet<P: LlmProvider>(
    provider: &P,
    prompt: &str,
    options: GenerateOptions,
    cancel: CancellationToken,
) -> Result<String> {
    // Receiver dropped up front: token sends fail fast instead of blocking
    let (tx, _) = mpsc::channel::<String>(1);
    provider.generate(prompt, options, tx, cancel).await
}

/// Generates and saves a system prompt for every accepted suggestion
pub struct SystemPromptHandler<'a, P> {
    provider: &'a P,
    writer: &'a ReportWriter,
    options: GenerateOptions,
    cancel: CancellationToken,
    written: Vec<PathBuf>,
}

impl<'a, P: LlmProvider> SystemPromptHandler<'a, P> {
    pub fn new(
        provider: &'a P,
        writer: &'a ReportWriter,
        generation: &GenerationConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            provider,
            writer,
            options: GenerateOptions::agent_prompt(generation),
            cancel,
            written: Vec::new(),
        }
    }

    /// Prompt files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

#[async_trait]
impl<P: LlmProvider> ReviewHandler for SystemPromptHandler<'_, P> {
    async fn on_accept(&mut self, suggestion: &AgentSuggestion) -> Result<()> {
        eprintln!(
            "\n{} Accepting {}...",
            style("✓").green().bold(),
            suggestion.name
        );

        let bar = spinner(format!("Generating system prompt for {}...", suggestion.name));
        let request = agent_prompt_request(suggestion);
        let result =
            generate_quiet(self.provider, &request, self.options, self.cancel.clone()).await;
        bar.finish_and_clear();

        let content = match result {
            Ok(text) => text,
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                warn!(
                    agent = %suggestion.name,
                    error = %e,
                    "system prompt generation failed, writing placeholder"
                );
                failed_prompt_placeholder(suggestion, &e.to_string())
            }
        };

        let path = self.writer.write_agent_prompt(suggestion, &content)?;
        eprintln!("   Saved to: {}", path.display());
        self.written.push(path);
        Ok(())
    }

    fn on_decision(
        &mut self,
        suggestion: &AgentSuggestion,
        decision: Decision,
        position: usize,
        total: usize,
    ) {
        match decision {
            Decision::Accept => {}
            Decision::Reject => {
                eprintln!("\n{} Rejecting {}", style("✗").red().bold(), suggestion.name);
            }
            Decision::Skip => {
                eprintln!(
                    "\n{} Skipping {} (will include in summary)",
                    style("→").yellow(),
                    suggestion.name
                );
            }
            Decision::Stop => {
                eprintln!("\n{} Stopping review process", style("■").red().bold());
                eprintln!("   Reviewed {position} of {total} suggestions");
            }
        }
    }
}
