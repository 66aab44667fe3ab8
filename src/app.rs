// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use console::style;
use dialoguer::{Confirm, Select};
use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::domain::{NetworkContext, batch_prompts_request};
use crate::error::{Error, Result};
use crate::services::{
    context::ContextBuilder,
    discovery::AgentDiscovery,
    llm::{GenerateOptions, LlmProvider, ollama::OllamaProvider},
    parser::SuggestionParser,
    prompts::{SystemPromptHandler, generate_quiet, spinner},
    report::ReportWriter,
    review::{DialogReviewer, LineReviewer, ReviewOutcome, ReviewSession},
};

pub struct App {
    cli: Cli,
    config: Config,
    cancel_token: CancellationToken,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            model = %config.model,
            ollama_host = %config.ollama_host,
            findings_dir = %config.findings_dir.display(),
            "config loaded"
        );
        let cancel_token = CancellationToken::new();
        Ok(Self {
            cli,
            config,
            cancel_token,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup Ctrl+C handler with CancellationToken
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        });

        match &self.cli.command {
            Commands::Analyze { directory, prompts } => {
                self.run_analysis(directory, *prompts).await
            }
            Commands::Review { directory } => self.run_review(directory).await,
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                let rendered = toml::to_string_pretty(&self.config)
                    .map_err(|e| Error::Config(e.to_string()))?;
                print!("{rendered}");
                Ok(())
            }
            Commands::Doctor => self.run_doctor().await,
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "agentscout", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    // ─── Batch Analysis ───

    async fn run_analysis(&self, directory: &Path, generate_prompts: bool) -> Result<()> {
        self.print_banner("Multi-Agent Network Analyzer");
        let directory = resolve_directory(directory)?;
        self.print_info(&format!("Analyzing directory: {}", directory.display()));
        self.print_info(&format!("Using model: {}", self.config.model));

        let provider = self.connect().await?;

        let Some(context) = self.gather_context(&directory)? else {
            return Ok(());
        };

        self.print_status("Running analysis with Ollama (this may take a few minutes)...");
        let prompt = context.to_analysis_prompt();
        self.show_prompt("analysis", &prompt);

        let analysis = self
            .generate_streaming(
                &provider,
                &prompt,
                GenerateOptions::analysis(&self.config.generation),
            )
            .await?;

        if analysis.trim().is_empty() {
            warn!("empty analysis from model");
            self.print_warning("The model returned an empty analysis");
        }

        let writer = ReportWriter::new(&self.config.findings_dir, &self.config.model);
        self.print_status("Saving findings...");
        let report = writer.write_analysis(&directory, &analysis)?;
        self.print_info(&format!("Saved to: {}", report.display()));

        if generate_prompts || self.offer_system_prompts()? {
            self.generate_batch_prompts(&provider, &writer, &analysis)
                .await?;
        }

        self.print_banner("Analysis complete!");
        eprintln!("Review findings at: {}", report.display());
        eprintln!("Findings directory: {}", absolute(writer.findings_dir()).display());
        Ok(())
    }

    fn offer_system_prompts(&self) -> Result<bool> {
        if !is_interactive() {
            self.print_info("Run again with --prompts to generate system prompts");
            return Ok(false);
        }

        eprintln!();
        let items = vec![
            "Yes, generate all prompts",
            "No, just the analysis is fine",
            "Let me review first, I'll run again later",
        ];
        let choice = Select::new()
            .with_prompt("Generate system prompts for the recommended agents?")
            .items(&items)
            .default(0)
            .interact()?;

        Ok(choice == 0)
    }

    async fn generate_batch_prompts(
        &self,
        provider: &OllamaProvider,
        writer: &ReportWriter,
        analysis: &str,
    ) -> Result<()> {
        let request = batch_prompts_request(analysis);
        self.show_prompt("system prompts", &request);

        let bar = spinner("Generating system prompts...");
        let result = generate_quiet(
            provider,
            &request,
            GenerateOptions::batch_prompts(&self.config.generation),
            self.cancel_token.clone(),
        )
        .await;
        bar.finish_and_clear();

        // A failed prompt pass keeps the analysis that was already written
        let response = match result {
            Ok(text) => text,
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                warn!(error = %e, "system prompt generation failed");
                self.print_warning(&format!("Error generating system prompts: {e}"));
                return Ok(());
            }
        };

        let written = writer.write_batch_prompts(&response)?;
        if written.is_empty() {
            self.print_warning("No system prompts found in the model response");
            return Ok(());
        }

        for path in &written {
            let shown = path.strip_prefix(writer.findings_dir()).unwrap_or(path);
            eprintln!("  Generated: {}", shown.display());
        }
        self.print_info(&format!(
            "System prompts saved to: {}",
            writer.system_prompts_dir().display()
        ));
        Ok(())
    }

    // ─── Iterative Review ───

    async fn run_review(&self, directory: &Path) -> Result<()> {
        self.print_banner("Multi-Agent Network Analyzer (Iterative Mode)");
        let directory = resolve_directory(directory)?;
        self.print_info(&format!("Analyzing: {}", directory.display()));
        self.print_info(&format!("Model: {}", self.config.model));

        let provider = self.connect().await?;

        let Some(context) = self.gather_context(&directory)? else {
            return Ok(());
        };

        self.print_status("Generating agent suggestions...");
        let prompt = context.to_suggestions_prompt();
        self.show_prompt("suggestions", &prompt);

        let bar = spinner(format!("Analyzing with {}...", self.config.model));
        let raw = generate_quiet(
            &provider,
            &prompt,
            GenerateOptions::suggestions(&self.config.generation),
            self.cancel_token.clone(),
        )
        .await;
        bar.finish_and_clear();
        let raw = raw?;

        let suggestions = SuggestionParser::parse(&raw);
        if suggestions.is_empty() {
            self.print_warning("Could not generate suggestions. Check model availability.");
            return Ok(());
        }
        self.print_info(&format!("Generated {} suggestions", suggestions.len()));

        self.print_banner("Beginning Interactive Review");

        let writer = ReportWriter::new(&self.config.findings_dir, &self.config.model);
        let mut handler = SystemPromptHandler::new(
            &provider,
            &writer,
            &self.config.generation,
            self.cancel_token.clone(),
        );

        let outcome = if is_interactive() {
            ReviewSession::run(
                suggestions,
                &mut DialogReviewer,
                &mut handler,
                &self.cancel_token,
            )
            .await?
        } else {
            let stdin = std::io::BufReader::new(std::io::stdin());
            let mut reviewer = LineReviewer::new(stdin, std::io::stderr());
            ReviewSession::run(suggestions, &mut reviewer, &mut handler, &self.cancel_token)
                .await?
        };

        self.print_banner("Saving Summary");
        let summary = writer.write_summary(&directory, &outcome.decisions)?;
        self.print_info(&format!("Summary saved to: {}", summary.display()));

        self.print_review_stats(&outcome, &writer, &summary);
        Ok(())
    }

    fn print_review_stats(&self, outcome: &ReviewOutcome, writer: &ReportWriter, summary: &Path) {
        self.print_banner("Analysis Complete!");
        let d = &outcome.decisions;
        eprintln!("{} Accepted: {}", style("✓").green().bold(), d.accepted.len());
        eprintln!("{} Rejected: {}", style("✗").red().bold(), d.rejected.len());
        eprintln!("{} Skipped: {}", style("→").yellow(), d.skipped.len());

        if !d.accepted.is_empty() {
            eprintln!(
                "\nSystem prompts: {}",
                absolute(&writer.system_prompts_dir()).display()
            );
        }
        eprintln!("Full summary: {}", absolute(summary).display());
    }

    // ─── Shared Steps ───

    /// Reach Ollama and make sure the model is there. An unreachable server is fatal;
    /// a missing model may be overridden interactively.
    async fn connect(&self) -> Result<OllamaProvider> {
        let provider = OllamaProvider::new(&self.config);
        debug!(provider = provider.name(), host = provider.host(), "verifying provider");

        match provider.verify_model().await {
            Ok(()) => Ok(provider),
            Err(Error::ModelNotFound { model, available }) => {
                self.print_warning(&format!("Model '{model}' not found locally."));
                if !available.is_empty() {
                    eprintln!("  Available models: {}", available.join(", "));
                }
                eprintln!(
                    "  Pull with: {}",
                    style(format!("ollama pull {model}")).yellow()
                );

                if !is_interactive() {
                    return Err(Error::ModelNotFound { model, available });
                }

                let proceed = Confirm::new()
                    .with_prompt("Continue anyway?")
                    .default(false)
                    .interact()?;

                if proceed {
                    Ok(provider)
                } else {
                    Err(Error::ModelNotFound { model, available })
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Discover agent files and assemble the prompt context.
    /// `None` when nothing agent-related exists below `directory`.
    fn gather_context(&self, directory: &Path) -> Result<Option<NetworkContext>> {
        if self.cancel_token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        self.print_status("Discovering agent configuration files...");
        let discovery = AgentDiscovery::new(&self.config.discovery)?;
        let inventory = discovery.discover(directory)?;
        self.print_info(&format!("Found {} agent-related files", inventory.len()));

        if inventory.is_empty() {
            self.print_warning("No agent configuration files found.");
            eprintln!(
                "  Looking for: {}",
                self.config.discovery.patterns.join(", ")
            );
            return Ok(None);
        }

        self.print_status("Building analysis context...");
        let context = ContextBuilder::build(&inventory, &self.config.discovery);
        debug!(
            files = context.file_count,
            samples = context.sample_count,
            context_chars = context.markdown.len(),
            "context built"
        );

        Ok(Some(context))
    }

    async fn generate_streaming(
        &self,
        provider: &OllamaProvider,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String> {
        let (tx, mut rx) = mpsc::channel::<String>(64);
        let cancel_for_printer = self.cancel_token.clone();
        let print_handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel_for_printer.cancelled() => break,
                    token = rx.recv() => {
                        match token {
                            Some(t) => eprint!("{}", t),
                            None => break,
                        }
                    }
                }
            }
        });

        eprintln!();
        let result = provider
            .generate(prompt, options, tx, self.cancel_token.clone())
            .await;
        let _ = print_handle.await;
        eprintln!(); // Newline after streaming

        result
    }

    async fn run_doctor(&self) -> Result<()> {
        eprintln!("{} Running diagnostics...\n", style("→").cyan());

        eprintln!("{}", style("Configuration").bold().underlined());
        eprintln!("  Model:        {}", self.config.model);
        eprintln!("  Timeout:      {}s", self.config.timeout_secs);
        eprintln!("  Findings dir: {}", self.config.findings_dir.display());
        if let Some(ref path) = Config::config_path() {
            let status = if path.exists() { "found" } else { "not found" };
            eprintln!("  Config file:  {} ({})", path.display(), status);
        }
        eprintln!();

        eprintln!("{}", style("Provider Check").bold().underlined());
        eprint!("  Ollama ({}): ", self.config.ollama_host);
        let provider = OllamaProvider::new(&self.config);
        match provider.verify_model().await {
            Ok(()) => {
                eprintln!("{}", style("OK").green().bold());
                eprintln!(
                    "  Model '{}': {}",
                    self.config.model,
                    style("available").green()
                );
            }
            Err(Error::OllamaNotRunning { .. }) => {
                eprintln!("{}", style("NOT RUNNING").red().bold());
                eprintln!("  Start with: {}", style("ollama serve").yellow());
            }
            Err(Error::ModelNotFound { ref available, .. }) => {
                eprintln!("{}", style("connected").green());
                eprintln!(
                    "  Model '{}': {}",
                    self.config.model,
                    style("NOT FOUND").red().bold()
                );
                eprintln!(
                    "  Pull with: {}",
                    style(format!("ollama pull {}", self.config.model)).yellow()
                );
                if !available.is_empty() {
                    eprintln!("  Available: {}", available.join(", "));
                }
            }
            Err(e) => {
                eprintln!("{}: {}", style("ERROR").red().bold(), e);
            }
        }

        eprintln!();
        eprintln!("{} Diagnostics complete.", style("✓").green().bold());
        Ok(())
    }

    // ─── Output Helpers ───

    fn show_prompt(&self, label: &str, prompt: &str) {
        if self.cli.show_prompt {
            eprintln!("{}", style(format!("--- PROMPT ({label}) ---")).dim());
            eprintln!("{}", prompt);
            eprintln!("{}", style("--- END PROMPT ---").dim());
        }
    }

    fn print_banner(&self, title: &str) {
        let rule = "=".repeat(70);
        eprintln!("\n{}", style(&rule).dim());
        eprintln!("{}", style(title).bold());
        eprintln!("{}", style(&rule).dim());
    }

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }
}

/// Absolute form of the analyzed directory; must exist and be a directory.
pub fn resolve_directory(directory: &Path) -> Result<PathBuf> {
    if !directory.exists() {
        return Err(Error::DirectoryNotFound {
            path: absolute(directory),
        });
    }
    if !directory.is_dir() {
        return Err(Error::NotADirectory {
            path: absolute(directory),
        });
    }
    Ok(directory.canonicalize()?)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}
