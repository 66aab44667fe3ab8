// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agentscout")]
#[command(version)]
#[command(
    about = "Suggest complementary agents for a multi-agent network using a local LLM",
    long_about = None
)]
pub struct Cli {
    /// Ollama model name
    #[arg(short, long, global = true, env = "AGENTSCOUT_MODEL")]
    pub model: Option<String>,

    /// Findings directory (default: ./findings)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Show the prompt sent to the LLM
    #[arg(long, global = true)]
    pub show_prompt: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Analyze the agent network and write a Markdown report
    Analyze {
        /// Directory containing agent configuration
        #[arg(default_value = ".")]
        directory: PathBuf,

        /// Generate system prompts without asking
        #[arg(short, long)]
        prompts: bool,
    },
    /// Review suggested agents one at a time
    Review {
        /// Directory containing agent configuration
        #[arg(default_value = ".")]
        directory: PathBuf,
    },
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Check Ollama connectivity and model availability
    Doctor,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
