// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Directory not found: {}", path.display())]
    #[diagnostic(
        code(agentscout::input::not_found),
        help("Pass an existing directory, or omit it to analyze the current one")
    )]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    #[diagnostic(code(agentscout::input::not_a_directory))]
    NotADirectory { path: PathBuf },

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Cannot connect to Ollama at {host}")]
    #[diagnostic(
        code(agentscout::ollama::not_running),
        help("Start Ollama with: ollama serve")
    )]
    OllamaNotRunning { host: String },

    #[error("Model '{model}' not found. Available: {}", available.join(", "))]
    #[diagnostic(
        code(agentscout::ollama::model_not_found),
        help("Pull the model with: ollama pull {model}")
    )]
    ModelNotFound {
        model: String,
        available: Vec<String>,
    },

    #[error("Provider '{provider}' error: {message}")]
    #[diagnostic(code(agentscout::provider::error))]
    Provider { provider: String, message: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    #[diagnostic(
        code(agentscout::discovery::pattern),
        help("Check the [discovery] patterns in your config")
    )]
    InvalidPattern { pattern: String, message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(agentscout::config::error))]
    Config(String),

    #[error("Failed to write {}: {source}", path.display())]
    #[diagnostic(
        code(agentscout::report::write),
        help("Check that the findings directory is writable")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

// Raw-mode terminals report Ctrl+C as an interrupted read
impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        match e {
            dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                Error::Cancelled
            }
            other => Error::Dialog(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
