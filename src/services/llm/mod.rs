// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub mod ollama;

use crate::config::GenerationConfig;
use crate::error::Result;

/// Sampling options for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    pub num_predict: u32,
}

impl GenerateOptions {
    pub fn suggestions(g: &GenerationConfig) -> Self {
        Self {
            temperature: g.temperature,
            top_p: Some(g.top_p),
            num_predict: g.suggestions_num_predict,
        }
    }

    pub fn analysis(g: &GenerationConfig) -> Self {
        Self {
            temperature: g.temperature,
            top_p: Some(g.top_p),
            num_predict: g.analysis_num_predict,
        }
    }

    /// Per-agent and batch system prompts leave top_p at the model default
    pub fn agent_prompt(g: &GenerationConfig) -> Self {
        Self {
            temperature: g.temperature,
            top_p: None,
            num_predict: g.agent_prompt_num_predict,
        }
    }

    pub fn batch_prompts(g: &GenerationConfig) -> Self {
        Self {
            temperature: g.temperature,
            top_p: None,
            num_predict: g.batch_prompts_num_predict,
        }
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate with streaming tokens and cancellation support
    async fn generate(
        &self,
        prompt: &str,
        options: GenerateOptions,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String>;

    fn name(&self) -> &str;
}
