// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use url::Url;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::services::discovery::AgentDiscovery;

/// Which files count as agent configuration and how much of them reaches the prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Glob patterns matched anywhere in the tree (`*` does not cross `/`)
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    /// Glob patterns for paths that are never collected
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Files above this size are replaced by a placeholder (default: 100000)
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Characters of each sample included in the prompt (default: 2000)
    #[serde(default = "default_sample_chars")]
    pub sample_chars: usize,

    /// Total sample files included in the prompt (default: 5)
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,

    /// Sample files per file kind (default: 2)
    #[serde(default = "default_samples_per_kind")]
    pub samples_per_kind: usize,

    /// Paths listed per file kind in the inventory (default: 10)
    #[serde(default = "default_inventory_per_kind")]
    pub inventory_per_kind: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            exclude: default_exclude(),
            max_file_bytes: default_max_file_bytes(),
            sample_chars: default_sample_chars(),
            max_samples: default_max_samples(),
            samples_per_kind: default_samples_per_kind(),
            inventory_per_kind: default_inventory_per_kind(),
        }
    }
}

fn default_patterns() -> Vec<String> {
    [
        "*agent*.json",
        "*agent*.yaml",
        "*agent*.yml",
        "*.agent.*",
        "*prompt*.md",
        "*system*.md",
        "agents/**/*",
        "prompts/**/*",
        ".claude/**/*",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_exclude() -> Vec<String> {
    ["findings/**", ".git/**", "target/**", "node_modules/**"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_file_bytes() -> u64 {
    100_000
}
fn default_sample_chars() -> usize {
    2_000
}
fn default_max_samples() -> usize {
    5
}
fn default_samples_per_kind() -> usize {
    2
}
fn default_inventory_per_kind() -> usize {
    10
}

/// Sampling options sent with every Ollama request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// LLM temperature (0.0-2.0, default 0.7)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling (0.0-1.0, default 0.9)
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Token budget for the JSON suggestion list
    #[serde(default = "default_suggestions_num_predict")]
    pub suggestions_num_predict: u32,

    /// Token budget for the Markdown network analysis
    #[serde(default = "default_analysis_num_predict")]
    pub analysis_num_predict: u32,

    /// Token budget for one accepted agent's system prompt
    #[serde(default = "default_agent_prompt_num_predict")]
    pub agent_prompt_num_predict: u32,

    /// Token budget for all system prompts generated from an analysis
    #[serde(default = "default_batch_prompts_num_predict")]
    pub batch_prompts_num_predict: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            suggestions_num_predict: default_suggestions_num_predict(),
            analysis_num_predict: default_analysis_num_predict(),
            agent_prompt_num_predict: default_agent_prompt_num_predict(),
            batch_prompts_num_predict: default_batch_prompts_num_predict(),
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}
fn default_top_p() -> f32 {
    0.9
}
fn default_suggestions_num_predict() -> u32 {
    3_000
}
fn default_analysis_num_predict() -> u32 {
    4_000
}
fn default_agent_prompt_num_predict() -> u32 {
    2_000
}
fn default_batch_prompts_num_predict() -> u32 {
    8_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_ollama_host")]
    pub ollama_host: String,

    /// Request timeout in seconds (default 600, local models are slow)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where reports and generated system prompts are written
    #[serde(default = "default_findings_dir")]
    pub findings_dir: PathBuf,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_model() -> String {
    "qwen2.5:14b-instruct-q5_K_M".into()
}
fn default_ollama_host() -> String {
    "http://localhost:11434".into()
}
fn default_timeout_secs() -> u64 {
    600
}
fn default_findings_dir() -> PathBuf {
    PathBuf::from("findings")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            ollama_host: default_ollama_host(),
            timeout_secs: default_timeout_secs(),
            findings_dir: default_findings_dir(),
            discovery: DiscoveryConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.agentscout.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".agentscout.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        // User-level config
        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // Environment variables (AGENTSCOUT_MODEL, AGENTSCOUT_OLLAMA_HOST, etc.)
        // Use __ separator for nested keys (e.g., AGENTSCOUT_GENERATION__TEMPERATURE)
        figment = figment.merge(Env::prefixed("AGENTSCOUT_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // CLI overrides (highest priority)
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "agentscout").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref m) = cli.model {
            self.model = m.clone();
        }
        if let Some(ref dir) = cli.output {
            self.findings_dir = dir.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::Config("model cannot be empty".into()));
        }

        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–3600, got {}",
                self.timeout_secs
            )));
        }

        if self.findings_dir.as_os_str().is_empty() {
            return Err(Error::Config("findings_dir cannot be empty".into()));
        }

        if self.ollama_host.is_empty() {
            return Err(Error::Config("ollama_host cannot be empty".into()));
        }

        let host = Url::parse(&self.ollama_host).map_err(|e| {
            Error::Config(format!("ollama_host '{}' is not a URL: {e}", self.ollama_host))
        })?;
        if !matches!(host.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "ollama_host must start with http:// or https://, got '{}'",
                self.ollama_host
            )));
        }
        if !is_loopback(&host) {
            warn!(
                host = %self.ollama_host,
                "ollama_host is not a loopback address; agent configs will leave this machine"
            );
        }

        self.validate_discovery()?;
        self.validate_generation()
    }

    fn validate_discovery(&self) -> Result<()> {
        let d = &self.discovery;

        if d.patterns.is_empty() {
            return Err(Error::Config(
                "discovery.patterns must list at least one pattern".into(),
            ));
        }

        // Surface bad globs before any connection is made
        AgentDiscovery::new(d).map_err(|e| Error::Config(format!("discovery: {e}")))?;

        if !(1..=10_000_000).contains(&d.max_file_bytes) {
            return Err(Error::Config(format!(
                "discovery.max_file_bytes must be 1–10000000, got {}",
                d.max_file_bytes
            )));
        }

        if !(100..=100_000).contains(&d.sample_chars) {
            return Err(Error::Config(format!(
                "discovery.sample_chars must be 100–100000, got {}",
                d.sample_chars
            )));
        }

        for (key, value, max) in [
            ("max_samples", d.max_samples, 50),
            ("samples_per_kind", d.samples_per_kind, 50),
            ("inventory_per_kind", d.inventory_per_kind, 1_000),
        ] {
            if !(1..=max).contains(&value) {
                return Err(Error::Config(format!(
                    "discovery.{key} must be 1–{max}, got {value}"
                )));
            }
        }

        Ok(())
    }

    fn validate_generation(&self) -> Result<()> {
        let g = &self.generation;

        if !(0.0..=2.0).contains(&g.temperature) {
            return Err(Error::Config(format!(
                "generation.temperature must be 0.0–2.0, got {}",
                g.temperature
            )));
        }

        if !(0.0..=1.0).contains(&g.top_p) {
            return Err(Error::Config(format!(
                "generation.top_p must be 0.0–1.0, got {}",
                g.top_p
            )));
        }

        for (key, value) in [
            ("suggestions_num_predict", g.suggestions_num_predict),
            ("analysis_num_predict", g.analysis_num_predict),
            ("agent_prompt_num_predict", g.agent_prompt_num_predict),
            ("batch_prompts_num_predict", g.batch_prompts_num_predict),
        ] {
            if value == 0 {
                return Err(Error::Config(format!(
                    "generation.{key} must be greater than 0"
                )));
            }
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# agentscout configuration

# Model name (use `ollama list` to see available)
model = "qwen2.5:14b-instruct-q5_K_M"

# Ollama server URL
ollama_host = "http://localhost:11434"

# Request timeout in seconds
timeout_secs = 600

# Where reports and generated system prompts are written
findings_dir = "findings"

[discovery]
# Glob patterns matched anywhere below the analyzed directory
# patterns = ["*agent*.json", "*agent*.yaml", "*prompt*.md", "agents/**/*"]

# Paths that are never collected
# exclude = ["findings/**", ".git/**", "target/**", "node_modules/**"]

# Files larger than this are summarized as "[File too large: N bytes]"
max_file_bytes = 100000

# Characters of each sample file included in the prompt
sample_chars = 2000

# Sample files included in the prompt (total / per file kind)
max_samples = 5
samples_per_kind = 2

[generation]
temperature = 0.7
top_p = 0.9

# Token budgets per request kind
suggestions_num_predict = 3000
analysis_num_predict = 4000
agent_prompt_num_predict = 2000
batch_prompts_num_predict = 8000
"#;

        fs::write(&path, content)?;

        // Set secure permissions (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(d)) => d.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
