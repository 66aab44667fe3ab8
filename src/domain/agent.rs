// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Role of an agent within the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentType {
    /// Coordinates workflows, manages priorities, routes tasks
    Orchestration,
    /// Performs a specific task
    Action,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orchestration => "orchestration",
            Self::Action => "action",
        }
    }

    /// Directory name under `system-prompts/`
    pub fn dir_name(&self) -> &'static str {
        self.as_str()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Orchestration => "Orchestration",
            Self::Action => "Action",
        }
    }
}

// Anything that isn't an orchestrator is filed with the action agents
impl From<String> for AgentType {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("orchestration") {
            Self::Orchestration
        } else {
            Self::Action
        }
    }
}

impl From<AgentType> for String {
    fn from(t: AgentType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    /// Label the model made up; kept verbatim
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Other(s) => s,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_agent_type() -> AgentType {
    AgentType::Action
}

/// A candidate agent proposed by the model.
///
/// Models are loose with JSON types, so every field accepts strings, numbers,
/// lists and null and is coerced to the expected shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSuggestion {
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(
        rename = "type",
        default = "default_agent_type",
        deserialize_with = "lenient_agent_type"
    )]
    pub agent_type: AgentType,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "lenient_text")]
    pub purpose: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rationale: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub interfaces: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: String,
}

/// Null is empty, lists are joined with `, `, other scalars are printed as JSON
fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(value_to_text)
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(value_to_text).collect(),
        // A bare string is one responsibility
        other => vec![value_to_text(other)],
    };
    Ok(items.into_iter().filter(|s| !s.trim().is_empty()).collect())
}

fn lenient_agent_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<AgentType, D::Error> {
    lenient_text(deserializer).map(AgentType::from)
}

fn lenient_priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Priority, D::Error> {
    lenient_text(deserializer).map(Priority::from)
}

impl AgentSuggestion {
    /// File stem for this agent's system prompt
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Lowercase, spaces and underscores become `-`, only alphanumerics and `-` survive.
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();

    if slug.is_empty() {
        "agent".to_string()
    } else {
        slug
    }
}

/// First character uppercased, rest lowercased
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
