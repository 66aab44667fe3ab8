// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::Path;

use agentscout::domain::{AgentSuggestion, AgentType, Priority};

/// Create a suggestion with every text field filled in
#[allow(dead_code)]
pub fn make_suggestion(name: &str, agent_type: AgentType, priority: Priority) -> AgentSuggestion {
    AgentSuggestion {
        name: name.to_string(),
        agent_type,
        priority,
        purpose: format!("{name} purpose"),
        rationale: format!("{name} rationale"),
        responsibilities: vec!["first duty".into(), "second duty".into()],
        interfaces: "planner, executor".into(),
        value: format!("{name} value"),
    }
}

/// Write `content` to `root/rel`, creating parent directories
#[allow(dead_code)]
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// JSON array in the shape the suggestions prompt asks for
#[allow(dead_code)]
pub fn suggestions_json(names: &[&str]) -> String {
    let items: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({
                "name": name,
                "type": if i % 2 == 0 { "orchestration" } else { "action" },
                "priority": "high",
                "purpose": format!("{name} purpose"),
                "rationale": format!("{name} rationale"),
                "responsibilities": ["a", "b"],
                "interfaces": "existing agents",
                "value": "faster delivery"
            })
        })
        .collect();
    serde_json::to_string_pretty(&items).unwrap()
}
