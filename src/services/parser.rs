// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use serde_json::Value;
use tracing::warn;

use crate::domain::AgentSuggestion;

pub struct SuggestionParser;

impl SuggestionParser {
    /// Parse the model's suggestion list. Never fails: anything unusable
    /// yields fewer (possibly zero) suggestions and a warning.
    pub fn parse(raw: &str) -> Vec<AgentSuggestion> {
        let Some(json) = Self::extract_array(raw) else {
            warn!(
                raw_len = raw.len(),
                "no JSON array found in model response"
            );
            return Vec::new();
        };

        let items: Vec<Value> = match serde_json::from_str(json) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    error = %e,
                    excerpt = %excerpt(raw, 500),
                    "model response is not a valid JSON array"
                );
                return Vec::new();
            }
        };

        items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match serde_json::from_value::<AgentSuggestion>(item) {
                Ok(suggestion) if !suggestion.name.trim().is_empty() => Some(suggestion),
                Ok(_) => {
                    warn!(index = i, "dropping suggestion without a name");
                    None
                }
                Err(e) => {
                    warn!(index = i, error = %e, "dropping malformed suggestion");
                    None
                }
            })
            .collect()
    }

    /// Slice from the first `[` to the last `]`, which also sees through
    /// code fences and chatty preambles.
    fn extract_array(raw: &str) -> Option<&str> {
        let start = raw.find('[')?;
        let end = raw.rfind(']')?;
        (end > start).then(|| &raw[start..=end])
    }
}

fn excerpt(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
