// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Write;
use std::path::Path;

use crate::config::DiscoveryConfig;
use crate::domain::{AgentInventory, FileKind, NetworkContext};

pub struct ContextBuilder;

impl ContextBuilder {
    pub fn build(inventory: &AgentInventory, config: &DiscoveryConfig) -> NetworkContext {
        let mut out = String::new();

        // write! into a String cannot fail
        let _ = writeln!(out, "# Agent Network Analysis Context\n");
        let _ = writeln!(out, "**Directory**: {}\n", inventory.root.display());
        let _ = writeln!(
            out,
            "**Total agent-related files found**: {}\n",
            inventory.len()
        );

        out.push_str(&Self::format_inventory(inventory, config.inventory_per_kind));

        let (samples, sample_count) = Self::format_samples(inventory, config);
        out.push_str(&samples);

        NetworkContext {
            file_count: inventory.len(),
            sample_count,
            markdown: out,
        }
    }

    fn format_inventory(inventory: &AgentInventory, per_kind: usize) -> String {
        let mut out = String::from("## File Inventory\n\n");

        for kind in FileKind::ALL {
            let total = inventory.count(kind);
            if total == 0 {
                continue;
            }

            let _ = writeln!(
                out,
                "### {} Files ({})",
                kind.as_str().to_uppercase(),
                total
            );
            for file in inventory.of_kind(kind).take(per_kind) {
                let _ = writeln!(out, "- `{}`", display_rel(&file.path));
            }
            if total > per_kind {
                let _ = writeln!(out, "- ... and {} more", total - per_kind);
            }
            out.push('\n');
        }

        out
    }

    fn format_samples(inventory: &AgentInventory, config: &DiscoveryConfig) -> (String, usize) {
        let mut out = String::from("## Sample File Contents\n\n");
        let mut count = 0;

        'kinds: for kind in FileKind::ALL {
            for file in inventory.of_kind(kind).take(config.samples_per_kind) {
                if count >= config.max_samples {
                    break 'kinds;
                }

                let content = read_file_safe(&inventory.absolute(file), config.max_file_bytes);
                let excerpt: String = content.chars().take(config.sample_chars).collect();

                let _ = writeln!(out, "### File: `{}`\n", display_rel(&file.path));
                let _ = writeln!(out, "```{}\n{}\n```\n", kind.as_str(), excerpt);
                count += 1;
            }
        }

        (out, count)
    }
}

/// Read a file for the prompt, or a placeholder when it is too large or unreadable.
pub fn read_file_safe(path: &Path, max_bytes: u64) -> String {
    let size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => return format!("[Error reading file: {e}]"),
    };

    if size > max_bytes {
        return format!("[File too large: {size} bytes]");
    }

    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => format!("[Error reading file: {e}]"),
    }
}

fn display_rel(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
