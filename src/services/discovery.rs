// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::DiscoveryConfig;
use crate::domain::{AgentFile, AgentInventory, FileKind};
use crate::error::{Error, Result};

/// Finds agent configuration files below a directory
pub struct AgentDiscovery {
    include: GlobSet,
    exclude: GlobSet,
    /// Directories whose whole subtree is excluded (`dir/**` patterns)
    prune: GlobSet,
}

impl AgentDiscovery {
    pub fn new(config: &DiscoveryConfig) -> Result<Self> {
        let prune_dirs: Vec<String> = config
            .exclude
            .iter()
            .filter_map(|p| p.strip_suffix("/**"))
            .filter(|dir| !dir.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            include: Self::build_set(&config.patterns)?,
            exclude: Self::build_set(&config.exclude)?,
            prune: Self::build_set(&prune_dirs)?,
        })
    }

    /// Every pattern matches at any depth; `*` stays within one path segment.
    fn build_set(patterns: &[String]) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let anchored = if pattern.starts_with("**/") || pattern.starts_with('/') {
                pattern.trim_start_matches('/').to_string()
            } else {
                format!("**/{pattern}")
            };

            let glob = GlobBuilder::new(&anchored)
                .literal_separator(true)
                .build()
                .map_err(|e| Error::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            builder.add(glob);
        }

        builder.build().map_err(|e| Error::InvalidPattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })
    }

    /// Whether a root-relative path (forward slashes) would be collected
    pub fn matches(&self, rel_path: &str) -> bool {
        self.include.is_match(rel_path) && !self.exclude.is_match(rel_path)
    }

    /// Whether a root-relative directory is skipped without descending into it
    pub fn prunes(&self, rel_dir: &str) -> bool {
        self.prune.is_match(rel_dir)
    }

    pub fn discover(&self, root: &Path) -> Result<AgentInventory> {
        if !root.exists() {
            return Err(Error::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(Error::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        // BTreeSet dedupes files hit by several patterns and keeps a stable order
        let mut found: BTreeSet<PathBuf> = BTreeSet::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let Ok(rel) = entry.path().strip_prefix(root) else {
                    return true;
                };
                let rel_str = rel.to_string_lossy().replace('\\', "/");
                if self.prunes(&rel_str) {
                    debug!(dir = %rel_str, "pruning excluded directory");
                    return false;
                }
                true
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable path");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(rel) = entry.path().strip_prefix(root) else {
                continue;
            };
            let rel_str = rel.to_string_lossy().replace('\\', "/");

            if self.matches(&rel_str) {
                found.insert(rel.to_path_buf());
            }
        }

        let mut inventory = AgentInventory::new(root.to_path_buf());
        let mut files: Vec<AgentFile> = found
            .into_iter()
            .map(|path| AgentFile {
                kind: FileKind::from_path(&path),
                path,
            })
            .collect();
        // Kind order first, path order within a kind
        files.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.path.cmp(&b.path)));
        inventory.files = files;

        debug!(
            root = %root.display(),
            files = inventory.len(),
            "agent files discovered"
        );

        Ok(inventory)
    }
}
