// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

/// Grouping of discovered files, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileKind {
    Json,
    Yaml,
    Markdown,
    Text,
    Other,
}

impl FileKind {
    /// Inventory order
    pub const ALL: [FileKind; 5] = [
        Self::Json,
        Self::Yaml,
        Self::Markdown,
        Self::Text,
        Self::Other,
    ];

    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Self::Json,
            "yaml" | "yml" => Self::Yaml,
            "md" => Self::Markdown,
            "txt" => Self::Text,
            _ => Self::Other,
        }
    }

    /// Short label, also used as the code fence language tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Markdown => "md",
            Self::Text => "txt",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentFile {
    /// Path relative to the analyzed directory
    pub path: PathBuf,
    pub kind: FileKind,
}

/// Agent-related files found below one directory
#[derive(Debug, Clone, Default)]
pub struct AgentInventory {
    /// Absolute path of the analyzed directory
    pub root: PathBuf,
    pub files: Vec<AgentFile>,
}

impl AgentInventory {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            files: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn of_kind(&self, kind: FileKind) -> impl Iterator<Item = &AgentFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    pub fn count(&self, kind: FileKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn absolute(&self, file: &AgentFile) -> PathBuf {
        self.root.join(&file.path)
    }
}
