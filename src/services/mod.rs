// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod context;
pub mod discovery;
pub mod llm;
pub mod parser;
pub mod prompts;
pub mod report;
pub mod review;
