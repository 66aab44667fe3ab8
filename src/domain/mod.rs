// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

mod agent;
mod context;
mod decision;
mod inventory;

pub use agent::*;
pub use context::*;
pub use decision::*;
pub use inventory::*;
