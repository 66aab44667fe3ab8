// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use agentscout::domain::AGENT_SEPARATOR;
use agentscout::services::report::split_batch_prompts;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let prompts = split_batch_prompts(data);
    assert!(prompts.len() <= data.matches(AGENT_SEPARATOR).count() + 1);
    for prompt in prompts {
        assert!(!prompt.content.is_empty());
        assert!(!prompt.content.contains(AGENT_SEPARATOR));
        assert!(prompt.slug.chars().all(|c| c.is_alphanumeric() || c == '-'));
    }
});
