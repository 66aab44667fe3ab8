// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use agentscout::services::parser::SuggestionParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    for suggestion in SuggestionParser::parse(data) {
        assert!(!suggestion.name.trim().is_empty());
        let slug = suggestion.slug();
        assert!(!slug.is_empty());
        assert!(!slug.contains('/'));
    }
});
