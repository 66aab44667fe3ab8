// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use agentscout::domain::Decision;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    match data.parse::<Decision>() {
        Ok(_) => assert!(data.trim().len() <= 4),
        Err(e) => assert!(e.to_string().starts_with("Invalid choice")),
    }
});
