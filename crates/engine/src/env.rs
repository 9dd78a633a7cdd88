// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

/// Build farm endpoint override
pub fn endpoint() -> Option<String> {
    std::env::var("CIEYE_ENDPOINT").ok().filter(|s| !s.is_empty())
}

/// Log level (filter directive) override
pub fn log_level() -> Option<String> {
    std::env::var("CIEYE_LOG_LEVEL").ok().filter(|s| !s.is_empty())
}
