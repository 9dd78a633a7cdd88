// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{BuildResult, BuildSummary};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for snapshot types.
pub mod strategies {
    use crate::{BuildResult, BuildSummary, JobSnapshot};
    use proptest::prelude::*;

    pub fn arb_build_result() -> impl Strategy<Value = BuildResult> {
        prop_oneof![
            Just(BuildResult::Success),
            Just(BuildResult::Unstable),
            Just(BuildResult::Failure),
            Just(BuildResult::Aborted),
            Just(BuildResult::NotBuilt),
        ]
    }

    /// Build history (newest first) whose newest entry may still be running.
    pub fn arb_history() -> impl Strategy<Value = Vec<BuildSummary>> {
        (proptest::collection::vec(arb_build_result(), 0..8), any::<bool>()).prop_map(
            |(results, running)| {
                let total = results.len() as u64 + u64::from(running);
                let mut builds = Vec::new();
                if running {
                    builds.push(super::running("http://ci/job/prop/", total));
                }
                for (offset, result) in results.into_iter().enumerate() {
                    let number = total - u64::from(running) - offset as u64;
                    builds.push(super::completed("http://ci/job/prop/", number, result));
                }
                builds
            },
        )
    }

    pub fn arb_snapshot() -> impl Strategy<Value = JobSnapshot> {
        (any::<bool>(), proptest::option::of(arb_build_result()), arb_history()).prop_map(
            |(building, result, builds)| JobSnapshot {
                url: "http://ci/job/prop/".into(),
                name: "prop".to_string(),
                building,
                result,
                upstream: None,
                builds,
            },
        )
    }
}

// ── History factory functions ───────────────────────────────────────────────

/// A completed build of the job at `job_url`.
pub fn completed(job_url: &str, number: u64, result: BuildResult) -> BuildSummary {
    BuildSummary::new(number, format!("{job_url}{number}/"), Some(result))
}

/// An in-progress build of the job at `job_url`.
pub fn running(job_url: &str, number: u64) -> BuildSummary {
    BuildSummary::new(number, format!("{job_url}{number}/"), None)
}

/// Build history, newest first, from `(number, result)` pairs given oldest first.
///
/// A `None` result marks a running build.
pub fn history(job_url: &str, builds: &[(u64, Option<BuildResult>)]) -> Vec<BuildSummary> {
    builds
        .iter()
        .rev()
        .map(|&(number, result)| match result {
            Some(result) => completed(job_url, number, result),
            None => running(job_url, number),
        })
        .collect()
}
