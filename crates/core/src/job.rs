// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only observations of build farm jobs and views.

use crate::id::{BuildUrl, JobUrl};
use crate::status::BuildResult;
use serde::{Deserialize, Serialize};

/// One entry in a job's build history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub number: u64,
    pub url: BuildUrl,
    /// `None` while the build is still running
    pub result: Option<BuildResult>,
}

impl BuildSummary {
    pub fn new(number: u64, url: impl Into<BuildUrl>, result: Option<BuildResult>) -> Self {
        Self { number, url: url.into(), result }
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_broken(&self) -> bool {
        self.result.is_some_and(BuildResult::is_broken)
    }
}

/// Point-in-time view of a job as reported by the build farm.
///
/// Produced fresh on every poll and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub url: JobUrl,
    pub name: String,
    /// A build of this job is in progress
    pub building: bool,
    /// Result of the last completed build
    pub result: Option<BuildResult>,
    /// Job whose build triggered the current (or last) build
    pub upstream: Option<JobUrl>,
    /// Recent build history, newest first
    pub builds: Vec<BuildSummary>,
}

crate::builder! {
    pub struct JobSnapshotBuilder => JobSnapshot {
        into {
            url: JobUrl = "http://ci/job/test/",
            name: String = "test",
        }
        set {
            building: bool = false,
            builds: Vec<BuildSummary> = Vec::new(),
        }
        option {
            result: BuildResult = Some(BuildResult::Success),
            upstream: JobUrl = None,
        }
    }
}

impl JobSnapshot {
    /// The build that opened the currently visible break.
    ///
    /// Walks completed builds from newest to oldest and returns the oldest
    /// broken build before the first non-broken one. Returns `None` when the
    /// most recent completed build is not broken.
    pub fn first_bad_build(&self) -> Option<&BuildSummary> {
        let mut first_bad = None;
        for build in self.builds.iter().filter(|b| b.is_complete()) {
            if !build.is_broken() {
                break;
            }
            first_bad = Some(build);
        }
        first_bad
    }

    /// True when every completed build in the visible history is broken,
    /// i.e. the transition into the break lies outside the history window.
    pub fn break_predates_history(&self) -> bool {
        let mut completed = self.builds.iter().filter(|b| b.is_complete()).peekable();
        completed.peek().is_some() && completed.all(BuildSummary::is_broken)
    }
}

/// A named grouping of jobs on the build farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub name: String,
    pub jobs: Vec<JobSnapshot>,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
