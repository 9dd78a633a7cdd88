// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coarse target status and the classifier that derives it from a snapshot.

use crate::id::JobUrl;
use crate::job::JobSnapshot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Health of a monitored target.
///
/// `Building` and `Broken` are active states that require chain analysis;
/// `Ok` and `Unknown` are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Unknown,
    Ok,
    Building,
    Broken,
}

impl Status {
    /// Whether a job in this state needs its build chain analysed.
    pub fn is_active(self) -> bool {
        matches!(self, Status::Building | Status::Broken)
    }
}

crate::simple_display! {
    Status {
        Unknown => "unknown",
        Ok => "ok",
        Building => "building",
        Broken => "broken",
    }
}

/// Result the build farm reports for a completed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    Aborted,
    NotBuilt,
}

impl BuildResult {
    /// Failures and unstable builds both count as a break.
    pub fn is_broken(self) -> bool {
        matches!(self, BuildResult::Failure | BuildResult::Unstable)
    }
}

impl From<BuildResult> for Status {
    fn from(result: BuildResult) -> Self {
        match result {
            BuildResult::Success => Status::Ok,
            BuildResult::Failure | BuildResult::Unstable => Status::Broken,
            BuildResult::Aborted | BuildResult::NotBuilt => Status::Unknown,
        }
    }
}

/// Errors from classifying a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("job {job} is not building and reports no result")]
    MissingResult { job: JobUrl },
}

/// Map a single job observation to its coarse status.
///
/// An in-progress build wins over the last completed result. A job that has
/// never been built has no result and classifies as `Unknown`; a missing
/// result on a job with build history is malformed.
pub fn classify(snapshot: &JobSnapshot) -> Result<Status, ClassifyError> {
    if snapshot.building {
        return Ok(Status::Building);
    }
    match snapshot.result {
        Some(result) => Ok(result.into()),
        None if snapshot.builds.is_empty() => Ok(Status::Unknown),
        None => Err(ClassifyError::MissingResult { job: snapshot.url.clone() }),
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
