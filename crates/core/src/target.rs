// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Digest and detail records handed to the presentation layer.

use std::collections::BTreeSet;

use crate::id::{BuildUrl, Culprit, TargetId};
use crate::job::JobSnapshot;
use crate::status::Status;
use serde::{Deserialize, Serialize};

/// An externally defined unit of work, backed by a build farm view of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    /// Build farm endpoint the feature's view lives on
    pub endpoint: String,
}

impl Feature {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self { name: name.into(), endpoint: endpoint.into() }
    }
}

/// Cheap per-job summary produced on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDigest {
    id: TargetId,
    reference: String,
    name: String,
    status: Status,
}

impl TargetDigest {
    pub fn new(id: TargetId, reference: impl Into<String>, name: impl Into<String>, status: Status) -> Self {
        Self { id, reference: reference.into(), name: name.into(), status }
    }

    /// Digest of a job, keyed by its URL.
    pub fn of(job: &JobSnapshot, status: Status) -> Self {
        Self::new(TargetId::from(&job.url), job.url.as_str(), job.name.as_str(), status)
    }

    pub fn id(&self) -> &TargetId {
        &self.id
    }

    /// Where a human can look at the target
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// Ordered digests of every job constituting a feature at poll time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetDigestGroup(Vec<TargetDigest>);

impl TargetDigestGroup {
    pub fn new(digests: Vec<TargetDigest>) -> Self {
        Self(digests)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TargetDigest> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn find(&self, id: &TargetId) -> Option<&TargetDigest> {
        self.0.iter().find(|digest| digest.id() == id)
    }
}

impl IntoIterator for TargetDigestGroup {
    type Item = TargetDigest;
    type IntoIter = std::vec::IntoIter<TargetDigest>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TargetDigestGroup {
    type Item = &'a TargetDigest;
    type IntoIter = std::slice::Iter<'a, TargetDigest>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Full status of one target, computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDetail {
    /// Effective status after following the build chain
    pub status: Status,
    /// Human-readable breakdown of how the status was reached
    pub breakdown: String,
    pub culprits: BTreeSet<Culprit>,
    /// Build that opened the current break; notes are attached here
    pub last_bad_build: Option<BuildUrl>,
}

impl TargetDetail {
    /// Detail for a job that needs no chain analysis.
    pub fn settled(status: Status) -> Self {
        Self { status, breakdown: status.to_string(), culprits: BTreeSet::new(), last_bad_build: None }
    }

    pub fn culprit_names(&self) -> Vec<&str> {
        self.culprits.iter().map(Culprit::as_str).collect()
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
