// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory of contributors already implicated in an active break.
//!
//! Shared by every spy in the process. Culprits recorded for a job on
//! different polls accumulate; the entry is dropped once the job settles.

use std::collections::{BTreeSet, HashMap};

use cieye_core::{Culprit, JobUrl};
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct KnownOffendersDirectory {
    entries: RwLock<HashMap<JobUrl, BTreeSet<Culprit>>>,
}

impl KnownOffendersDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `culprits` into the job's entry and return the merged set.
    pub fn record_culprits(
        &self,
        job: &JobUrl,
        culprits: impl IntoIterator<Item = Culprit>,
    ) -> BTreeSet<Culprit> {
        self.record_culprits_if(job, culprits, || true).unwrap_or_default()
    }

    /// Like [`record_culprits`](Self::record_culprits), but only when `tracked`
    /// still holds once the directory lock is taken.
    ///
    /// Settling a job retires its analysis before clearing its entry, so a
    /// check made under the lock can never resurrect a cleared entry.
    pub fn record_culprits_if(
        &self,
        job: &JobUrl,
        culprits: impl IntoIterator<Item = Culprit>,
        tracked: impl FnOnce() -> bool,
    ) -> Option<BTreeSet<Culprit>> {
        let mut entries = self.entries.write();
        if !tracked() {
            return None;
        }
        let known = entries.entry(job.clone()).or_default();
        known.extend(culprits);
        Some(known.clone())
    }

    pub fn culprits_for(&self, job: &JobUrl) -> BTreeSet<Culprit> {
        self.entries.read().get(job).cloned().unwrap_or_default()
    }

    /// Drop the job's entry. Returns whether one existed.
    pub fn clear(&self, job: &JobUrl) -> bool {
        self.entries.write().remove(job).is_some()
    }

    pub fn is_tracking(&self, job: &JobUrl) -> bool {
        self.entries.read().contains_key(job)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
#[path = "offenders_tests.rs"]
mod tests;
