// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job analysis cache.
//!
//! Only jobs that are building or broken hold a walker. A stable job never
//! enters the cache, and the entry of a job observed stable is dropped.
//! A dropped walker is marked retired so passes still in flight on it stop
//! recording culprits.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use cieye_core::{classify, ClassifyError, JobSnapshot, JobUrl, Status};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::walker::BuildChainWalker;

/// What to analyse a job with.
#[derive(Debug, Clone)]
pub enum Analyser {
    /// The job is stable; its classification is the whole answer
    Settled(Status),
    /// The job is active and tracked by this walker
    Tracked(Arc<BuildChainWalker>),
}

#[derive(Debug, Default)]
pub struct AnalysisCache {
    walkers: Mutex<HashMap<JobUrl, Arc<BuildChainWalker>>>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walker for an active job, created on first request.
    ///
    /// Creation and lookup happen under one lock, so concurrent callers for
    /// the same job always share a single walker.
    pub fn analyser_for(&self, snapshot: &JobSnapshot) -> Result<Analyser, ClassifyError> {
        let status = classify(snapshot)?;
        let mut walkers = self.walkers.lock();
        if !status.is_active() {
            if let Some(walker) = walkers.remove(&snapshot.url) {
                walker.retire();
                info!(job = %snapshot.url, %status, "job settled, retiring analysis");
            }
            return Ok(Analyser::Settled(status));
        }
        let walker = match walkers.entry(snapshot.url.clone()) {
            Entry::Occupied(entry) => {
                debug!(job = %snapshot.url, "reusing analysis");
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => {
                info!(job = %snapshot.url, %status, "tracking active job");
                Arc::clone(entry.insert(Arc::new(BuildChainWalker::new(snapshot.url.clone()))))
            }
        };
        Ok(Analyser::Tracked(walker))
    }

    /// Drop the job's walker and mark it retired. Returns whether one existed.
    pub fn retire(&self, job: &JobUrl) -> bool {
        let Some(walker) = self.walkers.lock().remove(job) else {
            return false;
        };
        walker.retire();
        info!(%job, "retired analysis");
        true
    }

    pub fn is_tracking(&self, job: &JobUrl) -> bool {
        self.walkers.lock().contains_key(job)
    }

    pub fn len(&self) -> usize {
        self.walkers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkers.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
