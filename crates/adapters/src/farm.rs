// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build farm client adapter.
//!
//! The engine never speaks the build farm's wire protocol itself; it asks a
//! [`BuildFarmClient`] for views, job snapshots and committers. Timeouts and
//! retries are the client's concern.

use std::collections::BTreeSet;

use async_trait::async_trait;
use cieye_core::{BuildUrl, Culprit, JobSnapshot, JobUrl, View};
use thiserror::Error;

/// Errors from build farm queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FarmError {
    #[error("build farm unreachable: {0}")]
    Unreachable(String),
    #[error("unknown job: {0}")]
    UnknownJob(JobUrl),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Adapter for querying a build farm
#[async_trait]
pub trait BuildFarmClient: Clone + Send + Sync + 'static {
    /// List every view together with the jobs it contains
    async fn views(&self) -> Result<Vec<View>, FarmError>;

    /// Fetch the current snapshot of a job
    async fn job_snapshot(&self, job: &JobUrl) -> Result<JobSnapshot, FarmError>;

    /// Job whose build triggered the given job's current build.
    ///
    /// Clients that can read the cause straight off the snapshot need not
    /// override this.
    async fn triggering_build(&self, job: &JobSnapshot) -> Result<Option<JobUrl>, FarmError> {
        Ok(job.upstream.clone())
    }

    /// Contributors whose changes went into a build
    async fn committers_for_build(&self, build: &BuildUrl) -> Result<BTreeSet<Culprit>, FarmError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{BuildFarmClient, FarmError};
    use async_trait::async_trait;
    use cieye_core::{BuildUrl, Culprit, JobSnapshot, JobUrl, View};
    use parking_lot::Mutex;
    use std::collections::{BTreeSet, HashMap, HashSet};
    use std::sync::Arc;

    /// Recorded build farm query
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum FarmCall {
        Views,
        JobSnapshot(JobUrl),
        CommittersForBuild(BuildUrl),
    }

    #[derive(Default)]
    struct FakeFarmState {
        /// View name (as published, untrimmed) to member jobs, in listing order
        views: Vec<(String, Vec<JobUrl>)>,
        jobs: HashMap<JobUrl, JobSnapshot>,
        committers: HashMap<BuildUrl, BTreeSet<Culprit>>,
        unreachable: bool,
        unreachable_jobs: HashSet<JobUrl>,
        calls: Vec<FarmCall>,
    }

    /// In-memory build farm for testing
    #[derive(Clone, Default)]
    pub struct FakeBuildFarm {
        inner: Arc<Mutex<FakeFarmState>>,
    }

    impl FakeBuildFarm {
        pub fn new() -> Self {
            Self::default()
        }

        /// Publish a view listing the given jobs, replacing any view of that name
        pub fn add_view(&self, name: &str, jobs: &[&str]) {
            let jobs: Vec<JobUrl> = jobs.iter().map(|url| JobUrl::new(*url)).collect();
            let mut state = self.inner.lock();
            match state.views.iter_mut().find(|(existing, _)| existing.as_str() == name) {
                Some((_, members)) => *members = jobs,
                None => state.views.push((name.to_string(), jobs)),
            }
        }

        /// Insert or replace a job's current snapshot
        pub fn put_job(&self, snapshot: JobSnapshot) {
            self.inner.lock().jobs.insert(snapshot.url.clone(), snapshot);
        }

        /// Remove a job from the farm (and from every view listing)
        pub fn remove_job(&self, url: &str) {
            let mut state = self.inner.lock();
            state.jobs.remove(url);
            for (_, jobs) in state.views.iter_mut() {
                jobs.retain(|job| job != url);
            }
        }

        /// Set the committers reported for a build
        pub fn set_committers(&self, build: &str, names: &[&str]) {
            let names = names.iter().map(|name| Culprit::new(*name)).collect();
            self.inner.lock().committers.insert(BuildUrl::new(build), names);
        }

        /// Make every query fail with `Unreachable`
        pub fn set_unreachable(&self, unreachable: bool) {
            self.inner.lock().unreachable = unreachable;
        }

        /// Make queries about one job fail with `Unreachable`
        pub fn fail_job(&self, url: &str) {
            self.inner.lock().unreachable_jobs.insert(JobUrl::new(url));
        }

        /// Get all recorded queries
        pub fn calls(&self) -> Vec<FarmCall> {
            self.inner.lock().calls.clone()
        }

        /// Number of snapshot queries made for a job
        pub fn snapshot_calls(&self, url: &str) -> usize {
            self.inner
                .lock()
                .calls
                .iter()
                .filter(|call| matches!(call, FarmCall::JobSnapshot(job) if job == url))
                .count()
        }
    }

    #[async_trait]
    impl BuildFarmClient for FakeBuildFarm {
        async fn views(&self) -> Result<Vec<View>, FarmError> {
            let mut state = self.inner.lock();
            state.calls.push(FarmCall::Views);
            if state.unreachable {
                return Err(FarmError::Unreachable("fake farm offline".to_string()));
            }
            let views = state
                .views
                .iter()
                .map(|(name, urls)| View {
                    name: name.clone(),
                    jobs: urls.iter().filter_map(|url| state.jobs.get(url).cloned()).collect(),
                })
                .collect();
            Ok(views)
        }

        async fn job_snapshot(&self, job: &JobUrl) -> Result<JobSnapshot, FarmError> {
            let mut state = self.inner.lock();
            state.calls.push(FarmCall::JobSnapshot(job.clone()));
            if state.unreachable || state.unreachable_jobs.contains(job) {
                return Err(FarmError::Unreachable(format!("cannot reach {job}")));
            }
            state.jobs.get(job).cloned().ok_or_else(|| FarmError::UnknownJob(job.clone()))
        }

        async fn committers_for_build(
            &self,
            build: &BuildUrl,
        ) -> Result<BTreeSet<Culprit>, FarmError> {
            let mut state = self.inner.lock();
            state.calls.push(FarmCall::CommittersForBuild(build.clone()));
            if state.unreachable {
                return Err(FarmError::Unreachable("fake farm offline".to_string()));
            }
            Ok(state.committers.get(build).cloned().unwrap_or_default())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBuildFarm, FarmCall};

#[cfg(test)]
#[path = "farm_tests.rs"]
mod tests;
