// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build chain analysis for jobs that are building or broken.
//!
//! A job's own last result is not always the current truth: a build in
//! progress may have been triggered by an upstream job that is already
//! broken, and a downstream break is usually the upstream committers' doing.
//! The walker follows the triggering chain to decide the effective status
//! and who to blame, recording culprits in the [`KnownOffendersDirectory`]
//! so repeated polls of the same break converge.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use cieye_adapters::BuildFarmClient;
use cieye_core::{
    classify, BuildSummary, BuildUrl, Culprit, JobSnapshot, JobUrl, Status, TargetDetail,
};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::SpyError;
use crate::offenders::KnownOffendersDirectory;

/// Outcome of one analysis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainAnalysis {
    pub detail: TargetDetail,
    /// The job has settled and its walker can be retired
    pub stabilized: bool,
}

/// An active job found upstream of the analysed one.
#[derive(Debug)]
struct UpstreamLink {
    status: Status,
    snapshot: JobSnapshot,
}

/// Active jobs found upstream, and where the walk looped back, if it did.
#[derive(Debug, Default)]
struct UpstreamChain {
    links: Vec<UpstreamLink>,
    revisited: Option<JobUrl>,
}

impl UpstreamChain {
    /// The link the job's state is blamed on. `None` leaves the job itself
    /// as root cause.
    fn root(&self) -> Option<&UpstreamLink> {
        match &self.revisited {
            Some(url) => self.links.iter().find(|link| &link.snapshot.url == url),
            None => self
                .links
                .iter()
                .rev()
                .find(|link| link.status == Status::Broken)
                .or_else(|| self.links.last()),
        }
    }
}

/// Tracks one active job across polls.
#[derive(Debug)]
pub struct BuildChainWalker {
    job: JobUrl,
    /// First bad build of the break currently being tracked
    first_bad: Mutex<Option<BuildSummary>>,
    /// Set once the cache drops this walker; a late pass must not record culprits
    retired: AtomicBool,
}

impl BuildChainWalker {
    pub fn new(job: JobUrl) -> Self {
        Self { job, first_bad: Mutex::new(None), retired: AtomicBool::new(false) }
    }

    pub fn job(&self) -> &JobUrl {
        &self.job
    }

    /// Mark the walker as no longer tracking its job.
    pub fn retire(&self) {
        self.retired.store(true, Ordering::SeqCst);
    }

    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::SeqCst)
    }

    /// Re-examine the job from its current snapshot.
    ///
    /// Culprits resolved on this pass are merged into the directory entry for
    /// the job, so attribution gathered on earlier passes is kept. A settled
    /// job clears its entry and reports `stabilized`. Once the walker is
    /// retired, culprits it resolves are dropped instead of recorded.
    pub async fn analyse<F: BuildFarmClient>(
        &self,
        snapshot: &JobSnapshot,
        farm: &F,
        offenders: &KnownOffendersDirectory,
    ) -> Result<ChainAnalysis, SpyError> {
        let status = classify(snapshot)?;
        if !status.is_active() {
            offenders.clear(&self.job);
            *self.first_bad.lock() = None;
            return Ok(ChainAnalysis { detail: TargetDetail::settled(status), stabilized: true });
        }

        let chain = self.upstream_chain(snapshot, farm).await;
        let root = chain.root();
        let upstream_broken = root.is_some_and(|link| link.status == Status::Broken);
        let first_bad = self.first_bad_build(snapshot);

        let effective = if upstream_broken { Status::Broken } else { status };
        if effective == Status::Broken {
            let mut blamed = match root {
                Some(link) => self.upstream_culprits(link, farm, offenders).await,
                None => BTreeSet::new(),
            };
            if blamed.is_empty() {
                if let Some(build) = &first_bad {
                    blamed = farm.committers_for_build(&build.url).await?;
                }
            }
            if offenders.record_culprits_if(&self.job, blamed, || !self.is_retired()).is_none() {
                debug!(job = %self.job, "analysis retired mid-pass, culprits dropped");
            }
        }

        let detail = TargetDetail {
            status: effective,
            breakdown: breakdown(effective, first_bad.as_ref(), root),
            culprits: offenders.culprits_for(&self.job),
            last_bad_build: first_bad.map(|build| build.url),
        };
        Ok(ChainAnalysis { detail, stabilized: false })
    }

    /// The build a note about the current break should be attached to.
    pub fn last_bad_build(&self, snapshot: &JobSnapshot) -> Option<BuildUrl> {
        self.first_bad_build(snapshot).map(|build| build.url)
    }

    /// Follow triggering builds upstream while they are building or broken.
    ///
    /// Stops at the first settled or unresolvable job, or on reaching a job
    /// already visited in this walk, which then becomes the root cause.
    /// An unresolvable upstream leaves the local job as root cause.
    async fn upstream_chain<F: BuildFarmClient>(
        &self,
        snapshot: &JobSnapshot,
        farm: &F,
    ) -> UpstreamChain {
        let mut visited = HashSet::from([snapshot.url.clone()]);
        let mut chain = UpstreamChain::default();
        loop {
            let tip = chain.links.last().map_or(snapshot, |link| &link.snapshot);
            let next = match farm.triggering_build(tip).await {
                Ok(Some(next)) => next,
                Ok(None) => break,
                Err(e) => {
                    warn!(job = %self.job, at = %tip.url, error = %e, "cannot resolve triggering build");
                    break;
                }
            };
            if !visited.insert(next.clone()) {
                debug!(job = %self.job, upstream = %next, "build chain loops back on itself");
                chain.revisited = Some(next);
                break;
            }
            let upstream = match farm.job_snapshot(&next).await {
                Ok(upstream) => upstream,
                Err(e) => {
                    warn!(job = %self.job, upstream = %next, error = %e, "upstream job unavailable, treating job as root cause");
                    break;
                }
            };
            let status = match classify(&upstream) {
                Ok(status) => status,
                Err(e) => {
                    warn!(job = %self.job, upstream = %next, error = %e, "cannot classify upstream job");
                    break;
                }
            };
            if !status.is_active() {
                break;
            }
            debug!(job = %self.job, upstream = %next, %status, "following build chain");
            chain.links.push(UpstreamLink { status, snapshot: upstream });
        }
        chain
    }

    async fn upstream_culprits<F: BuildFarmClient>(
        &self,
        link: &UpstreamLink,
        farm: &F,
        offenders: &KnownOffendersDirectory,
    ) -> BTreeSet<Culprit> {
        let mut culprits = offenders.culprits_for(&link.snapshot.url);
        if link.status != Status::Broken {
            return culprits;
        }
        if let Some(build) = link.snapshot.first_bad_build() {
            match farm.committers_for_build(&build.url).await {
                Ok(found) => culprits.extend(found),
                Err(e) => {
                    warn!(job = %self.job, build = %build.url, error = %e, "cannot fetch upstream committers");
                }
            }
        }
        culprits
    }

    /// First bad build of the active break, carried across polls once the
    /// transition into the break has scrolled out of the visible history.
    fn first_bad_build(&self, snapshot: &JobSnapshot) -> Option<BuildSummary> {
        let mut remembered = self.first_bad.lock();
        let Some(visible) = snapshot.first_bad_build() else {
            *remembered = None;
            return None;
        };
        let carried = remembered
            .as_ref()
            .filter(|earlier| snapshot.break_predates_history() && earlier.number < visible.number)
            .cloned();
        let chosen = carried.unwrap_or_else(|| visible.clone());
        *remembered = Some(chosen.clone());
        Some(chosen)
    }
}

fn breakdown(status: Status, first_bad: Option<&BuildSummary>, root: Option<&UpstreamLink>) -> String {
    let mut text = match (status, first_bad) {
        (Status::Broken, Some(build)) => format!("broken since #{}", build.number),
        (status, _) => status.to_string(),
    };
    if let Some(link) = root {
        text.push_str(&format!(" (upstream {}: {})", link.status, link.snapshot.url));
    }
    text
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
