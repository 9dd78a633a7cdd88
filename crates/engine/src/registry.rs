// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target registry: the engine's surface towards the polling driver.
//!
//! A poll asks for the digests constituting a feature; that pass is cheap
//! and records which job each digest stands for. Detail and annotation
//! requests later resolve a target id through that mapping and hand the job
//! to the [`JobLaboratory`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use cieye_adapters::{AnnotationTransport, BuildFarmClient};
use cieye_core::{
    classify, Feature, JobSnapshot, JobUrl, Status, TargetDetail, TargetDigest,
    TargetDigestGroup, TargetId, View,
};
use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::{RegistryPruning, SpyConfig};
use crate::error::SpyError;
use crate::laboratory::JobLaboratory;
use crate::offenders::KnownOffendersDirectory;

/// Jobs recognised by earlier digest passes.
#[derive(Default)]
struct Recognised {
    jobs: HashMap<TargetId, JobUrl>,
    by_feature: HashMap<String, Vec<TargetId>>,
}

impl Recognised {
    /// Record a feature's targets, returning jobs that dropped out of every feature.
    fn register(&mut self, feature: &str, jobs: &[JobSnapshot], pruning: RegistryPruning) -> Vec<JobUrl> {
        let ids: Vec<TargetId> = jobs.iter().map(|job| TargetId::from(&job.url)).collect();
        for job in jobs {
            self.jobs.insert(TargetId::from(&job.url), job.url.clone());
        }
        let previous = self.by_feature.insert(feature.to_string(), ids).unwrap_or_default();
        if pruning == RegistryPruning::Never {
            return Vec::new();
        }

        let still_listed: HashSet<&TargetId> = self.by_feature.values().flatten().collect();
        let stale: Vec<TargetId> =
            previous.into_iter().filter(|id| !still_listed.contains(id)).collect();
        stale.iter().filter_map(|id| self.jobs.remove(id)).collect()
    }
}

pub struct TargetRegistry<F, A> {
    farm: F,
    annotator: A,
    config: SpyConfig,
    laboratory: JobLaboratory<F>,
    recognised: RwLock<Recognised>,
}

impl<F: BuildFarmClient, A: AnnotationTransport> TargetRegistry<F, A> {
    pub fn new(
        config: SpyConfig,
        farm: F,
        annotator: A,
        offenders: Arc<KnownOffendersDirectory>,
    ) -> Self {
        let laboratory = JobLaboratory::new(farm.clone(), offenders);
        Self { farm, annotator, config, laboratory, recognised: RwLock::new(Recognised::default()) }
    }

    /// Digests for every job in the feature's view.
    ///
    /// A feature on another endpoint, or one with no matching view, yields an
    /// empty group. Jobs observed stable here have their analysis retired.
    pub async fn digests_for(&self, feature: &Feature) -> Result<TargetDigestGroup, SpyError> {
        if !self.config.speaks_for(&feature.endpoint) {
            debug!(feature = %feature.name, endpoint = %feature.endpoint, "feature belongs to another endpoint");
            return Ok(TargetDigestGroup::default());
        }

        let views = self.farm.views().await?;
        let by_name: HashMap<&str, &View> =
            views.iter().map(|view| (view.name.trim(), view)).collect();
        let jobs: &[JobSnapshot] = match by_name.get(feature.name.trim()) {
            Some(view) => &view.jobs,
            None => {
                error!(feature = %feature.name, "no view named <{}> found", feature.name);
                &[]
            }
        };

        let mut digests = Vec::with_capacity(jobs.len());
        for job in jobs {
            let status = match classify(job) {
                Ok(status) => status,
                Err(e) => {
                    warn!(job = %job.url, error = %e, "cannot classify job, reporting unknown");
                    digests.push(TargetDigest::of(job, Status::Unknown));
                    continue;
                }
            };
            if !status.is_active() {
                self.laboratory.settle(&job.url);
            }
            digests.push(TargetDigest::of(job, status));
        }

        let stale = self.recognised.write().register(&feature.name, jobs, self.config.registry_pruning);
        for job in &stale {
            info!(%job, feature = %feature.name, "job no longer listed, forgetting target");
            self.laboratory.settle(job);
        }

        Ok(TargetDigestGroup::new(digests))
    }

    /// Detail for a target recognised by an earlier digest pass.
    ///
    /// Returns `None` for ids the registry has never seen.
    pub async fn detail_for(&self, target: &TargetId) -> Result<Option<TargetDetail>, SpyError> {
        let Some(job) = self.job_for(target) else {
            debug!(%target, "detail requested for unknown target");
            return Ok(None);
        };
        self.laboratory.analyse_job(&job).await.map(Some)
    }

    /// Attach a note to the build that opened the target's current break.
    ///
    /// Returns `false` only for an unknown target. A target with no break
    /// succeeds without delivering anything.
    pub async fn annotate(&self, target: &TargetId, note: &str) -> Result<bool, SpyError> {
        let Some(job) = self.job_for(target) else {
            debug!(%target, "note for unknown target");
            return Ok(false);
        };
        let Some(build) = self.laboratory.last_bad_build_for(&job).await? else {
            debug!(%job, "no failing build to annotate");
            return Ok(true);
        };
        self.annotator.annotate(&build, note).await?;
        info!(%job, %build, "annotated failing build");
        Ok(true)
    }

    pub fn is_recognised(&self, target: &TargetId) -> bool {
        self.recognised.read().jobs.contains_key(target)
    }

    pub fn laboratory(&self) -> &JobLaboratory<F> {
        &self.laboratory
    }

    pub fn config(&self) -> &SpyConfig {
        &self.config
    }

    fn job_for(&self, target: &TargetId) -> Option<JobUrl> {
        self.recognised.read().jobs.get(target).cloned()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
