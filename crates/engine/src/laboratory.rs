// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Detail analysis for individual jobs.
//!
//! Ties the build farm client, the analysis cache and the offenders
//! directory together. Every call fetches the job's current snapshot, so
//! detail reflects the farm at request time rather than at the last poll.

use std::sync::Arc;

use cieye_adapters::BuildFarmClient;
use cieye_core::{BuildUrl, JobUrl, TargetDetail};

use crate::cache::{AnalysisCache, Analyser};
use crate::error::SpyError;
use crate::offenders::KnownOffendersDirectory;

pub struct JobLaboratory<F> {
    farm: F,
    cache: AnalysisCache,
    offenders: Arc<KnownOffendersDirectory>,
}

impl<F: BuildFarmClient> JobLaboratory<F> {
    pub fn new(farm: F, offenders: Arc<KnownOffendersDirectory>) -> Self {
        Self { farm, cache: AnalysisCache::new(), offenders }
    }

    /// Full detail for one job, retiring its walker once it settles.
    pub async fn analyse_job(&self, job: &JobUrl) -> Result<TargetDetail, SpyError> {
        let snapshot = self.farm.job_snapshot(job).await?;
        let walker = match self.cache.analyser_for(&snapshot)? {
            Analyser::Tracked(walker) => walker,
            Analyser::Settled(status) => {
                self.offenders.clear(job);
                return Ok(TargetDetail::settled(status));
            }
        };
        let analysis = walker.analyse(&snapshot, &self.farm, &self.offenders).await?;
        if analysis.stabilized {
            self.cache.retire(job);
        }
        Ok(analysis.detail)
    }

    /// The build a note about the job's current break belongs on, if any.
    pub async fn last_bad_build_for(&self, job: &JobUrl) -> Result<Option<BuildUrl>, SpyError> {
        let snapshot = self.farm.job_snapshot(job).await?;
        match self.cache.analyser_for(&snapshot)? {
            Analyser::Tracked(walker) => Ok(walker.last_bad_build(&snapshot)),
            Analyser::Settled(_) => {
                self.offenders.clear(job);
                Ok(None)
            }
        }
    }

    /// Forget everything tracked for a job that is stable or no longer observed.
    pub fn settle(&self, job: &JobUrl) {
        self.cache.retire(job);
        self.offenders.clear(job);
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    pub fn offenders(&self) -> &KnownOffendersDirectory {
        &self.offenders
    }
}

#[cfg(test)]
#[path = "laboratory_tests.rs"]
mod tests;
