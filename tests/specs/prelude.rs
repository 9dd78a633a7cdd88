//! Shared fixtures for the behavioural specs.

pub use cieye_adapters::{FakeAnnotationTransport, FakeBuildFarm};
pub use cieye_core::test_support::history;
pub use cieye_core::{
    BuildResult, BuildUrl, Feature, JobSnapshot, JobUrl, Status, TargetDetail, TargetId,
};
pub use cieye_engine::{KnownOffendersDirectory, SpyConfig, TargetRegistry};
pub use std::sync::Arc;

pub const ENDPOINT: &str = "http://ci.example.com";

pub type Registry = TargetRegistry<FakeBuildFarm, FakeAnnotationTransport>;

/// A build farm plus a spy watching it.
pub struct Spy {
    pub farm: FakeBuildFarm,
    pub notes: FakeAnnotationTransport,
    pub offenders: Arc<KnownOffendersDirectory>,
    pub registry: Registry,
}

impl Spy {
    pub fn new() -> Self {
        Self::with_offenders(Arc::new(KnownOffendersDirectory::new()))
    }

    /// A spy sharing a process-wide offenders directory.
    pub fn with_offenders(offenders: Arc<KnownOffendersDirectory>) -> Self {
        let farm = FakeBuildFarm::new();
        let notes = FakeAnnotationTransport::new();
        let registry = TargetRegistry::new(
            SpyConfig::new(ENDPOINT),
            farm.clone(),
            notes.clone(),
            Arc::clone(&offenders),
        );
        Self { farm, notes, offenders, registry }
    }

    pub async fn poll(&self, feature: &str) -> Vec<(String, Status)> {
        self.registry
            .digests_for(&Feature::new(feature, ENDPOINT))
            .await
            .unwrap()
            .iter()
            .map(|digest| (digest.name().to_string(), digest.status()))
            .collect()
    }

    pub async fn detail(&self, url: &str) -> TargetDetail {
        self.registry.detail_for(&TargetId::new(url)).await.unwrap().unwrap()
    }

    pub fn is_tracking(&self, url: &str) -> bool {
        self.registry.laboratory().cache().is_tracking(&JobUrl::new(url))
    }
}

pub fn job_url(name: &str) -> String {
    format!("{ENDPOINT}/job/{name}/")
}

pub fn build_url(name: &str, number: u64) -> String {
    format!("{ENDPOINT}/job/{name}/{number}/")
}

/// Idle job whose builds (oldest first) ended with the given results.
pub fn job(name: &str, builds: &[BuildResult]) -> JobSnapshot {
    let url = job_url(name);
    let numbered: Vec<(u64, Option<BuildResult>)> =
        builds.iter().enumerate().map(|(i, result)| (i as u64 + 1, Some(*result))).collect();
    let mut builder = JobSnapshot::builder().url(url.as_str()).name(name).builds(history(&url, &numbered));
    if let Some(last) = builds.last() {
        builder = builder.result(*last);
    }
    builder.build()
}

/// Job with a build in progress, optionally triggered by `upstream`.
pub fn building(name: &str, upstream: Option<&str>) -> JobSnapshot {
    let mut snapshot = job(name, &[BuildResult::Success]);
    snapshot.building = true;
    snapshot.upstream = upstream.map(|up| JobUrl::new(job_url(up)));
    snapshot
}
