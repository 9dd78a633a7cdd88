//! Digest passes and detail requests across poll cycles.

use crate::prelude::*;
use BuildResult::{Failure, Success};

#[tokio::test]
async fn healthy_job_reports_ok_with_no_culprits() {
    let spy = Spy::new();
    spy.farm.put_job(job("a", &[Success]));
    spy.farm.add_view("Checkout", &[job_url("a").as_str()]);

    assert_eq!(spy.poll("Checkout").await, vec![("a".to_string(), Status::Ok)]);

    let detail = spy.detail(&job_url("a")).await;
    assert_eq!(detail.status, Status::Ok);
    assert!(detail.culprits.is_empty());
    assert!(!spy.is_tracking(&job_url("a")));
}

#[tokio::test]
async fn unknown_feature_is_an_empty_group() {
    let spy = Spy::new();
    spy.farm.put_job(job("a", &[Success]));
    spy.farm.add_view("Checkout", &[job_url("a").as_str()]);

    assert!(spy.poll("Payments").await.is_empty());
}

#[tokio::test]
async fn digest_ids_are_stable_between_polls() {
    let spy = Spy::new();
    spy.farm.put_job(job("a", &[Success]));
    spy.farm.add_view("Checkout", &[job_url("a").as_str()]);
    let feature = Feature::new("Checkout", ENDPOINT);

    let first = spy.registry.digests_for(&feature).await.unwrap();
    spy.farm.put_job(job("a", &[Success, Failure]));
    let second = spy.registry.digests_for(&feature).await.unwrap();

    let first_ids: Vec<&TargetId> = first.iter().map(|d| d.id()).collect();
    let second_ids: Vec<&TargetId> = second.iter().map(|d| d.id()).collect();
    assert_eq!(first_ids, second_ids);
}

#[tokio::test]
async fn recovery_clears_tracking_and_blame() {
    let spy = Spy::new();
    let url = job_url("d");
    spy.farm.put_job(job("d", &[Success, Failure]));
    spy.farm.set_committers(&build_url("d", 2), &["bob"]);
    spy.farm.add_view("Checkout", &[url.as_str()]);

    spy.poll("Checkout").await;
    let broken = spy.detail(&url).await;
    assert_eq!(broken.culprit_names(), vec!["bob"]);
    assert!(spy.is_tracking(&url));

    spy.farm.put_job(job("d", &[Success, Failure, Success]));
    let fixed = spy.detail(&url).await;

    assert_eq!(fixed.status, Status::Ok);
    assert!(fixed.culprits.is_empty());
    assert!(!spy.is_tracking(&url));
    assert!(spy.offenders.culprits_for(&JobUrl::new(url.as_str())).is_empty());
}

#[tokio::test]
async fn detail_reflects_the_farm_at_request_time() {
    let spy = Spy::new();
    let url = job_url("a");
    spy.farm.put_job(job("a", &[Success]));
    spy.farm.add_view("Checkout", &[url.as_str()]);
    spy.poll("Checkout").await;

    spy.farm.put_job(building("a", None));

    assert_eq!(spy.detail(&url).await.status, Status::Building);
    assert!(spy.is_tracking(&url));
}

#[tokio::test]
async fn one_unreachable_job_does_not_affect_others() {
    let spy = Spy::new();
    spy.farm.put_job(job("a", &[Success, Failure]));
    spy.farm.put_job(job("b", &[Failure]));
    spy.farm.set_committers(&build_url("b", 1), &["bea"]);
    spy.farm.add_view("Checkout", &[job_url("a").as_str(), job_url("b").as_str()]);
    spy.poll("Checkout").await;

    spy.farm.fail_job(&job_url("a"));
    let failed = spy.registry.detail_for(&TargetId::new(job_url("a"))).await;
    let other = spy.detail(&job_url("b")).await;

    assert!(failed.is_err());
    assert_eq!(other.culprit_names(), vec!["bea"]);
    assert!(!spy.is_tracking(&job_url("a")));
}
