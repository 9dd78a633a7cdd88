//! Culprit attribution through build chains and across polls.

use crate::prelude::*;
use BuildResult::{Failure, Success};

#[tokio::test]
async fn building_job_inherits_upstream_break_and_blame() {
    let spy = Spy::new();
    spy.farm.put_job(building("b", Some("c")));
    spy.farm.put_job(job("c", &[Success, Failure]));
    spy.farm.set_committers(&build_url("c", 2), &["alice"]);
    spy.farm.add_view("Checkout", &[job_url("b").as_str(), job_url("c").as_str()]);

    let digests = spy.poll("Checkout").await;
    assert_eq!(digests[0], ("b".to_string(), Status::Building));

    let detail = spy.detail(&job_url("b")).await;
    assert_eq!(detail.status, Status::Broken);
    assert_eq!(detail.culprit_names(), vec!["alice"]);
}

#[tokio::test]
async fn culprits_accumulate_while_the_break_lasts() {
    let spy = Spy::new();
    let url = job_url("d");
    spy.farm.put_job(job("d", &[Success, Failure]));
    spy.farm.add_view("Checkout", &[url.as_str()]);

    spy.farm.set_committers(&build_url("d", 2), &["bob"]);
    spy.poll("Checkout").await;
    let first = spy.detail(&url).await;

    spy.farm.put_job(job("d", &[Success, Failure, Failure]));
    spy.farm.set_committers(&build_url("d", 2), &["carol"]);
    spy.poll("Checkout").await;
    let second = spy.detail(&url).await;

    assert_eq!(first.culprit_names(), vec!["bob"]);
    assert_eq!(second.culprit_names(), vec!["bob", "carol"]);
    assert_eq!(second.last_bad_build, Some(BuildUrl::new(build_url("d", 2))));
}

#[tokio::test]
async fn blame_resets_after_recovery_and_a_new_break() {
    let spy = Spy::new();
    let url = job_url("d");
    spy.farm.add_view("Checkout", &[url.as_str()]);

    spy.farm.put_job(job("d", &[Success, Failure]));
    spy.farm.set_committers(&build_url("d", 2), &["bob"]);
    spy.poll("Checkout").await;
    spy.detail(&url).await;

    spy.farm.put_job(job("d", &[Success, Failure, Success]));
    spy.poll("Checkout").await;

    spy.farm.put_job(job("d", &[Success, Failure, Success, Failure]));
    spy.farm.set_committers(&build_url("d", 4), &["dan"]);
    spy.poll("Checkout").await;
    let detail = spy.detail(&url).await;

    assert_eq!(detail.culprit_names(), vec!["dan"]);
    assert_eq!(detail.last_bad_build, Some(BuildUrl::new(build_url("d", 4))));
}

#[tokio::test]
async fn triggering_cycle_still_produces_detail() {
    let spy = Spy::new();
    spy.farm.put_job(building("x", Some("y")));
    spy.farm.put_job(building("y", Some("x")));
    spy.farm.add_view("Loop", &[job_url("x").as_str(), job_url("y").as_str()]);
    spy.poll("Loop").await;

    let detail = spy.detail(&job_url("x")).await;

    assert_eq!(detail.status, Status::Building);
    assert!(detail.culprits.is_empty());
}

#[tokio::test]
async fn offenders_directory_is_shared_between_spies() {
    let offenders = Arc::new(KnownOffendersDirectory::new());
    let first = Spy::with_offenders(Arc::clone(&offenders));
    let second = Spy::with_offenders(Arc::clone(&offenders));
    for spy in [&first, &second] {
        spy.farm.put_job(job("d", &[Success, Failure]));
        spy.farm.add_view("Checkout", &[job_url("d").as_str()]);
        spy.poll("Checkout").await;
    }
    first.farm.set_committers(&build_url("d", 2), &["bob"]);
    second.farm.set_committers(&build_url("d", 2), &["carol"]);

    first.detail(&job_url("d")).await;
    let detail = second.detail(&job_url("d")).await;

    assert_eq!(detail.culprit_names(), vec!["bob", "carol"]);
}

#[tokio::test]
async fn detail_json_names_the_break_and_its_culprits() {
    let spy = Spy::new();
    spy.farm.put_job(job("d", &[Success, Failure, Failure]));
    spy.farm.set_committers(&build_url("d", 2), &["bob"]);
    spy.farm.add_view("Checkout", &[job_url("d").as_str()]);
    spy.poll("Checkout").await;

    let json = serde_json::to_value(spy.detail(&job_url("d")).await).unwrap();

    similar_asserts::assert_eq!(
        json,
        serde_json::json!({
            "status": "broken",
            "breakdown": "broken since #2",
            "culprits": ["bob"],
            "last_bad_build": build_url("d", 2),
        })
    );
}
