//! Concurrent detail requests against shared analysis state.

use crate::prelude::*;
use BuildResult::{Failure, Success};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_details_share_one_walker_and_agree() {
    let spy = Arc::new(Spy::new());
    let url = job_url("d");
    spy.farm.put_job(job("d", &[Success, Failure]));
    spy.farm.set_committers(&build_url("d", 2), &["bob", "carol"]);
    spy.farm.add_view("Checkout", &[url.as_str()]);
    spy.poll("Checkout").await;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let spy = Arc::clone(&spy);
            let url = url.clone();
            tokio::spawn(async move { spy.detail(&url).await })
        })
        .collect();

    for handle in handles {
        let detail = handle.await.unwrap();
        assert_eq!(detail.status, Status::Broken);
        assert_eq!(detail.culprit_names(), vec!["bob", "carol"]);
    }
    assert_eq!(spy.registry.laboratory().cache().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_for_different_targets_stay_independent() {
    let spy = Arc::new(Spy::new());
    let names = ["a", "b", "c", "d"];
    for (i, name) in names.iter().enumerate() {
        spy.farm.put_job(job(name, &[Success, Failure]));
        spy.farm.set_committers(&build_url(name, 2), &[format!("dev-{i}").as_str()]);
    }
    let urls: Vec<String> = names.iter().map(|name| job_url(name)).collect();
    let url_refs: Vec<&str> = urls.iter().map(String::as_str).collect();
    spy.farm.add_view("Checkout", &url_refs);
    spy.poll("Checkout").await;

    let handles: Vec<_> = urls
        .iter()
        .cloned()
        .map(|url| {
            let spy = Arc::clone(&spy);
            tokio::spawn(async move { (url.clone(), spy.detail(&url).await) })
        })
        .collect();

    for handle in handles {
        let (url, detail) = handle.await.unwrap();
        let index = urls.iter().position(|u| *u == url).unwrap();
        assert_eq!(detail.culprit_names(), vec![format!("dev-{index}").as_str()]);
    }
    assert_eq!(spy.offenders.len(), names.len());
}
