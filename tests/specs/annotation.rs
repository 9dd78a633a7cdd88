//! Notes attached to failing builds.

use crate::prelude::*;
use BuildResult::{Failure, Success};

#[tokio::test]
async fn note_goes_to_the_build_that_opened_the_break() {
    let spy = Spy::new();
    spy.farm.put_job(job("d", &[Success, Failure, Failure]));
    spy.farm.add_view("Checkout", &[job_url("d").as_str()]);
    spy.poll("Checkout").await;

    let annotated = spy.registry.annotate(&TargetId::new(job_url("d")), "on it").await.unwrap();

    assert!(annotated);
    let calls = spy.notes.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].build, BuildUrl::new(build_url("d", 2)));
    assert_eq!(calls[0].note, "on it");
}

#[tokio::test]
async fn healthy_target_accepts_note_without_delivery() {
    let spy = Spy::new();
    spy.farm.put_job(job("a", &[Failure, Success]));
    spy.farm.add_view("Checkout", &[job_url("a").as_str()]);
    spy.poll("Checkout").await;

    let annotated = spy.registry.annotate(&TargetId::new(job_url("a")), "on it").await.unwrap();

    assert!(annotated);
    assert!(spy.notes.calls().is_empty());
}

#[tokio::test]
async fn unknown_target_is_refused() {
    let spy = Spy::new();

    let annotated = spy.registry.annotate(&TargetId::new(job_url("nope")), "on it").await.unwrap();

    assert!(!annotated);
    assert!(spy.notes.calls().is_empty());
}

#[tokio::test]
async fn building_target_without_a_break_accepts_note_without_delivery() {
    let spy = Spy::new();
    spy.farm.put_job(building("b", None));
    spy.farm.add_view("Checkout", &[job_url("b").as_str()]);
    spy.poll("Checkout").await;

    assert!(spy.registry.annotate(&TargetId::new(job_url("b")), "on it").await.unwrap());
    assert!(spy.notes.calls().is_empty());
}
