// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cieye-core: domain types for observing a build farm

pub mod macros;

pub mod id;
pub mod job;
pub mod status;
pub mod target;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use id::{BuildUrl, Culprit, JobUrl, TargetId};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobSnapshotBuilder;
pub use job::{BuildSummary, JobSnapshot, View};
pub use status::{classify, BuildResult, ClassifyError, Status};
pub use target::{Feature, TargetDetail, TargetDigest, TargetDigestGroup};
