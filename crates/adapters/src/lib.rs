// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cieye-adapters: collaborator seams between the engine and the build farm

pub mod annotate;
pub mod farm;

pub use annotate::{AnnotateError, AnnotationTransport};
pub use farm::{BuildFarmClient, FarmError};

#[cfg(any(test, feature = "test-support"))]
pub use annotate::{AnnotationCall, FakeAnnotationTransport};
#[cfg(any(test, feature = "test-support"))]
pub use farm::{FakeBuildFarm, FarmCall};
