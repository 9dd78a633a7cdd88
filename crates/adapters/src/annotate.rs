// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use cieye_core::BuildUrl;
use thiserror::Error;

/// Errors from note delivery
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotateError {
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Adapter for attaching a note to a build on the build farm
#[async_trait]
pub trait AnnotationTransport: Clone + Send + Sync + 'static {
    /// Attach `note` as the description of `build`
    async fn annotate(&self, build: &BuildUrl, note: &str) -> Result<(), AnnotateError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{AnnotateError, AnnotationTransport};
    use async_trait::async_trait;
    use cieye_core::BuildUrl;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded annotation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AnnotationCall {
        pub build: BuildUrl,
        pub note: String,
    }

    #[derive(Default)]
    struct FakeAnnotationState {
        calls: Vec<AnnotationCall>,
        failing: bool,
    }

    /// Fake annotation transport for testing
    #[derive(Clone, Default)]
    pub struct FakeAnnotationTransport {
        inner: Arc<Mutex<FakeAnnotationState>>,
    }

    impl FakeAnnotationTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every delivery fail
        pub fn set_failing(&self, failing: bool) {
            self.inner.lock().failing = failing;
        }

        /// Get all delivered annotations
        pub fn calls(&self) -> Vec<AnnotationCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl AnnotationTransport for FakeAnnotationTransport {
        async fn annotate(&self, build: &BuildUrl, note: &str) -> Result<(), AnnotateError> {
            let mut state = self.inner.lock();
            if state.failing {
                return Err(AnnotateError::DeliveryFailed(format!("cannot annotate {build}")));
            }
            state.calls.push(AnnotationCall { build: build.clone(), note: note.to_string() });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{AnnotationCall, FakeAnnotationTransport};

#[cfg(test)]
#[path = "annotate_tests.rs"]
mod tests;
