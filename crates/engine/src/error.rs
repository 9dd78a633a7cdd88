// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use cieye_adapters::{AnnotateError, FarmError};
use cieye_core::ClassifyError;
use thiserror::Error;

/// Errors surfaced by a single digest, detail or annotation request.
///
/// Each error affects only the request that raised it; other targets'
/// analysis state is left untouched.
#[derive(Debug, Error)]
pub enum SpyError {
    #[error("build farm error: {0}")]
    Farm(#[from] FarmError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("annotation failed: {0}")]
    Annotate(#[from] AnnotateError),
}
