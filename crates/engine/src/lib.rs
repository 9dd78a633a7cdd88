// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cieye-engine: status aggregation and culprit resolution over a build farm

pub mod cache;
pub mod config;
mod env;
pub mod error;
pub mod laboratory;
pub mod logging;
pub mod offenders;
pub mod registry;
pub mod walker;

pub use cache::{AnalysisCache, Analyser};
pub use config::{ConfigError, LogConfig, RegistryPruning, SpyConfig};
pub use error::SpyError;
pub use laboratory::JobLaboratory;
pub use logging::LoggingError;
pub use offenders::KnownOffendersDirectory;
pub use registry::TargetRegistry;
pub use walker::{BuildChainWalker, ChainAnalysis};
