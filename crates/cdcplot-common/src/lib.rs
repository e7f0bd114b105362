//! # cdcplot Common
//!
//! Shared types, error handling, and logging setup for cdcplot.
//!
//! This crate provides the foundational types used across all other crates
//! in the cdcplot workspace: the age-group bucket set, the aggregated series,
//! the filter criteria, and the error taxonomy every stage reports through.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
#[allow(missing_docs)]
pub mod test_utils;

pub use error::{CdcPlotError, Result};
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
pub use types::*;
