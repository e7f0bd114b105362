//! # cdcplot
//!
//! Plots total COVID-19 deaths by age group from the CDC provisional
//! death-count dataset.
//!
//! This is the binary crate: it loads configuration, installs logging,
//! runs the download, aggregate, and render pipeline once, and maps the
//! outcome to a process exit status.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;

pub use app::*;
pub use error::*;
