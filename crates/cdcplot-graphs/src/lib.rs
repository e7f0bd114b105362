//! # cdcplot Graphs
//!
//! The download, aggregation, and chart rendering pipeline.
//!
//! This crate fetches the CDC provisional death-count CSV, sums COVID-19
//! deaths per age group, and renders the totals as a line chart with
//! plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod fetcher;
pub mod pipeline;
pub mod renderer;
pub mod traits;
pub mod transformer;
#[allow(missing_docs)]
pub mod types;
pub mod utils;
pub mod viewer;

pub use fetcher::*;
pub use pipeline::*;
pub use renderer::*;
pub use traits::*;
pub use transformer::*;
pub use types::*;
pub use utils::*;
pub use viewer::*;
