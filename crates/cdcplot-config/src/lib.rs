//! # cdcplot Config
//!
//! Type-safe configuration management for cdcplot.
//!
//! Every setting defaults to the fixed constants of the CDC age-group chart,
//! so a run without a configuration file always produces the same chart.
//! A YAML file and `CDCPLOT_*` environment variables can override
//! individual values.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
