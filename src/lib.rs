//! Subcategory breakdown of citizen complaint records by atoll and island.
//!
//! The pipeline reads a complaint table, resolves English labels from an
//! optional translation table, ranks subcategories per location by
//! complaints, unique individuals and unique households, and overlays
//! optional population totals. See [`report::analyze_files`] for the entry
//! point used by the command line.
pub mod aggregate;
pub mod config;
pub mod error;
pub mod labels;
pub mod loader;
pub mod output;
pub mod population;
pub mod render_html;
pub mod report;
pub mod types;
pub mod util;

pub use aggregate::LocationDimension;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use report::{analyze_files, analyze_reader, AnalysisInputs};
pub use types::{AnalysisOutcome, AnalysisResult, LocationStats};
