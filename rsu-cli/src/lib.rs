//! Command-line front end for the RSU sale price calculator.

pub mod batch;
pub mod cli;
pub mod csv_loader;
pub mod format;
pub mod logging;
pub mod parse;
pub mod report;

pub use batch::{BatchRow, BatchSummary, RowOutcome};
pub use csv_loader::{CsvLoadError, VestEvent, load_from_file, load_from_str};
pub use report::Report;
