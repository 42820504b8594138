//! Report outputs.
//!
//! # Submodules
//!
//! - [`xlsx`]: deduplicates fetched rows and writes the dated spreadsheet
//!
//! # Output Structure
//!
//! ```text
//! ./
//! └── news_monitoring_2025-05-06.xlsx   # removed again after the email attempt
//! ```

pub mod xlsx;
