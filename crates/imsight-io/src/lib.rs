//! imsight-io - Data I/O for exploratory analysis
//!
//! This crate turns delimited text files into typed, immutable tables:
//!
//! - **Loader**: `;`-delimited (configurable) text with a header row
//! - **Table**: column-major, equal-length, typed columns with missing cells
//! - **Classifier**: the ordered set of numeric columns
//!
//! # Design
//!
//! Readers implement the `DataReader` trait and load the whole file at
//! once. Types are inferred from every row, so a stray text cell deep in
//! the file demotes a column to text rather than becoming a silent NaN.

pub mod classify;
pub mod csv_reader;
pub mod reader;
pub mod schema;
pub mod table;

pub use classify::*;
pub use csv_reader::*;
pub use reader::*;
pub use schema::*;
pub use table::*;
