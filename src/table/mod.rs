//! Movie table module
//!
//! The table is the contract between the two stages: the ingestor flattens
//! movies into [`MovieRow`]s and writes them as CSV, the visualizer loads the
//! CSV back into a [`MovieTable`].

mod reader;
mod rows;
mod writer;

pub use reader::{MovieTable, SummaryRecord, REQUIRED_COLUMNS};
pub use rows::{flatten_movie, flatten_movies, MovieRow, HEADER, NOT_AVAILABLE};
pub use writer::write_csv;
