//! Reading and writing the tables that enter and leave the pipeline.
//!
//! Both tables are comma-separated files with a header row. The descriptor
//! table carries one raw molecule per row; the feature table carries the
//! derived statistics plus any per-atom and per-bond wide columns.

pub mod descriptor;
pub mod feature;
pub mod traits;

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Required column '{column}' is missing from the header")]
    MissingColumn { column: String },
    #[error("Row {row} has {found} cells but the header has {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}
