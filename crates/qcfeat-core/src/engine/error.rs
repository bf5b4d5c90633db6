use super::config::ConfigError;
use crate::core::io::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Required column '{column}' is missing from the input table")]
    MissingColumn { column: String },

    #[error("Input table contains no rows")]
    EmptyInput,

    #[error("Feature column '{column}' does not exist in the table")]
    UnknownFeature { column: String },

    #[error("Table error: {source}")]
    Table {
        #[from]
        source: TableError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
