//! Catalog error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog CSV is missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("line {line}: bad value {value:?} for field {field:?}")]
    Parse {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("duplicate vehicle name {0:?}")]
    DuplicateVehicle(String),

    #[error("unknown vehicle name {0:?}")]
    UnknownVehicle(String),
}

/// Shorthand result type for convoy-catalog.
pub type CatalogResult<T> = Result<T, CatalogError>;
