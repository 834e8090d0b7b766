//! Error types for the minion calculator.
//!
//! Recoverable conditions met during a calculation (missing prices, cascade
//! bound reached, degenerate windows) never surface here; they are recorded as
//! notes on the [`Outcome`](crate::models::Outcome). These errors cover the
//! boundaries: loading catalog data, decoding setup IDs and guarding the
//! calculator against overlapping invocations.

use thiserror::Error;

/// Errors raised while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid item table: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid catalog tables: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog has no nodes")]
    Empty,
    #[error("bazaar snapshot reports an unsuccessful call")]
    UnsuccessfulSnapshot,
}

/// Errors raised while encoding or decoding setup IDs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    #[error("could not find version number")]
    MissingVersion,
    #[error("incompatible version: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
    #[error("ID incomplete at field {field}")]
    Truncated { field: &'static str },
    #[error("option index {index} out of range for field {field}")]
    OptionOutOfRange { field: &'static str, index: i64 },
    #[error("value {value:?} is not an option of field {field}")]
    UnknownOption { field: &'static str, value: String },
    #[error("invalid value {value:?} for field {field}")]
    InvalidValue { field: &'static str, value: String },
}

/// Errors returned by the [`Calculator`](crate::calculator::Calculator).
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("a calculation is already in progress on this calculator")]
    Busy,
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
