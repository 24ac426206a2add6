use thiserror::Error;

/// Why a single link could not be decoded. Never fatal to a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unsupported link type: {0}...")]
    UnsupportedScheme(String),

    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("malformed structure: {0}")]
    MalformedStructure(String),

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
}

/// Batch-level outcomes that callers must tell apart from success.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("no links were supplied")]
    EmptyInputBatch,

    #[error("no node accepted ({failed} failed to decode, {duplicates} duplicates)")]
    NoRecordsAccepted { failed: usize, duplicates: usize },

    #[error("failed to render proxy entry: {0}")]
    Render(String),
}
