//! Error types for tbf

use std::io;
use thiserror::Error;

/// Errors raised while writing or parsing a tensor batch file
#[derive(Debug, Error)]
pub enum TbfError {
    /// Page size of zero
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// Underlying I/O failure, passed through untouched
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Mutation attempted on a closed writer
    #[error("writer already closed")]
    Closed,

    /// Tensor key is the empty string
    #[error("tensor key cannot be empty")]
    EmptyKey,

    /// Tensor key does not fit the u32 length field of the index
    #[error("tensor key is {len} bytes, longer than the index allows")]
    KeyTooLong { len: usize },

    /// Dtype code outside the known enumeration
    #[error("unsupported dtype code: {0}")]
    UnknownDType(u16),

    /// Shape dimension below zero
    #[error("negative shape dim {dim} at axis {axis} for key {key:?}")]
    NegativeDimension { key: String, axis: usize, dim: i64 },

    /// Shape rank does not fit the u16 ndim field of the index
    #[error("tensor {key:?} has {ndim} dimensions, more than the index allows")]
    TooManyDimensions { key: String, ndim: usize },

    /// Byte size implied by the shape overflows u64
    #[error("byte size of shape {shape:?} overflows for key {key:?}")]
    ShapeOverflow { key: String, shape: Vec<i64> },

    /// Payload length disagrees with shape and dtype
    #[error("data length mismatch for key {key:?}: got={actual} expect={expected}")]
    DataSizeMismatch {
        key: String,
        expected: u64,
        actual: u64,
    },

    /// Section magic bytes are wrong
    #[error("invalid {section} magic")]
    InvalidMagic { section: &'static str },

    /// Section carries a version this crate does not understand
    #[error("unsupported {section} version: {version}")]
    UnsupportedVersion { section: &'static str, version: u32 },

    /// Input ended inside a section
    #[error("truncated {section} at byte {offset}")]
    Truncated { section: &'static str, offset: u64 },

    /// Footer points at an index outside the file
    #[error("index [{offset}, +{size}) points outside payload region ending at {limit}")]
    IndexOutOfBounds { offset: u64, size: u64, limit: u64 },

    /// Index block has bytes after its last entry
    #[error("unexpected {0} trailing bytes in index")]
    TrailingBytes(u64),

    /// Key bytes in the index are not UTF-8
    #[error("invalid UTF-8 in key of index entry {entry}")]
    InvalidUtf8 { entry: u64 },

    /// Entry refers to a record id past the record count
    #[error("record {record_id} out of range, file holds {record_count} records")]
    RecordOutOfRange { record_id: u64, record_count: u64 },

    /// Entry payload range falls outside the data region
    #[error("payload of {key:?} at [{offset}, +{len}) lies outside the data region")]
    DataOutOfBounds { key: String, offset: u64, len: u64 },
}

/// Result type for tbf operations
pub type Result<T> = std::result::Result<T, TbfError>;
