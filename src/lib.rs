//! tbf - Tensor Batch Format
//!
//! A binary container for ordered records of named, typed, multi-dimensional
//! tensors. Payloads are page-aligned so readers can memory-map them directly,
//! and a trailing index gives random access to any record without scanning.
//!
//! # Layout
//!
//! ```text
//! [File Header] [Record 0 payloads] [Record 1 payloads] ... [Index] [Footer]
//! ```
//!
//! - Header: `"TBFDATA1"`, version, reserved (16 bytes)
//! - Every payload starts on a multiple of the page size (zero padded)
//! - Index: metadata of every tensor in write order
//! - Footer: `"TBFTRLR1"`, version, index offset and size (64 bytes)
//!
//! All integers are little-endian. Files are byte-identical to those written
//! by the Go, C++ and Python implementations of the format.
//!
//! # Example
//!
//! ```rust
//! use tbf::{DType, TensorItem, Writer, parse};
//! use std::io::Cursor;
//!
//! let data: Vec<u8> = [1i32, 2, 3, 4].iter().flat_map(|v| v.to_le_bytes()).collect();
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()), tbf::DEFAULT_PAGE_SIZE).unwrap();
//! writer
//!     .add_record(&[TensorItem::new("x", DType::Int32, vec![2, 2], &data[..])])
//!     .unwrap();
//! let bytes = writer.into_inner().unwrap().into_inner();
//!
//! let view = parse(&bytes).unwrap();
//! let x = view.get(0, "x").unwrap();
//! assert_eq!(x.shape, &[2, 2]);
//! assert_eq!(x.data, &data[..]);
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use config::WriterConfig;
pub use error::{Result, TbfError};
pub use parser::{Footer, TbfView, parse};
pub use types::{
    DEFAULT_PAGE_SIZE, DType, FILE_MAGIC, FOOTER_MAGIC, FOOTER_SIZE, HEADER_SIZE, INDEX_MAGIC,
    IndexEntry, TensorItem, TensorView, VERSION,
};
pub use writer::{Writer, to_bytes, write_records};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::{NdarrayError, TensorElement};
