//! Core types for the tensor batch format

mod dtype;
mod entry;
mod header;
mod tensor;

pub use dtype::DType;
pub use entry::IndexEntry;
pub use header::{
    DEFAULT_PAGE_SIZE, ENTRY_FIXED_SIZE, FILE_MAGIC, FOOTER_MAGIC, FOOTER_RESERVED, FOOTER_SIZE,
    HEADER_SIZE, INDEX_HEADER_SIZE, INDEX_MAGIC, VERSION,
};
pub use tensor::{TensorItem, TensorView, expected_byte_length};
