//! Binary parser for tensor batch files
//!
//! Zero-copy parsing: the footer locates the index, the index is decoded into
//! metadata, and tensor payloads are returned as views into the input buffer.
//! Pair with a memory map to read single records of large files without
//! touching the rest.

mod entry;
mod footer;
mod primitives;
mod take;

pub use footer::Footer;

use crate::error::{Result, TbfError};
use crate::types::{FOOTER_SIZE, HEADER_SIZE, IndexEntry, TensorView};
use entry::parse_index;
use footer::{parse_footer, parse_header};

/// Parsed tensor batch file borrowing the underlying bytes
#[derive(Debug, Clone)]
pub struct TbfView<'a> {
    bytes: &'a [u8],
    footer: Footer,
    record_count: u64,
    entries: Vec<IndexEntry>,
}

/// Parse a tensor batch file from bytes
///
/// Validates header, footer and index, and checks that every payload lies
/// inside the data region between the header and the index.
pub fn parse(bytes: &[u8]) -> Result<TbfView<'_>> {
    if bytes.len() < HEADER_SIZE + FOOTER_SIZE {
        return Err(TbfError::Truncated {
            section: "file",
            offset: bytes.len() as u64,
        });
    }
    parse_header(bytes)?;
    let footer = parse_footer(bytes)?;

    let limit = (bytes.len() - FOOTER_SIZE) as u64;
    let index_end = footer
        .index_offset
        .checked_add(footer.index_size)
        .filter(|end| *end <= limit && footer.index_offset >= HEADER_SIZE as u64)
        .ok_or(TbfError::IndexOutOfBounds {
            offset: footer.index_offset,
            size: footer.index_size,
            limit,
        })?;
    let index_bytes = &bytes[footer.index_offset as usize..index_end as usize];
    let index = parse_index(index_bytes, footer.index_offset)?;

    for entry in &index.entries {
        let in_bounds = entry.data_offset >= HEADER_SIZE as u64
            && entry
                .data_offset
                .checked_add(entry.byte_length)
                .is_some_and(|end| end <= footer.index_offset);
        if !in_bounds {
            return Err(TbfError::DataOutOfBounds {
                key: entry.key.clone(),
                offset: entry.data_offset,
                len: entry.byte_length,
            });
        }
    }

    Ok(TbfView {
        bytes,
        footer,
        record_count: index.record_count,
        entries: index.entries,
    })
}

impl<'a> TbfView<'a> {
    pub fn footer(&self) -> Footer {
        self.footer
    }

    /// Number of records, including empty ones
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Number of tensors across all records
    pub fn entry_count(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Tensor metadata in write order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// View the payload of one entry
    ///
    /// The entry may come from anywhere, so its payload range is checked
    /// against the data region of this file.
    pub fn tensor<'v>(&'v self, entry: &'v IndexEntry) -> Result<TensorView<'v>> {
        let out_of_bounds = || TbfError::DataOutOfBounds {
            key: entry.key.clone(),
            offset: entry.data_offset,
            len: entry.byte_length,
        };
        let end = entry
            .data_offset
            .checked_add(entry.byte_length)
            .filter(|end| {
                entry.data_offset >= HEADER_SIZE as u64 && *end <= self.footer.index_offset
            })
            .ok_or_else(out_of_bounds)?;
        let data = self
            .bytes
            .get(entry.data_offset as usize..end as usize)
            .ok_or_else(out_of_bounds)?;
        Ok(TensorView {
            record_id: entry.record_id,
            key: &entry.key,
            dtype: entry.dtype,
            shape: &entry.shape,
            data,
        })
    }

    // Entries decoded by `parse` were bounds-checked there
    fn decoded<'v>(&'v self, entry: &'v IndexEntry) -> TensorView<'v> {
        let start = entry.data_offset as usize;
        let end = start + entry.byte_length as usize;
        TensorView {
            record_id: entry.record_id,
            key: &entry.key,
            dtype: entry.dtype,
            shape: &entry.shape,
            data: &self.bytes[start..end],
        }
    }

    /// Every tensor of record `record_id`, in write order
    pub fn record(&self, record_id: u64) -> Result<Vec<TensorView<'_>>> {
        if record_id >= self.record_count {
            return Err(TbfError::RecordOutOfRange {
                record_id,
                record_count: self.record_count,
            });
        }
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.record_id == record_id)
            .map(|entry| self.decoded(entry))
            .collect())
    }

    /// Find a tensor of a record by key
    pub fn get(&self, record_id: u64, key: &str) -> Option<TensorView<'_>> {
        self.entries
            .iter()
            .find(|entry| entry.record_id == record_id && entry.key == key)
            .map(|entry| self.decoded(entry))
    }

    /// Iterate over all records in order
    pub fn records(&self) -> impl Iterator<Item = Vec<TensorView<'_>>> + '_ {
        (0..self.record_count).map(move |id| {
            self.entries
                .iter()
                .filter(|entry| entry.record_id == id)
                .map(|entry| self.decoded(entry))
                .collect()
        })
    }
}
