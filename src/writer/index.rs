//! Header, index and footer serialization

use crate::types::{
    FILE_MAGIC, FOOTER_MAGIC, FOOTER_RESERVED, FOOTER_SIZE, HEADER_SIZE, INDEX_HEADER_SIZE,
    INDEX_MAGIC, IndexEntry, VERSION,
};

const _: () = assert!(FOOTER_SIZE == 28 + FOOTER_RESERVED);

/// Encode the 16-byte file header
pub fn encode_header() -> [u8; HEADER_SIZE] {
    let mut buf = [0u8; HEADER_SIZE];
    buf[0..8].copy_from_slice(FILE_MAGIC);
    buf[8..12].copy_from_slice(&VERSION.to_le_bytes());
    // bytes 12..16 reserved
    buf
}

/// Encode the index block for `entries` in write order
///
/// Keys and ranks must already be validated to fit their u32/u16 fields.
pub fn encode_index(entries: &[IndexEntry], record_count: u64) -> Vec<u8> {
    let size = INDEX_HEADER_SIZE + entries.iter().map(IndexEntry::encoded_size).sum::<usize>();
    let mut buf = Vec::with_capacity(size);

    buf.extend_from_slice(INDEX_MAGIC);
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&(entries.len() as u64).to_le_bytes());
    buf.extend_from_slice(&record_count.to_le_bytes());

    for entry in entries {
        buf.extend_from_slice(&entry.record_id.to_le_bytes());
        buf.extend_from_slice(&(entry.key.len() as u32).to_le_bytes());
        buf.extend_from_slice(&entry.dtype.code().to_le_bytes());
        buf.extend_from_slice(&(entry.shape.len() as u16).to_le_bytes());
        buf.extend_from_slice(&entry.data_offset.to_le_bytes());
        buf.extend_from_slice(&entry.byte_length.to_le_bytes());
        for dim in &entry.shape {
            buf.extend_from_slice(&dim.to_le_bytes());
        }
        buf.extend_from_slice(entry.key.as_bytes());
    }

    debug_assert_eq!(buf.len(), size);
    buf
}

/// Encode the 64-byte footer
pub fn encode_footer(index_offset: u64, index_size: u64) -> [u8; FOOTER_SIZE] {
    let mut buf = [0u8; FOOTER_SIZE];
    buf[0..8].copy_from_slice(FOOTER_MAGIC);
    buf[8..12].copy_from_slice(&VERSION.to_le_bytes());
    buf[12..20].copy_from_slice(&index_offset.to_le_bytes());
    buf[20..28].copy_from_slice(&index_size.to_le_bytes());
    buf
}
