//! Index block parsing

use super::footer::parse_tag;
use super::primitives::{i64_le, u16_le, u32_le, u64_le};
use super::take::ByteCursor;
use crate::error::{Result, TbfError};
use crate::types::{DType, ENTRY_FIXED_SIZE, INDEX_MAGIC, IndexEntry};

/// Decoded index block
#[derive(Debug, Clone)]
pub struct Index {
    pub record_count: u64,
    pub entries: Vec<IndexEntry>,
}

/// Parse the index block; `base` is its absolute file offset
pub fn parse_index(bytes: &[u8], base: u64) -> Result<Index> {
    let cursor = ByteCursor::new(bytes, base, "index");
    let cursor = parse_tag(cursor, INDEX_MAGIC, "index")?;
    let (entry_count, cursor) = u64_le(cursor)?;
    let (record_count, mut cursor) = u64_le(cursor)?;

    // entry_count is untrusted; never reserve more than the block can hold
    let capacity = (cursor.remaining() / ENTRY_FIXED_SIZE).min(entry_count as usize);
    let mut entries = Vec::with_capacity(capacity);
    for i in 0..entry_count {
        let (entry, next) = parse_entry(cursor, i)?;
        if entry.record_id >= record_count {
            return Err(TbfError::RecordOutOfRange {
                record_id: entry.record_id,
                record_count,
            });
        }
        entries.push(entry);
        cursor = next;
    }

    if !cursor.eos() {
        return Err(TbfError::TrailingBytes(cursor.remaining() as u64));
    }

    Ok(Index {
        record_count,
        entries,
    })
}

/// Parse one entry: fixed part, shape dims, key bytes
fn parse_entry(cursor: ByteCursor<'_>, i: u64) -> Result<(IndexEntry, ByteCursor<'_>)> {
    let (record_id, cursor) = u64_le(cursor)?;
    let (key_len, cursor) = u32_le(cursor)?;
    let (dtype_code, cursor) = u16_le(cursor)?;
    let (ndim, cursor) = u16_le(cursor)?;
    let (data_offset, cursor) = u64_le(cursor)?;
    let (byte_length, mut cursor) = u64_le(cursor)?;

    let dtype = DType::from_u16(dtype_code).ok_or(TbfError::UnknownDType(dtype_code))?;

    let mut shape = Vec::with_capacity(ndim as usize);
    for _ in 0..ndim {
        let (dim, next) = i64_le(cursor)?;
        shape.push(dim);
        cursor = next;
    }

    let (key_bytes, cursor) = cursor.take(key_len as usize)?;
    let key = std::str::from_utf8(key_bytes).map_err(|_| TbfError::InvalidUtf8 { entry: i })?;

    Ok((
        IndexEntry {
            record_id,
            key: key.to_string(),
            dtype,
            shape,
            data_offset,
            byte_length,
        },
        cursor,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VERSION;

    fn index_header(entry_count: u64, record_count: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(INDEX_MAGIC);
        buf.extend_from_slice(&VERSION.to_le_bytes());
        buf.extend_from_slice(&entry_count.to_le_bytes());
        buf.extend_from_slice(&record_count.to_le_bytes());
        buf
    }

    fn push_entry(buf: &mut Vec<u8>, record_id: u64, key: &[u8], dtype: u16, shape: &[i64]) {
        buf.extend_from_slice(&record_id.to_le_bytes());
        buf.extend_from_slice(&(key.len() as u32).to_le_bytes());
        buf.extend_from_slice(&dtype.to_le_bytes());
        buf.extend_from_slice(&(shape.len() as u16).to_le_bytes());
        buf.extend_from_slice(&4096u64.to_le_bytes());
        buf.extend_from_slice(&16u64.to_le_bytes());
        for dim in shape {
            buf.extend_from_slice(&dim.to_le_bytes());
        }
        buf.extend_from_slice(key);
    }

    #[test]
    fn test_parse_entries() {
        let mut buf = index_header(2, 2);
        push_entry(&mut buf, 0, b"x", 8, &[2, 2]);
        push_entry(&mut buf, 1, b"scalar", 2, &[]);

        let index = parse_index(&buf, 0).unwrap();
        assert_eq!(index.record_count, 2);
        assert_eq!(index.entries.len(), 2);
        assert_eq!(index.entries[0].key, "x");
        assert_eq!(index.entries[0].dtype, DType::Int32);
        assert_eq!(index.entries[0].shape, vec![2, 2]);
        assert_eq!(index.entries[0].data_offset, 4096);
        assert_eq!(index.entries[1].key, "scalar");
        assert!(index.entries[1].shape.is_empty());
    }

    #[test]
    fn test_trailing_bytes() {
        let mut buf = index_header(0, 0);
        buf.push(0);
        assert!(matches!(
            parse_index(&buf, 0),
            Err(TbfError::TrailingBytes(1))
        ));
    }

    #[test]
    fn test_truncated_entry() {
        let mut buf = index_header(1, 1);
        push_entry(&mut buf, 0, b"key", 8, &[4]);
        buf.truncate(buf.len() - 2);
        assert!(matches!(
            parse_index(&buf, 0),
            Err(TbfError::Truncated { section: "index", .. })
        ));
    }

    #[test]
    fn test_huge_entry_count_does_not_allocate() {
        let buf = index_header(u64::MAX, 1);
        assert!(matches!(
            parse_index(&buf, 0),
            Err(TbfError::Truncated { .. })
        ));
    }

    #[test]
    fn test_unknown_dtype() {
        let mut buf = index_header(1, 1);
        push_entry(&mut buf, 0, b"x", 0, &[1]);
        assert!(matches!(
            parse_index(&buf, 0),
            Err(TbfError::UnknownDType(0))
        ));
    }

    #[test]
    fn test_invalid_utf8_key() {
        let mut buf = index_header(1, 1);
        push_entry(&mut buf, 0, &[0xFF, 0xFE], 6, &[1]);
        assert!(matches!(
            parse_index(&buf, 0),
            Err(TbfError::InvalidUtf8 { entry: 0 })
        ));
    }

    #[test]
    fn test_record_out_of_range() {
        let mut buf = index_header(1, 1);
        push_entry(&mut buf, 1, b"x", 6, &[1]);
        assert!(matches!(
            parse_index(&buf, 0),
            Err(TbfError::RecordOutOfRange {
                record_id: 1,
                record_count: 1
            })
        ));
    }
}
