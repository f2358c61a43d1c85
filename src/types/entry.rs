//! Index entry metadata

use super::{DType, ENTRY_FIXED_SIZE};

/// Metadata of one persisted tensor, as recorded in the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub record_id: u64,
    pub key: String,
    pub dtype: DType,
    pub shape: Vec<i64>,
    /// Absolute file offset of the payload, a multiple of the page size
    pub data_offset: u64,
    pub byte_length: u64,
}

impl IndexEntry {
    /// Bytes this entry occupies in the index block
    pub fn encoded_size(&self) -> usize {
        ENTRY_FIXED_SIZE + self.shape.len() * 8 + self.key.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_size_counts_dims_and_key() {
        let entry = IndexEntry {
            record_id: 0,
            key: "abc".into(),
            dtype: DType::Int32,
            shape: vec![2, 2],
            data_offset: 4096,
            byte_length: 16,
        };
        assert_eq!(entry.encoded_size(), 32 + 16 + 3);
    }
}
