//! Zero-copy byte cursor for binary parsing

use crate::error::{Result, TbfError};

/// Position inside one section of the file
///
/// Parsers consume a cursor and return the advanced one alongside their
/// output. `base` is the absolute file offset of `data[0]`, used for errors.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
    base: u64,
    section: &'static str,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8], base: u64, section: &'static str) -> Self {
        Self {
            data,
            position: 0,
            base,
            section,
        }
    }

    /// Bytes left in the section
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn eos(&self) -> bool {
        self.remaining() == 0
    }

    /// Take exactly `count` bytes as a zero-copy slice
    pub fn take(self, count: usize) -> Result<(&'a [u8], Self)> {
        if count > self.remaining() {
            return Err(TbfError::Truncated {
                section: self.section,
                offset: self.base + self.position as u64,
            });
        }
        let slice = &self.data[self.position..self.position + count];
        Ok((
            slice,
            Self {
                position: self.position + count,
                ..self
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_zero() {
        let data = b"hello";
        let cursor = ByteCursor::new(data, 0, "test");
        let (slice, cursor) = cursor.take(0).unwrap();
        assert_eq!(slice, b"");
        assert_eq!(cursor.remaining(), 5);
    }

    #[test]
    fn test_take_chained() {
        let data = b"helloworld";
        let cursor = ByteCursor::new(data, 0, "test");
        let (first, cursor) = cursor.take(5).unwrap();
        let (second, cursor) = cursor.take(5).unwrap();
        assert_eq!(first, b"hello");
        assert_eq!(second, b"world");
        assert!(cursor.eos());
    }

    #[test]
    fn test_take_too_many_reports_offset() {
        let data = b"hi";
        let cursor = ByteCursor::new(data, 100, "index");
        let (_, cursor) = cursor.take(1).unwrap();
        match cursor.take(10) {
            Err(TbfError::Truncated { section, offset }) => {
                assert_eq!(section, "index");
                assert_eq!(offset, 101);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_take_is_zero_copy() {
        let data = b"hello";
        let (slice, _) = ByteCursor::new(data, 0, "test").take(5).unwrap();
        assert!(std::ptr::eq(slice.as_ptr(), data.as_ptr()));
    }
}
