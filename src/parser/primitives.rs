//! Little-endian integer parsers

use super::take::ByteCursor;
use crate::error::Result;

/// Parse a u16 (little-endian)
pub fn u16_le(cursor: ByteCursor<'_>) -> Result<(u16, ByteCursor<'_>)> {
    let (b, cursor) = cursor.take(2)?;
    Ok((u16::from_le_bytes([b[0], b[1]]), cursor))
}

/// Parse a u32 (little-endian)
pub fn u32_le(cursor: ByteCursor<'_>) -> Result<(u32, ByteCursor<'_>)> {
    let (b, cursor) = cursor.take(4)?;
    Ok((u32::from_le_bytes([b[0], b[1], b[2], b[3]]), cursor))
}

/// Parse a u64 (little-endian)
pub fn u64_le(cursor: ByteCursor<'_>) -> Result<(u64, ByteCursor<'_>)> {
    let (b, cursor) = cursor.take(8)?;
    Ok((
        u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]),
        cursor,
    ))
}

/// Parse an i64 (little-endian)
pub fn i64_le(cursor: ByteCursor<'_>) -> Result<(i64, ByteCursor<'_>)> {
    let (b, cursor) = cursor.take(8)?;
    Ok((
        i64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]),
        cursor,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u16_le() {
        let data = &[0x01, 0x02];
        let (val, _) = u16_le(ByteCursor::new(data, 0, "test")).unwrap();
        assert_eq!(val, 0x0201);
    }

    #[test]
    fn test_u32_le() {
        let data = &[0x01, 0x02, 0x03, 0x04];
        let (val, _) = u32_le(ByteCursor::new(data, 0, "test")).unwrap();
        assert_eq!(val, 0x04030201);
    }

    #[test]
    fn test_u64_le() {
        let data = &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let (val, _) = u64_le(ByteCursor::new(data, 0, "test")).unwrap();
        assert_eq!(val, 0x0807060504030201);
    }

    #[test]
    fn test_chained() {
        let mut data = Vec::new();
        data.extend_from_slice(&42u32.to_le_bytes());
        data.extend_from_slice(&(-123i64).to_le_bytes());

        let cursor = ByteCursor::new(&data, 0, "test");
        let (v1, cursor) = u32_le(cursor).unwrap();
        let (v2, cursor) = i64_le(cursor).unwrap();

        assert_eq!(v1, 42);
        assert_eq!(v2, -123);
        assert!(cursor.eos());
    }

    #[test]
    fn test_short_input() {
        let data = &[0x01, 0x02, 0x03];
        assert!(u32_le(ByteCursor::new(data, 0, "test")).is_err());
    }
}
