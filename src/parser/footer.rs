//! File header and footer parsing

use super::primitives::{u32_le, u64_le};
use super::take::ByteCursor;
use crate::error::{Result, TbfError};
use crate::types::{FILE_MAGIC, FOOTER_MAGIC, FOOTER_SIZE, HEADER_SIZE, VERSION};

/// Decoded footer fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footer {
    pub index_offset: u64,
    pub index_size: u64,
}

/// Parse a magic + version pair shared by every section
pub fn parse_tag<'a>(
    cursor: ByteCursor<'a>,
    magic: &[u8; 8],
    section: &'static str,
) -> Result<ByteCursor<'a>> {
    let (found, cursor) = cursor.take(8)?;
    if found != magic {
        return Err(TbfError::InvalidMagic { section });
    }
    let (version, cursor) = u32_le(cursor)?;
    if version != VERSION {
        return Err(TbfError::UnsupportedVersion { section, version });
    }
    Ok(cursor)
}

/// Validate the 16-byte file header
pub fn parse_header(bytes: &[u8]) -> Result<()> {
    let cursor = ByteCursor::new(&bytes[..HEADER_SIZE.min(bytes.len())], 0, "file header");
    let cursor = parse_tag(cursor, FILE_MAGIC, "file")?;
    // reserved
    cursor.take(4)?;
    Ok(())
}

/// Parse the footer from the last 64 bytes of `bytes`
pub fn parse_footer(bytes: &[u8]) -> Result<Footer> {
    let start = bytes
        .len()
        .checked_sub(FOOTER_SIZE)
        .ok_or(TbfError::Truncated {
            section: "footer",
            offset: 0,
        })?;
    let cursor = ByteCursor::new(&bytes[start..], start as u64, "footer");
    let cursor = parse_tag(cursor, FOOTER_MAGIC, "footer")?;
    let (index_offset, cursor) = u64_le(cursor)?;
    let (index_size, _) = u64_le(cursor)?;
    Ok(Footer {
        index_offset,
        index_size,
    })
}
