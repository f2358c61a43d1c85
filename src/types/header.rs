//! Layout constants shared by the writer and the parser

/// Magic bytes opening every file
pub const FILE_MAGIC: &[u8; 8] = b"TBFDATA1";

/// Magic bytes opening the index block
pub const INDEX_MAGIC: &[u8; 8] = b"TBFIDX01";

/// Magic bytes opening the footer
pub const FOOTER_MAGIC: &[u8; 8] = b"TBFTRLR1";

/// Current format version, written into header, index and footer
pub const VERSION: u32 = 1;

/// File header size in bytes (magic + version + reserved)
pub const HEADER_SIZE: usize = 16;

/// Index header size in bytes (magic + version + entry_count + record_count)
pub const INDEX_HEADER_SIZE: usize = 28;

/// Fixed part of one index entry, before shape dims and key bytes
pub const ENTRY_FIXED_SIZE: usize = 32;

/// Footer size in bytes; the footer is always the last thing in the file
pub const FOOTER_SIZE: usize = 64;

/// Zero bytes closing the footer
pub const FOOTER_RESERVED: usize = 36;

/// Page size used when the caller does not choose one
pub const DEFAULT_PAGE_SIZE: u32 = 4096;
