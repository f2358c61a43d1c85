//! Page alignment of payloads

use std::io::{self, Read, Write};

/// Round `value` up to the next multiple of `alignment`
///
/// A value already on a boundary is returned unchanged.
pub fn align_up(value: u64, alignment: u64) -> u64 {
    match value % alignment {
        0 => value,
        rem => value + (alignment - rem),
    }
}

/// Write `len` zero bytes without allocating a page-sized buffer
pub fn write_padding<W: Write + ?Sized>(writer: &mut W, len: u64) -> io::Result<()> {
    let copied = io::copy(&mut io::repeat(0).take(len), writer)?;
    if copied != len {
        return Err(io::Error::new(
            io::ErrorKind::WriteZero,
            "padding ended before expected size",
        ));
    }
    Ok(())
}
