//! Streaming writer for tensor batch files
//!
//! The header is written when the writer is created, every tensor payload is
//! appended on a page boundary as soon as it is added, and the index and
//! footer are written once on close.

mod align;
mod index;

pub use align::align_up;

use crate::config::WriterConfig;
use crate::error::{Result, TbfError};
use crate::types::{IndexEntry, TensorItem};
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

use align::write_padding;
use index::{encode_footer, encode_header, encode_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Open,
    Closed,
}

/// Writer producing a tensor batch file
///
/// `W` must be positioned at the start of the destination: offsets stored in
/// the index are positions reported by the sink.
#[derive(Debug)]
pub struct Writer<W: Write + Seek> {
    inner: W,
    page_size: u64,
    record_count: u64,
    entry_count: u64,
    entries: Vec<IndexEntry>,
    state: WriterState,
}

impl Writer<BufWriter<File>> {
    /// Create or truncate `path` and write the file header
    pub fn create(path: impl AsRef<Path>, page_size: u32) -> Result<Self> {
        Self::create_with_config(path, &WriterConfig::default().with_page_size(page_size))
    }

    /// Create or truncate `path` with a custom configuration
    pub fn create_with_config(path: impl AsRef<Path>, config: &WriterConfig) -> Result<Self> {
        config.validate()?;
        let path = path.as_ref();
        let file = File::create(path)?;
        let writer = Self::new(BufWriter::new(file), config.page_size)?;
        debug!(path = %path.display(), page_size = config.page_size, "created tensor batch file");
        Ok(writer)
    }

    /// Close, then flush the file to disk and release the handle
    ///
    /// Unlike dropping the writer, this reports errors the OS raises while
    /// committing the file.
    pub fn finish(self) -> Result<()> {
        let file = self
            .into_inner()?
            .into_inner()
            .map_err(|err| err.into_error())?;
        file.sync_all()?;
        Ok(())
    }
}

impl<W: Write + Seek> Writer<W> {
    /// Wrap a sink and write the file header
    pub fn new(mut inner: W, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(TbfError::InvalidPageSize);
        }
        inner.write_all(&encode_header())?;
        Ok(Self {
            inner,
            page_size: page_size as u64,
            record_count: 0,
            entry_count: 0,
            entries: Vec::new(),
            state: WriterState::Open,
        })
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of completed records
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Number of tensors written, across all records
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    pub fn is_closed(&self) -> bool {
        self.state == WriterState::Closed
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            WriterState::Open => Ok(()),
            WriterState::Closed => Err(TbfError::Closed),
        }
    }

    /// Append one tensor under `record_id`
    ///
    /// The item is validated before anything is written. Returns the
    /// page-aligned offset the payload was written at.
    pub fn add_tensor(&mut self, record_id: u64, item: &TensorItem<'_>) -> Result<u64> {
        self.ensure_open()?;
        let dtype = item.validate()?;

        let cursor = self.inner.stream_position()?;
        let aligned = align_up(cursor, self.page_size);
        write_padding(&mut self.inner, aligned - cursor)?;
        self.inner.write_all(&item.data)?;

        trace!(
            record_id,
            key = %item.key,
            offset = aligned,
            bytes = item.data.len(),
            padding = aligned - cursor,
            "wrote tensor"
        );

        self.entries.push(IndexEntry {
            record_id,
            key: item.key.clone(),
            dtype,
            shape: item.shape.clone(),
            data_offset: aligned,
            byte_length: item.data.len() as u64,
        });
        self.entry_count += 1;
        Ok(aligned)
    }

    /// Append a record: every item shares the next record id
    ///
    /// The first failing item aborts the call. Payloads of earlier items in
    /// the same call stay in the file, but the record count only advances
    /// when every item was written. Returns the record id used.
    pub fn add_record(&mut self, items: &[TensorItem<'_>]) -> Result<u64> {
        self.ensure_open()?;
        let record_id = self.record_count;
        for item in items {
            self.add_tensor(record_id, item)?;
        }
        self.record_count += 1;
        Ok(record_id)
    }

    /// Append records in order
    pub fn add_records<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<[TensorItem<'a>]>,
    {
        for record in records {
            self.add_record(record.as_ref())?;
        }
        Ok(())
    }

    /// Write the index and footer and flush
    ///
    /// A second call does nothing. The writer counts as closed even when
    /// this fails, since the stream is no longer in a state worth resuming.
    pub fn close(&mut self) -> Result<()> {
        if self.state == WriterState::Closed {
            return Ok(());
        }
        self.state = WriterState::Closed;

        let result = self.write_trailer();
        if let Err(err) = &result {
            warn!(error = %err, "failed to finalize tensor batch file");
        }
        result
    }

    fn write_trailer(&mut self) -> Result<()> {
        let index_offset = self.inner.stream_position()?;
        let entries = std::mem::take(&mut self.entries);
        self.inner
            .write_all(&encode_index(&entries, self.record_count))?;

        let index_size = self.inner.stream_position()? - index_offset;
        self.inner
            .write_all(&encode_footer(index_offset, index_size))?;
        self.inner.flush()?;

        debug!(
            records = self.record_count,
            entries = self.entry_count,
            index_offset,
            index_size,
            "closed tensor batch file"
        );
        Ok(())
    }

    /// Close the writer and hand back the sink
    pub fn into_inner(mut self) -> Result<W> {
        self.close()?;
        Ok(self.inner)
    }
}

/// Write `records` to a new file at `path`
pub fn write_records<'a, P, I>(path: P, records: I, page_size: u32) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator,
    I::Item: AsRef<[TensorItem<'a>]>,
{
    let mut writer = Writer::create(path, page_size)?;
    writer.add_records(records)?;
    writer.finish()
}

/// Write `records` into an in-memory file
pub fn to_bytes<'a, I>(records: I, page_size: u32) -> Result<Vec<u8>>
where
    I: IntoIterator,
    I::Item: AsRef<[TensorItem<'a>]>,
{
    let mut writer = Writer::new(Cursor::new(Vec::new()), page_size)?;
    writer.add_records(records)?;
    Ok(writer.into_inner()?.into_inner())
}
