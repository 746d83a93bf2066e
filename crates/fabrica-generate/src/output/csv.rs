use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::{FieldError, Result};
use crate::schema::Record;

/// Write records as CSV, deriving the header from the first record's
/// keys. Nested values are serialized as JSON cells. Returns the byte
/// count written.
pub fn write_csv(path: &Path, records: &[Record]) -> Result<u64> {
    let first = records.first().ok_or(FieldError::EmptyExport)?;
    let header: Vec<&str> = first.keys().map(String::as_str).collect();

    let sink = ByteCounter {
        inner: BufWriter::new(File::create(path)?),
        written: 0,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);

    writer.write_record(&header)?;
    for record in records {
        let row: Vec<String> = header
            .iter()
            .map(|key| record.get(*key).map(|value| value.render()).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    let sink = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(sink.written)
}

/// Write adapter tallying bytes as they pass through to the file.
struct ByteCounter<W: Write> {
    inner: W,
    written: u64,
}

impl<W: Write> Write for ByteCounter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf).inspect(|size| {
            self.written = self.written.saturating_add(*size as u64);
        })
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
