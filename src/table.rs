//! CSV output for pixel records
//!
//! Every file starts with the fixed header `x,y,r,g,b,opacity`, followed by
//! one row per record in the order given. Rows end in `\r\n`.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::extract::PixelRecord;

/// Column names, in output order
pub const HEADER: [&str; 6] = ["x", "y", "r", "g", "b", "opacity"];

/// Errors that can occur when writing or reading record tables
#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unexpected header {found:?}, expected {:?}", HEADER)]
    Header { found: Vec<String> },
}

/// Write records to a CSV file, truncating any existing content
///
/// Returns the number of data rows written.
pub fn write_records<I>(records: I, path: impl AsRef<Path>) -> Result<usize, TableError>
where
    I: IntoIterator<Item = PixelRecord>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| TableError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = write_records_to(records, file)?;
    debug!(path = %path.display(), rows, "wrote CSV");
    Ok(rows)
}

/// Write the header and one row per record to any writer
pub fn write_records_to<I, W>(records: I, writer: W) -> Result<usize, TableError>
where
    I: IntoIterator<Item = PixelRecord>,
    W: io::Write,
{
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    out.write_record(HEADER)?;

    let mut rows = 0;
    for record in records {
        out.serialize(record)?;
        rows += 1;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(rows)
}

/// Read a CSV file produced by [`write_records`]
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<PixelRecord>, TableError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TableError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_records_from(file)
}

/// Parse records from any reader, checking the header row
pub fn read_records_from<R: io::Read>(reader: R) -> Result<Vec<PixelRecord>, TableError> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?;
    if !headers.iter().eq(HEADER) {
        return Err(TableError::Header {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    rdr.deserialize()
        .collect::<Result<Vec<PixelRecord>, csv::Error>>()
        .map_err(TableError::from)
}
