//! CSV serialization of the movie table

use super::rows::{MovieRow, HEADER};
use crate::error::Result;
use bytes::Bytes;

/// Serialize header + rows as CSV
///
/// The header is always written, even for an empty row set.
pub fn write_csv(rows: &[MovieRow]) -> Result<Bytes> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| crate::error::Error::Io(e.into_error()))?;
    Ok(Bytes::from(data))
}
